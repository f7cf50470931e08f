//! Main Webamon API client implementation.

use crate::api::{ScanApi, SearchApi};
use crate::config::RetryConfig;
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use webamon_core::{Plan, Result, SearchRequest, WebamonError};

/// Public endpoint used without an API key
pub const FREE_BASE_URL: &str = "https://search.webamon.com";

/// Pro endpoint used with an API key
pub const PRO_BASE_URL: &str = "https://pro.webamon.com";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-api-key";

/// Endpoint implied by the presence of an API key
#[must_use]
pub const fn base_url_for(api_key: Option<&str>) -> &'static str {
    match Plan::for_key(api_key) {
        Plan::Pro => PRO_BASE_URL,
        Plan::Free => FREE_BASE_URL,
    }
}

/// Main Webamon API client
#[derive(Clone)]
pub struct WebamonClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    api_key: Option<String>,
    base_url: String,
    retry_config: RetryConfig,
}

/// Why a single attempt failed, and whether another one may succeed
struct AttemptError {
    error: WebamonError,
    retryable: bool,
}

impl WebamonClient {
    /// Create a client with default settings; `None` uses the free tier
    pub fn new(api_key: Option<String>) -> Result<Self> {
        WebamonClientBuilder::new().api_key(api_key).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> WebamonClientBuilder {
        WebamonClientBuilder::new()
    }

    /// Access search endpoints
    #[must_use]
    pub fn search(&self) -> SearchApi<'_> {
        SearchApi::new(self)
    }

    /// Access scan and screenshot endpoints
    #[must_use]
    pub fn scan(&self) -> ScanApi<'_> {
        ScanApi::new(self)
    }

    /// Tier requests are made under
    #[must_use]
    pub fn plan(&self) -> Plan {
        Plan::for_key(self.inner.api_key.as_deref())
    }

    /// Whether an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.inner.api_key.is_some()
    }

    /// Base URL requests go to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Check that the API answers.
    ///
    /// Runs a one-result search; if that fails, falls back to the API root
    /// and reports that error instead.
    pub async fn test_connection(&self) -> Result<Value> {
        let probe = SearchRequest::basic("example.com", "domain.name").size(1);
        match self.search().send(&probe).await {
            Ok(response) => Ok(response),
            Err(e) => {
                debug!(error = %e, "search probe failed, trying API root");
                self.get_with_query("/", &[]).await
            }
        }
    }

    /// Perform a GET request with query parameters, retrying per the
    /// configured policy
    pub(crate) async fn get_with_query(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value> {
        let url = self.build_url(path, params)?;
        let retry = &self.inner.retry_config;
        let mut attempt = 0;

        loop {
            debug!(url = %url, attempt, "GET request");
            match self.attempt(&url).await {
                Ok(value) => return Ok(value),
                Err(AttemptError { error, retryable }) if retryable && attempt < retry.max_retries => {
                    let wait = retry.backoff_for(attempt);
                    warn!(error = %error, ?wait, "request failed, retrying");
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(AttemptError { error, .. }) => return Err(error),
            }
        }
    }

    async fn attempt(&self, url: &Url) -> std::result::Result<Value, AttemptError> {
        let mut request = self.inner.http.get(url.clone());
        if let Some(key) = &self.inner.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            let retryable = e.is_timeout() || e.is_connect();
            AttemptError {
                error: transport_error(&e),
                retryable,
            }
        })?;

        let status = response.status().as_u16();
        if response.status().is_success() {
            return Self::handle_success(response).await.map_err(|error| AttemptError {
                error,
                retryable: false,
            });
        }

        let retryable = self.inner.retry_config.should_retry_status(status);
        let body = response.text().await.unwrap_or_default();
        Err(AttemptError {
            error: self.status_error(status, &body),
            retryable,
        })
    }

    /// Build a URL with query parameters
    fn build_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!(
            "{}/{}",
            self.inner.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| WebamonError::InvalidUrl(format!("{raw}: {e}")))?;

        if !params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Decode a successful response; empty bodies become `{}`
    async fn handle_success(response: reqwest::Response) -> Result<Value> {
        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| WebamonError::Http(e.to_string()))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        serde_json::from_slice(&body).map_err(WebamonError::Json)
    }

    /// Convert an error status to a `WebamonError`
    fn status_error(&self, status: u16, body: &str) -> WebamonError {
        let plan = self.plan();

        match status {
            401 => WebamonError::Unauthorized,
            // The public endpoint answers 403 once the daily quota is spent
            403 if plan == Plan::Free => WebamonError::RateLimited { plan },
            403 => WebamonError::Forbidden,
            404 => WebamonError::NotFound,
            429 => {
                warn!("rate limited by Webamon API");
                WebamonError::RateLimited { plan }
            }
            _ => WebamonError::Api {
                code: status,
                message: error_message(status, body),
            },
        }
    }
}

/// Best-effort message from an error body: JSON `message`, else the text
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
        .or_else(|| {
            let text = body.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .unwrap_or_else(|| {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("unknown error")
                .to_string()
        })
}

fn transport_error(e: &reqwest::Error) -> WebamonError {
    if e.is_timeout() {
        WebamonError::Timeout
    } else if e.is_connect() {
        WebamonError::Connection(e.to_string())
    } else {
        WebamonError::Http(e.to_string())
    }
}

/// Builder for configuring a [`WebamonClient`]
pub struct WebamonClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
    user_agent: String,
    retry_config: RetryConfig,
}

impl Default for WebamonClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WebamonClientBuilder {
    /// Create a new builder for the free tier
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("webamon-cli/{}", env!("CARGO_PKG_VERSION")),
            retry_config: RetryConfig::default(),
        }
    }

    /// Set the API key; blank keys count as no key
    #[must_use]
    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Override the base URL (useful for testing). Without an override the
    /// URL follows the API key.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set retry configuration
    #[must_use]
    pub const fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<WebamonClient> {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| WebamonError::Http(e.to_string()))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| base_url_for(self.api_key.as_deref()).to_string());

        Ok(WebamonClient {
            inner: Arc::new(ClientInner {
                http,
                api_key: self.api_key,
                base_url,
                retry_config: self.retry_config,
            }),
        })
    }
}
