use thiserror::Error;

/// Result type alias for Webamon operations
pub type Result<T> = std::result::Result<T, WebamonError>;

/// Pricing URL shown in quota errors
const PRICING_URL: &str = "https://webamon.com/pricing";

/// Account tier a request was made under.
///
/// The tier is inferred from whether an API key is configured and only
/// changes how quota errors are worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// No API key, public search endpoint
    Free,
    /// API key configured, pro endpoint
    Pro,
}

impl Plan {
    /// Plan implied by the presence of an API key
    #[must_use]
    pub const fn for_key(api_key: Option<&str>) -> Self {
        if api_key.is_some() {
            Self::Pro
        } else {
            Self::Free
        }
    }

    fn quota_message(self) -> String {
        match self {
            Self::Free => format!(
                "Rate limit exceeded - you've hit the daily quota (20 queries/day for free tier).\n\
                 Upgrade to Pro for 1,000+ daily queries, larger response sizes, and premium features:\n\
                 {PRICING_URL}"
            ),
            Self::Pro => format!(
                "Rate limit exceeded - you've hit your daily API quota.\n\
                 Check your usage or upgrade your plan at: {PRICING_URL}"
            ),
        }
    }
}

/// Errors that can occur when using the Webamon API
#[derive(Error, Debug)]
pub enum WebamonError {
    /// Authentication failed - invalid or missing API key
    #[error("Authentication failed. Check your API key.")]
    Unauthorized,

    /// Daily quota exhausted
    #[error("{}", plan.quota_message())]
    RateLimited {
        /// Tier the request was made under
        plan: Plan,
    },

    /// Key is valid but lacks permission for the resource
    #[error("Access forbidden. Check your permissions.")]
    Forbidden,

    /// Resource not found
    #[error("Resource not found.")]
    NotFound,

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("Request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("Request timed out.")]
    Timeout,

    /// Connection failed
    #[error("Connection failed. Check your network and API URL. ({0})")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid query parameters
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Screenshot payload could not be decoded
    #[error("invalid screenshot data: {0}")]
    InvalidScreenshot(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_quota_message_is_multiline() {
        let err = WebamonError::RateLimited { plan: Plan::Free };
        let message = err.to_string();
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("20 queries/day"));
        assert!(lines[1].starts_with("Upgrade to Pro"));
        assert_eq!(lines[2], PRICING_URL);
    }

    #[test]
    fn test_pro_quota_message_differs_from_free() {
        let pro = WebamonError::RateLimited { plan: Plan::Pro }.to_string();
        let free = WebamonError::RateLimited { plan: Plan::Free }.to_string();
        assert_ne!(pro, free);
        assert!(pro.contains("your daily API quota"));
        assert!(!pro.contains("free tier"));
        assert_eq!(pro.lines().count(), 2);
    }

    #[test]
    fn test_plan_for_key() {
        assert_eq!(Plan::for_key(None), Plan::Free);
        assert_eq!(Plan::for_key(Some("abc")), Plan::Pro);
    }
}
