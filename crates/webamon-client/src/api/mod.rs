//! API endpoint modules.

mod scan;
mod search;

pub use scan::ScanApi;
pub use search::{SearchApi, SearchRequestBuilder};

use crate::WebamonClient;
use async_trait::async_trait;
use serde_json::Value;
use webamon_core::{Plan, Result, SearchRequest};

/// The operations the CLI needs from the Webamon API.
///
/// [`WebamonClient`] is the real implementation; commands take
/// `&dyn ThreatIntelApi` so they can run against a fake in tests.
#[async_trait]
pub trait ThreatIntelApi: Send + Sync {
    /// Tier requests are made under
    fn plan(&self) -> Plan;

    /// Run a basic or Lucene search
    async fn run_search(&self, request: &SearchRequest) -> Result<Value>;

    /// Submit a URL for scanning
    async fn submit_scan(&self, url: &str) -> Result<Value>;

    /// Fetch the screenshot of a finished scan
    async fn fetch_screenshot(&self, report_id: &str) -> Result<Value>;
}

#[async_trait]
impl ThreatIntelApi for WebamonClient {
    fn plan(&self) -> Plan {
        Self::plan(self)
    }

    async fn run_search(&self, request: &SearchRequest) -> Result<Value> {
        self.search().send(request).await
    }

    async fn submit_scan(&self, url: &str) -> Result<Value> {
        self.scan().submit(url).await
    }

    async fn fetch_screenshot(&self, report_id: &str) -> Result<Value> {
        self.scan().screenshot(report_id).await
    }
}
