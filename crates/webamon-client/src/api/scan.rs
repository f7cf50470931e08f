//! Scan and screenshot endpoints.

use crate::WebamonClient;
use serde_json::Value;
use webamon_core::{Result, WebamonError};

/// Scan API endpoints
pub struct ScanApi<'a> {
    client: &'a WebamonClient,
}

impl<'a> ScanApi<'a> {
    pub(crate) const fn new(client: &'a WebamonClient) -> Self {
        Self { client }
    }

    /// Submit a domain or URL for scanning.
    ///
    /// The response normally carries a `report_id` for later lookups.
    pub async fn submit(&self, url: &str) -> Result<Value> {
        let url = url.trim();
        if url.is_empty() {
            return Err(WebamonError::InvalidQuery(
                "a URL or domain to scan is required".to_string(),
            ));
        }

        self.client
            .get_with_query("/scan", &[("submission_url", url.to_string())])
            .await
    }

    /// Get the screenshot captured for a report
    pub async fn screenshot(&self, report_id: &str) -> Result<Value> {
        self.client
            .get_with_query("/screenshot", &[("report_id", report_id.to_string())])
            .await
    }
}
