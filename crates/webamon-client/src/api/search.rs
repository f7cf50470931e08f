//! Search API endpoints.

use crate::WebamonClient;
use serde_json::Value;
use webamon_core::{Result, SearchRequest};

/// Search API endpoints.
///
/// Basic and Lucene searches share `GET /search`; only the parameters differ.
pub struct SearchApi<'a> {
    client: &'a WebamonClient,
}

impl<'a> SearchApi<'a> {
    pub(crate) const fn new(client: &'a WebamonClient) -> Self {
        Self { client }
    }

    /// Free-text search within a comma-separated list of fields
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let hits = client.search().basic("example.com", "domain.name").size(20).send().await?;
    /// ```
    #[must_use]
    pub fn basic(&self, term: impl Into<String>, fields: impl Into<String>) -> SearchRequestBuilder<'a> {
        SearchRequestBuilder::new(self.client, SearchRequest::basic(term, fields))
    }

    /// Lucene query against an index
    #[must_use]
    pub fn lucene(&self, query: impl Into<String>, index: impl Into<String>) -> SearchRequestBuilder<'a> {
        SearchRequestBuilder::new(self.client, SearchRequest::lucene(query, index))
    }

    /// Look up one scan report by id
    pub async fn report(&self, report_id: &str) -> Result<Value> {
        self.send(&SearchRequest::report(report_id)).await
    }

    /// Execute a prepared request.
    ///
    /// The offset is dropped on the free tier, which does not paginate.
    pub async fn send(&self, request: &SearchRequest) -> Result<Value> {
        request.validate()?;
        let params = request.params(self.client.has_api_key());
        self.client.get_with_query("/search", &params).await
    }
}

/// Builder for search requests
pub struct SearchRequestBuilder<'a> {
    client: &'a WebamonClient,
    request: SearchRequest,
}

impl<'a> SearchRequestBuilder<'a> {
    const fn new(client: &'a WebamonClient, request: SearchRequest) -> Self {
        Self { client, request }
    }

    /// Number of results to return
    #[must_use]
    pub const fn size(mut self, size: u32) -> Self {
        self.request.size = size;
        self
    }

    /// Starting offset (pro only)
    #[must_use]
    pub const fn from(mut self, from: u32) -> Self {
        self.request.from = from;
        self
    }

    /// Fields to return (Lucene only)
    #[must_use]
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.request = self.request.fields(Some(fields.into()));
        self
    }

    /// The request as built so far
    #[must_use]
    pub const fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Execute the search
    pub async fn send(self) -> Result<Value> {
        SearchApi::new(self.client).send(&self.request).await
    }
}
