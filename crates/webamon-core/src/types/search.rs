use serde::{Deserialize, Serialize};

use crate::{Result, WebamonError};

/// Fields searched and returned when a basic search names none
pub const DEFAULT_SEARCH_FIELDS: &str = "page_title,domain,resolved_url,dom";

/// Index holding scan reports
pub const REPORTS_INDEX: &str = "scans";

/// Default number of results per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// What to search for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchQuery {
    /// Free-text search across a comma-separated list of fields
    Basic {
        /// Search term (IP, domain, URL, hash, ...)
        term: String,
        /// Fields to search within and return
        fields: String,
    },

    /// Lucene query against a named index
    Lucene {
        /// Lucene query string
        query: String,
        /// Index to search
        index: String,
        /// Fields to return (all when absent)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<String>,
    },
}

/// A search with paging parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The query
    pub query: SearchQuery,

    /// Number of results to return
    pub size: u32,

    /// Starting offset
    #[serde(default)]
    pub from: u32,
}

impl SearchRequest {
    /// Basic search over `fields`
    #[must_use]
    pub fn basic(term: impl Into<String>, fields: impl Into<String>) -> Self {
        Self::new(SearchQuery::Basic {
            term: term.into(),
            fields: fields.into(),
        })
    }

    /// Lucene search against `index`
    #[must_use]
    pub fn lucene(query: impl Into<String>, index: impl Into<String>) -> Self {
        Self::new(SearchQuery::Lucene {
            query: query.into(),
            index: index.into(),
            fields: None,
        })
    }

    /// Lookup of a single scan report by id
    #[must_use]
    pub fn report(report_id: &str) -> Self {
        Self::lucene(format!("report_id:\"{report_id}\""), REPORTS_INDEX).size(1)
    }

    const fn new(query: SearchQuery) -> Self {
        Self {
            query,
            size: DEFAULT_PAGE_SIZE,
            from: 0,
        }
    }

    /// Set the page size
    #[must_use]
    pub const fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the starting offset
    #[must_use]
    pub const fn from(mut self, from: u32) -> Self {
        self.from = from;
        self
    }

    /// Restrict returned fields (Lucene only; basic searches return their
    /// search fields)
    #[must_use]
    pub fn fields(mut self, fields: Option<String>) -> Self {
        if let SearchQuery::Lucene { fields: f, .. } = &mut self.query {
            *f = fields;
        }
        self
    }

    /// Check the request before it is sent
    pub fn validate(&self) -> Result<()> {
        match &self.query {
            SearchQuery::Basic { term, .. } if term.trim().is_empty() => Err(
                WebamonError::InvalidQuery("search term must not be empty".to_string()),
            ),
            SearchQuery::Lucene { query, .. } if query.trim().is_empty() => Err(
                WebamonError::InvalidQuery("Lucene query must not be empty".to_string()),
            ),
            SearchQuery::Lucene { index, .. } if index.trim().is_empty() => Err(
                WebamonError::InvalidQuery("--index is required when using --lucene".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// Query parameters for `GET /search`.
    ///
    /// `from` is only sent when `paginate` is set (pagination is a pro
    /// feature) and the offset is non-zero.
    #[must_use]
    pub fn params(&self, paginate: bool) -> Vec<(&'static str, String)> {
        let mut params = match &self.query {
            SearchQuery::Basic { term, fields } => vec![
                ("search", term.clone()),
                ("results", fields.clone()),
                ("size", self.size.to_string()),
            ],
            SearchQuery::Lucene {
                query,
                index,
                fields,
            } => {
                let mut params = vec![
                    ("lucene_query", query.clone()),
                    ("index", index.clone()),
                    ("size", self.size.to_string()),
                ];
                if let Some(fields) = fields {
                    params.push(("fields", fields.clone()));
                }
                params
            }
        };

        if paginate && self.from > 0 {
            params.push(("from", self.from.to_string()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_basic_params() {
        let request = SearchRequest::basic("example.com", DEFAULT_SEARCH_FIELDS)
            .size(20)
            .from(40);
        let params = request.params(true);
        assert_eq!(param(&params, "search"), Some("example.com"));
        assert_eq!(param(&params, "results"), Some(DEFAULT_SEARCH_FIELDS));
        assert_eq!(param(&params, "size"), Some("20"));
        assert_eq!(param(&params, "from"), Some("40"));
    }

    #[test]
    fn test_from_omitted_without_pagination() {
        let request = SearchRequest::basic("example.com", "domain.name").from(40);
        assert_eq!(param(&request.params(false), "from"), None);

        let request = SearchRequest::basic("example.com", "domain.name");
        assert_eq!(param(&request.params(true), "from"), None);
    }

    #[test]
    fn test_lucene_params_with_fields() {
        let request = SearchRequest::lucene("scan_status:success", "scans")
            .fields(Some("domain.name".to_string()));
        let params = request.params(true);
        assert_eq!(param(&params, "lucene_query"), Some("scan_status:success"));
        assert_eq!(param(&params, "index"), Some("scans"));
        assert_eq!(param(&params, "fields"), Some("domain.name"));
    }

    #[test]
    fn test_report_request() {
        let request = SearchRequest::report("bf18c02d");
        assert_eq!(request.size, 1);
        assert_eq!(
            request.query,
            SearchQuery::Lucene {
                query: "report_id:\"bf18c02d\"".to_string(),
                index: REPORTS_INDEX.to_string(),
                fields: None,
            }
        );
    }

    #[test]
    fn test_validate() {
        assert!(SearchRequest::basic("x", "domain").validate().is_ok());
        assert!(SearchRequest::basic("  ", "domain").validate().is_err());
        assert!(SearchRequest::lucene("a:b", "").validate().is_err());
    }
}
