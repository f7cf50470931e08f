//! Locating the result list inside a search response.

use serde_json::Value;
use webamon_core::{PaginationState, Record};

/// Where the results of a response live
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseShape<'a> {
    /// The response is itself a list
    BareList(&'a [Value]),
    /// Mapping with a `results` key
    ResultsEnvelope(&'a Value),
    /// Mapping with a `data` key
    DataEnvelope(&'a Value),
    /// Mapping that only carries `total_hits`
    MetadataOnly,
    /// Anything else
    Opaque(&'a Value),
}

/// A response with its results and metadata located
#[derive(Debug, Clone, PartialEq)]
pub struct UnwrappedResponse<'a> {
    /// Where the results are
    pub shape: ResponseShape<'a>,
    /// Top-level `total_hits`
    pub total_hits: Option<u64>,
    /// Top-level `pagination`
    pub pagination: Option<PaginationState>,
}

/// Decide the shape of a response once.
///
/// `results` wins over `data`, which wins over `total_hits`. Metadata is
/// read from the top level whatever the shape.
#[must_use]
pub fn unwrap_response(response: &Value) -> UnwrappedResponse<'_> {
    let shape = match response {
        Value::Array(items) => ResponseShape::BareList(items),
        Value::Object(map) => {
            if let Some(results) = map.get("results") {
                ResponseShape::ResultsEnvelope(results)
            } else if let Some(data) = map.get("data") {
                ResponseShape::DataEnvelope(data)
            } else if map.contains_key("total_hits") {
                ResponseShape::MetadataOnly
            } else {
                ResponseShape::Opaque(response)
            }
        }
        other => ResponseShape::Opaque(other),
    };

    UnwrappedResponse {
        shape,
        total_hits: response.get("total_hits").and_then(Value::as_u64),
        pagination: response.get("pagination").and_then(PaginationState::from_value),
    }
}

impl<'a> UnwrappedResponse<'a> {
    /// The value the results were found in, if any
    #[must_use]
    pub fn result_value(&self) -> Option<&'a Value> {
        match self.shape {
            ResponseShape::ResultsEnvelope(v)
            | ResponseShape::DataEnvelope(v)
            | ResponseShape::Opaque(v) => Some(v),
            ResponseShape::BareList(_) | ResponseShape::MetadataOnly => None,
        }
    }

    /// Records, when the results are a list of mappings.
    ///
    /// `None` means the caller should show the raw response instead.
    #[must_use]
    pub fn records(&self) -> Option<Vec<Record>> {
        let items: &[Value] = match self.shape {
            ResponseShape::BareList(items) => items,
            ResponseShape::MetadataOnly => return None,
            _ => self.result_value()?.as_array()?,
        };

        items.iter().map(|item| item.as_object().cloned()).collect()
    }
}
