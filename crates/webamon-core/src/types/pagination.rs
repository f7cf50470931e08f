use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single search hit: field name to loosely-typed value, in server order.
pub type Record = serde_json::Map<String, Value>;

/// Pagination metadata attached to an enveloped search response.
///
/// Every field is optional: an absent field means the server did not offer
/// it, which is different from zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Total number of matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    /// Offset of this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,

    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Whether another page follows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,

    /// Offset of the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_from: Option<u64>,

    /// Offset of the previous page (servers may send negative values on the
    /// first page)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_from: Option<i64>,
}

impl PaginationState {
    /// Read pagination metadata field by field.
    ///
    /// Returns `None` when `value` is not an object. Fields with an
    /// unexpected type are treated as absent rather than failing the whole
    /// block.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let uint = |key: &str| object.get(key).and_then(Value::as_u64);

        Some(Self {
            total: uint("total"),
            from: uint("from"),
            size: uint("size"),
            has_more: object.get("has_more").and_then(Value::as_bool),
            next_from: uint("next_from"),
            prev_from: object.get("prev_from").and_then(Value::as_i64),
        })
    }

    /// Whether the server says another page follows
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more.unwrap_or(false)
    }
}
