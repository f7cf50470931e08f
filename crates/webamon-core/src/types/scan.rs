use base64::{engine::general_purpose::STANDARD as B64, Engine};
use serde_json::Value;

use crate::{Result, WebamonError};

/// Extract the report identifier from a scan submission response.
///
/// Servers have used both `report_id` and `id`; `report_id` wins unless it
/// is empty or zero. Numeric identifiers are returned as text.
#[must_use]
pub fn report_id(response: &Value) -> Option<String> {
    let object = response.as_object()?;
    ["report_id", "id"]
        .iter()
        .filter_map(|key| object.get(*key))
        .find_map(id_text)
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f.abs() > 0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Base64 screenshot carried by a screenshot response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot<'a> {
    data: &'a str,
}

impl<'a> Screenshot<'a> {
    /// Locate the screenshot at `report.screenshot`
    #[must_use]
    pub fn from_response(response: &'a Value) -> Option<Self> {
        response
            .get("report")?
            .get("screenshot")?
            .as_str()
            .map(|data| Self { data })
    }

    /// Whether the response had a `report` object at all
    #[must_use]
    pub fn has_report(response: &Value) -> bool {
        response.get("report").is_some_and(Value::is_object)
    }

    /// Length of the encoded payload in characters
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.data.chars().count()
    }

    /// The base64 body without any `data:image/...;base64,` header
    #[must_use]
    pub fn payload(&self) -> &'a str {
        if self.data.starts_with("data:image") {
            self.data
                .split_once(',')
                .map_or(self.data, |(_, body)| body)
        } else {
            self.data
        }
    }

    /// Decode the image bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        B64.decode(self.payload().trim())
            .map_err(|e| WebamonError::InvalidScreenshot(e.to_string()))
    }
}
