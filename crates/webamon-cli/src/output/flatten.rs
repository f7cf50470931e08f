//! Flattening nested search records into table rows.
//!
//! The first record decides the schema. Small mappings and short scalar
//! lists are collapsed into a single cell; anything larger is left out of
//! the table and reported as omitted.

use serde_json::Value;
use webamon_core::Record;

/// Mappings with more keys than this are omitted
const SMALL_DICT_MAX_KEYS: usize = 3;

/// Lists with more items than this are omitted
const SIMPLE_LIST_MAX_ITEMS: usize = 5;

/// Mappings up to this size are rendered inline
const INLINE_DICT_MAX: usize = 2;

/// Lists up to this size are rendered inline
const INLINE_LIST_MAX: usize = 3;

/// Width of an inline rendering before it is clipped
const INLINE_WIDTH: usize = 50;

/// How a field of the first record is shown in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Scalar or empty container, shown as-is
    Simple,
    /// Non-empty mapping with few keys
    SmallDict,
    /// Short non-empty list of scalars
    SimpleList,
    /// Too large or too nested for a cell
    Omit,
}

/// One projected table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Raw value, formatted later
    Value(Value),
    /// Inline rendering of a small container
    Text(String),
    /// Element count of a container too big to inline
    Count(usize),
}

/// Records projected onto table columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedBatch {
    /// Column names in display order
    pub columns: Vec<String>,
    /// One row per record, aligned with `columns`
    pub rows: Vec<Vec<Cell>>,
}

impl ProjectedBatch {
    /// Whether there is nothing to show
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Names of fields left out of the table, in first-record order
pub type OmittedFields = Vec<String>;

fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Classify one value
#[must_use]
pub fn classify_value(value: &Value) -> FieldKind {
    match value {
        Value::Object(map) if map.is_empty() => FieldKind::Simple,
        Value::Object(map) if map.len() <= SMALL_DICT_MAX_KEYS => FieldKind::SmallDict,
        Value::Object(_) => FieldKind::Omit,
        Value::Array(items) if items.is_empty() => FieldKind::Simple,
        Value::Array(items)
            if items.len() <= SIMPLE_LIST_MAX_ITEMS && items.iter().all(is_primitive) =>
        {
            FieldKind::SimpleList
        }
        Value::Array(_) => FieldKind::Omit,
        _ => FieldKind::Simple,
    }
}

/// Classify every field of a record, in record order
#[must_use]
pub fn classify(record: &Record) -> Vec<(String, FieldKind)> {
    record
        .iter()
        .map(|(name, value)| (name.clone(), classify_value(value)))
        .collect()
}

/// Project a batch onto table columns.
///
/// Simple fields come first, then collapsed containers, each group in
/// first-record order. Later records are projected with the first
/// record's classification.
#[must_use]
pub fn process(batch: &[Record]) -> (ProjectedBatch, OmittedFields) {
    let Some(first) = batch.first() else {
        return (ProjectedBatch::default(), Vec::new());
    };

    let classified = classify(first);

    let mut omitted = Vec::new();
    let mut simple = Vec::new();
    let mut complex = Vec::new();
    for (name, kind) in classified {
        match kind {
            FieldKind::Simple => simple.push((name, kind)),
            FieldKind::SmallDict | FieldKind::SimpleList => complex.push((name, kind)),
            FieldKind::Omit => omitted.push(name),
        }
    }

    let layout: Vec<(String, FieldKind)> = simple.into_iter().chain(complex).collect();

    let rows = batch
        .iter()
        .map(|record| {
            layout
                .iter()
                .map(|(name, kind)| project(record.get(name), *kind))
                .collect()
        })
        .collect();

    let columns = layout.into_iter().map(|(name, _)| name).collect();

    (ProjectedBatch { columns, rows }, omitted)
}

/// Project a single value as a column of `kind` would show it
#[must_use]
pub fn project_value(value: &Value, kind: FieldKind) -> Cell {
    project(Some(value), kind)
}

fn project(value: Option<&Value>, kind: FieldKind) -> Cell {
    match (kind, value) {
        (FieldKind::SmallDict, Some(Value::Object(map))) => {
            if map.len() <= INLINE_DICT_MAX {
                let text = map
                    .iter()
                    .map(|(k, v)| format!("{k}:{}", stringify(v)))
                    .collect::<Vec<_>>()
                    .join(", ");
                Cell::Text(clip_inline(text))
            } else {
                Cell::Count(map.len())
            }
        }
        (FieldKind::SimpleList, Some(Value::Array(items))) => {
            if items.len() <= INLINE_LIST_MAX {
                let text = items.iter().map(stringify).collect::<Vec<_>>().join(", ");
                Cell::Text(clip_inline(text))
            } else {
                Cell::Count(items.len())
            }
        }
        (_, Some(value)) => Cell::Value(value.clone()),
        (_, None) => Cell::Value(Value::Null),
    }
}

/// Strings unquoted, everything else as compact JSON
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn clip_inline(text: String) -> String {
    if text.chars().count() <= INLINE_WIDTH {
        return text;
    }
    let mut clipped: String = text.chars().take(INLINE_WIDTH).collect();
    clipped.push_str("...");
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_classify_values() {
        assert_eq!(classify_value(&json!("x")), FieldKind::Simple);
        assert_eq!(classify_value(&json!(null)), FieldKind::Simple);
        assert_eq!(classify_value(&json!({})), FieldKind::Simple);
        assert_eq!(classify_value(&json!([])), FieldKind::Simple);
        assert_eq!(classify_value(&json!({"a": 1, "b": 2, "c": 3})), FieldKind::SmallDict);
        assert_eq!(classify_value(&json!({"a": 1, "b": 2, "c": 3, "d": 4})), FieldKind::Omit);
        assert_eq!(classify_value(&json!([1, "two", true])), FieldKind::SimpleList);
        assert_eq!(classify_value(&json!([1, 2, 3, 4, 5, 6])), FieldKind::Omit);
        assert_eq!(classify_value(&json!([{"a": 1}])), FieldKind::Omit);
        assert_eq!(classify_value(&json!([null])), FieldKind::Omit);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let r = record(json!({"a": 1, "b": {"x": 1}, "c": [1, 2], "d": [[1]]}));
        assert_eq!(classify(&r), classify(&r));
    }

    #[test]
    fn test_empty_batch() {
        let (batch, omitted) = process(&[]);
        assert!(batch.columns.is_empty());
        assert!(batch.is_empty());
        assert!(omitted.is_empty());
    }

    #[test]
    fn test_column_order_simple_first() {
        let r = record(json!({
            "geo": {"country": "NL"},
            "domain": "example.com",
            "ports": [80, 443],
            "ip": "192.0.2.1"
        }));
        let (batch, omitted) = process(&[r]);
        assert_eq!(batch.columns, vec!["domain", "ip", "geo", "ports"]);
        assert!(omitted.is_empty());
        assert_eq!(batch.rows[0][2], Cell::Text("country:NL".to_string()));
        assert_eq!(batch.rows[0][3], Cell::Text("80, 443".to_string()));
    }

    #[test]
    fn test_counts_for_larger_containers() {
        let r = record(json!({
            "headers": {"a": 1, "b": 2, "c": 3},
            "tags": ["a", "b", "c", "d"]
        }));
        let (batch, _) = process(&[r]);
        assert_eq!(batch.rows[0], vec![Cell::Count(3), Cell::Count(4)]);
    }

    #[test]
    fn test_omitted_fields_listed_once() {
        let records = vec![
            record(json!({"id": 1, "tags": [1, 2, 3, 4, 5, 6], "dom": {"a":1,"b":2,"c":3,"d":4}})),
            record(json!({"id": 2, "tags": [1, 2, 3, 4, 5, 6], "dom": {"a":1,"b":2,"c":3,"d":4}})),
        ];
        let (batch, omitted) = process(&records);
        assert_eq!(omitted, vec!["tags", "dom"]);
        assert_eq!(batch.columns, vec!["id"]);
        assert_eq!(batch.rows.len(), 2);
    }

    #[test]
    fn test_later_records_use_first_schema() {
        let records = vec![
            record(json!({"geo": {"country": "NL"}})),
            record(json!({"geo": "unknown"})),
            record(json!({"other": 1})),
            record(json!({"geo": [1, 2]})),
        ];
        let (batch, _) = process(&records);
        assert_eq!(batch.columns, vec!["geo"]);
        assert_eq!(batch.rows[1][0], Cell::Value(json!("unknown")));
        assert_eq!(batch.rows[2][0], Cell::Value(Value::Null));
        assert_eq!(batch.rows[3][0], Cell::Value(json!([1, 2])));
    }

    #[test]
    fn test_inline_rendering_is_clipped() {
        let long = "v".repeat(80);
        let r = record(json!({"meta": {"k": long}}));
        let (batch, _) = process(&[r]);
        match &batch.rows[0][0] {
            Cell::Text(text) => {
                assert_eq!(text.chars().count(), 53);
                assert!(text.ends_with("..."));
            }
            other => panic!("unexpected cell {other:?}"),
        }
    }

    #[test]
    fn test_inline_values_non_string_as_json() {
        let r = record(json!({"meta": {"n": 1, "ok": true}}));
        let (batch, _) = process(&[r]);
        assert_eq!(batch.rows[0][0], Cell::Text("n:1, ok:true".to_string()));
    }
}
