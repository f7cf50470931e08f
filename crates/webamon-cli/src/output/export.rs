//! Writing search records to JSON, CSV or Markdown files.

use clap::ValueEnum;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use webamon_core::Record;

use super::flatten::{self, FieldKind};
use super::format::{format_cell, MarkdownStyle};

/// Export file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed JSON array of raw records
    Json,
    /// One row per record, nested values as JSON text
    Csv,
    /// Markdown table
    Table,
}

impl ExportFormat {
    /// File extension the format enforces
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Table => "md",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Table => write!(f, "table"),
        }
    }
}

/// Export failures
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// What was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of records written
    pub records: usize,
    /// File written, with its extension enforced
    pub path: PathBuf,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exported {} records to {}", self.records, self.path.display())
    }
}

/// Append the format's extension unless `target` already ends with it
#[must_use]
pub fn ensure_extension(target: &str, format: ExportFormat) -> PathBuf {
    let suffix = format!(".{}", format.extension());
    if target.to_lowercase().ends_with(&suffix) {
        PathBuf::from(target)
    } else {
        PathBuf::from(format!("{target}{suffix}"))
    }
}

/// Write `records` to `target` in `format`.
///
/// A failed write may leave a partial file behind.
pub fn export(
    records: &[Record],
    target: &str,
    format: ExportFormat,
    title: &str,
) -> Result<ExportSummary, ExportError> {
    let path = ensure_extension(target, format);

    match format {
        ExportFormat::Json => write_json(records, &path)?,
        ExportFormat::Csv => write_csv(records, &path)?,
        ExportFormat::Table => {
            let markdown = render_markdown(records, title);
            std::fs::write(&path, markdown).map_err(|source| io_error(&path, source))?;
        }
    }

    Ok(ExportSummary {
        records: records.len(),
        path,
    })
}

fn io_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn write_json(records: &[Record], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|source| io_error(path, source))
}

fn write_csv(records: &[Record], path: &Path) -> Result<(), ExportError> {
    let header = union_fields(records);
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(&header)?;
    for record in records {
        writer.write_record(header.iter().map(|field| csv_cell(record.get(field))))?;
    }

    writer.flush().map_err(|source| io_error(path, source))
}

/// Sorted union of field names across all records
#[must_use]
pub fn union_fields(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .flat_map(|record| record.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn csv_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Markdown document with a title and one table row per record.
///
/// Columns are the sorted union of fields across the batch. Fields of the
/// first record keep its classification and omitted ones are left out;
/// fields it lacks are shown as-is. A field a record does not have is an
/// empty cell.
#[must_use]
pub fn render_markdown(records: &[Record], title: &str) -> String {
    let mut out = format!("# {title}\n\n");

    let columns = markdown_columns(records);
    if columns.is_empty() {
        out.push_str("No records.\n");
        return out;
    }

    let headers: Vec<String> = columns.iter().map(|(name, _)| escape_markdown(name)).collect();
    out.push_str(&format!("| {} |\n", headers.join(" | ")));
    out.push_str(&format!("|{}\n", " --- |".repeat(headers.len())));

    for record in records {
        let cells: Vec<String> = columns
            .iter()
            .map(|(name, kind)| {
                record.get(name).map_or_else(String::new, |value| {
                    let cell = flatten::project_value(value, *kind);
                    escape_markdown(&format_cell(&cell).render(&MarkdownStyle))
                })
            })
            .collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    out
}

fn markdown_columns(records: &[Record]) -> Vec<(String, FieldKind)> {
    let Some(first) = records.first() else {
        return Vec::new();
    };
    let kinds: HashMap<String, FieldKind> = flatten::classify(first).into_iter().collect();

    union_fields(records)
        .into_iter()
        .filter_map(|name| {
            let kind = kinds.get(&name).copied().unwrap_or(FieldKind::Simple);
            (kind != FieldKind::Omit).then_some((name, kind))
        })
        .collect()
}

fn escape_markdown(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}
