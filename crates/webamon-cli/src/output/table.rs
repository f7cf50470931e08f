//! Terminal tables.

use std::io::{self, Write};
use tabled::{builder::Builder, settings::Style};

use super::flatten::ProjectedBatch;
use super::format::{format_cell, FormattedValue, SpanStyle};

/// Column header for a field name: underscores become spaces and each word
/// is capitalised, so `resolved_url` reads `Resolved Url`.
#[must_use]
pub fn title_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut boundary = true;

    for c in field.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(c);
            boundary = true;
        }
    }

    out
}

/// Write a projected batch as a rounded table
pub fn render_batch(
    out: &mut impl Write,
    batch: &ProjectedBatch,
    style: &dyn SpanStyle,
) -> io::Result<()> {
    let mut builder = Builder::default();
    builder.push_record(batch.columns.iter().map(|c| title_case(c)));

    for row in &batch.rows {
        builder.push_record(row.iter().map(|cell| format_cell(cell).render(style)));
    }

    writeln!(out, "{}", builder.build().with(Style::rounded()))
}

/// Write two-column rows under the given headers
pub fn render_key_values(
    out: &mut impl Write,
    headers: [&str; 2],
    rows: &[(String, FormattedValue)],
    style: &dyn SpanStyle,
) -> io::Result<()> {
    let mut builder = Builder::default();
    builder.push_record(headers);

    for (key, value) in rows {
        builder.push_record([key.clone(), value.render(style)]);
    }

    writeln!(out, "{}", builder.build().with(Style::rounded()))
}
