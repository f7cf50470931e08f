//! Rebuilding search commands for the previous and next pages.

use std::fmt;
use webamon_core::PaginationState;

use super::export::ExportFormat;
use super::OutputFormat;

/// Which way a hint pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Earlier results
    Previous,
    /// Later results
    Next,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Previous => write!(f, "Previous"),
            Self::Next => write!(f, "Next"),
        }
    }
}

/// A ready-to-run command for another page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHint {
    /// Which way the command pages
    pub direction: Direction,
    /// Offset the command requests
    pub from: u64,
    /// Page size the command requests
    pub size: u64,
    /// Full command line
    pub command: String,
}

impl fmt::Display for NavigationHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.direction, self.command)
    }
}

/// Everything needed to repeat a search with a different offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    /// Binary name
    pub program: String,
    /// Search term or Lucene query
    pub term: String,
    /// Positional fields, only when given explicitly
    pub search_fields: Option<String>,
    /// Lucene index; `Some` means the search was a Lucene query
    pub lucene_index: Option<String>,
    /// `--fields` filter
    pub return_fields: Option<String>,
    /// Output format in effect
    pub output: OutputFormat,
    /// Format the command falls back to without `-o`
    pub default_output: OutputFormat,
    /// Export format and file name
    pub export: Option<(ExportFormat, String)>,
    /// Page size used when the server does not report one
    pub default_size: u64,
}

impl CommandTemplate {
    /// Template for a basic search
    #[must_use]
    pub fn new(term: impl Into<String>, default_size: u64) -> Self {
        Self {
            program: "webamon".to_string(),
            term: term.into(),
            search_fields: None,
            lucene_index: None,
            return_fields: None,
            output: OutputFormat::Table,
            default_output: OutputFormat::Table,
            export: None,
            default_size,
        }
    }

    /// The command line for one page
    #[must_use]
    pub fn render(&self, from: u64, size: u64) -> String {
        let mut parts = vec![self.program.clone(), "search".to_string(), quote_term(&self.term)];

        if let Some(fields) = &self.search_fields {
            parts.push(quote_arg(fields));
        }
        if let Some(index) = &self.lucene_index {
            parts.push("--lucene".to_string());
            parts.push("--index".to_string());
            parts.push(quote_arg(index));
        }
        if let Some(fields) = &self.return_fields {
            parts.push("--fields".to_string());
            parts.push(quote_arg(fields));
        }
        if self.output != self.default_output {
            parts.push("-o".to_string());
            parts.push(self.output.to_string());
        }
        if let Some((format, file)) = &self.export {
            parts.push("--export".to_string());
            parts.push(format.to_string());
            parts.push("--export-file".to_string());
            parts.push(quote_arg(file));
        }

        parts.push("--from".to_string());
        parts.push(from.to_string());
        parts.push("--size".to_string());
        parts.push(size.to_string());

        parts.join(" ")
    }
}

/// Navigation hints for a page, previous before next.
///
/// Without a server-supplied `next_from` the next offset is `from + size`,
/// which assumes the server pages in multiples of `size`.
#[must_use]
pub fn commands(template: &CommandTemplate, pagination: &PaginationState) -> Vec<NavigationHint> {
    let size = pagination.size.unwrap_or(template.default_size);
    let mut hints = Vec::new();

    if let Some(prev) = pagination.prev_from.and_then(|p| u64::try_from(p).ok()) {
        hints.push(hint(template, Direction::Previous, prev, size));
    }

    if pagination.has_more() {
        let next = pagination
            .next_from
            .or_else(|| pagination.from.map(|from| from.saturating_add(size)));
        if let Some(next) = next {
            hints.push(hint(template, Direction::Next, next, size));
        }
    }

    hints
}

fn hint(template: &CommandTemplate, direction: Direction, from: u64, size: u64) -> NavigationHint {
    NavigationHint {
        direction,
        from,
        size,
        command: template.render(from, size),
    }
}

/// Shell single quotes, always
fn quote_term(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

/// Shell single quotes, only when the argument needs them
fn quote_arg(text: &str) -> String {
    let safe = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-.,:/=@+%".contains(c));
    if safe {
        text.to_string()
    } else {
        quote_term(text)
    }
}
