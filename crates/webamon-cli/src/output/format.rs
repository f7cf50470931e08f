//! Display formatting for single table cells.
//!
//! Formatting produces a [`FormattedValue`]: plain text plus typed spans
//! (search-match highlights, null/boolean markers, placeholders). A
//! [`SpanStyle`] then turns the spans into terminal colors, Markdown, or
//! nothing at all, so the same formatted cell can go to any output.
//!
//! Search hits arrive with matches wrapped in `<mark>...</mark>`. Truncation
//! is marker-aware and never leaves an opening marker unterminated.

use colored::Colorize;
use serde_json::Value;
use std::ops::Range;

use super::flatten::Cell;

/// Widest a cell may be before it is truncated
pub const MAX_CELL_WIDTH: usize = 50;

/// Opening search-match marker
pub const MARK_OPEN: &str = "<mark>";

/// Closing search-match marker
pub const MARK_CLOSE: &str = "</mark>";

const ELLIPSIS: &str = "...";

/// Characters that can belong to marker syntax; a cut never lands on one.
const TAG_CHARS: [char; 8] = ['<', '>', 'k', 'r', 'a', 'm', '/', ' '];

/// How far past the limit a cut may stretch to keep a highlight closed
const CLOSER_SLACK: usize = 10;

/// What a span of formatted text represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Text that matched the search
    Highlight,
    /// The null marker
    Null,
    /// Boolean true
    True,
    /// Boolean false
    False,
    /// A nested value that should have been flattened
    Complex,
    /// A summary such as "6 items"
    Placeholder,
}

/// A typed byte range of [`FormattedValue::text`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// What the range represents
    pub kind: SpanKind,
    /// Byte range into the text
    pub range: Range<usize>,
}

/// Display text with typed spans, independent of any output medium.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedValue {
    /// Text with all markup removed
    pub text: String,
    /// Non-overlapping spans in ascending order
    pub spans: Vec<Span>,
}

impl FormattedValue {
    /// Unstyled text
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    fn whole(text: impl Into<String>, kind: SpanKind) -> Self {
        let text = text.into();
        let range = 0..text.len();
        Self {
            text,
            spans: vec![Span { kind, range }],
        }
    }

    /// Texts covered by spans of `kind`
    #[cfg(test)]
    pub fn spans_of(&self, kind: SpanKind) -> impl Iterator<Item = &str> {
        self.spans
            .iter()
            .filter(move |s| s.kind == kind)
            .map(|s| &self.text[s.range.clone()])
    }

    /// Render with the given style
    #[must_use]
    pub fn render(&self, style: &dyn SpanStyle) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut pos = 0;

        for span in &self.spans {
            out.push_str(&self.text[pos..span.range.start]);
            out.push_str(&style.paint(span.kind, &self.text[span.range.clone()]));
            pos = span.range.end;
        }

        out.push_str(&self.text[pos..]);
        out
    }
}

/// Turns spans into a target medium's markup
pub trait SpanStyle {
    /// Markup for `text` covered by a span of `kind`
    fn paint(&self, kind: SpanKind, text: &str) -> String;
}

/// Terminal colors
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyle;

impl SpanStyle for AnsiStyle {
    fn paint(&self, kind: SpanKind, text: &str) -> String {
        match kind {
            SpanKind::Highlight => text.black().on_bright_yellow().to_string(),
            SpanKind::True => text.green().to_string(),
            SpanKind::False => text.red().to_string(),
            SpanKind::Null | SpanKind::Complex | SpanKind::Placeholder => {
                text.dimmed().to_string()
            }
        }
    }
}

/// No markup
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl SpanStyle for PlainStyle {
    fn paint(&self, _kind: SpanKind, text: &str) -> String {
        text.to_string()
    }
}

/// Markdown emphasis for highlights, plain text otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownStyle;

impl SpanStyle for MarkdownStyle {
    fn paint(&self, kind: SpanKind, text: &str) -> String {
        match kind {
            SpanKind::Highlight => format!("**{text}**"),
            _ => text.to_string(),
        }
    }
}

/// Format a raw value for a table cell.
///
/// Containers should have been flattened already; they show as
/// `<complex>` rather than failing.
#[must_use]
pub fn format_value(value: &Value) -> FormattedValue {
    match value {
        Value::Null => FormattedValue::whole("null", SpanKind::Null),
        Value::Bool(true) => FormattedValue::whole("true", SpanKind::True),
        Value::Bool(false) => FormattedValue::whole("false", SpanKind::False),
        Value::Array(_) | Value::Object(_) => FormattedValue::whole("<complex>", SpanKind::Complex),
        Value::String(s) => highlight(&truncate(s, MAX_CELL_WIDTH)),
        Value::Number(n) => FormattedValue::plain(clip(&n.to_string(), MAX_CELL_WIDTH)),
    }
}

/// Format a projected cell
#[must_use]
pub fn format_cell(cell: &Cell) -> FormattedValue {
    match cell {
        Cell::Value(value) => format_value(value),
        Cell::Text(text) => highlight(&truncate(text, MAX_CELL_WIDTH)),
        Cell::Count(n) => FormattedValue::whole(format!("{n} items"), SpanKind::Placeholder),
    }
}

/// Cut to `max` characters, the last three being `...`
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(ELLIPSIS.len())).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Truncate to about `max` characters without breaking `<mark>` markup.
///
/// Text without markers is cut to `max - 3` characters plus `...`. With
/// markers the cut backs off marker syntax, may stretch up to
/// `max + 10` characters to include a pending `</mark>`, and any highlight
/// still open is closed before the ellipsis.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max {
        return text.to_string();
    }

    if !text.contains(MARK_OPEN) {
        return clip(text, max);
    }

    let mut cut = max.saturating_sub(ELLIPSIS.len());
    while cut > 0 && TAG_CHARS.contains(&chars[cut]) {
        cut -= 1;
    }

    let mut prefix: String = chars[..cut].iter().collect();

    // Never end on a partial tag such as "<ma" or "</mar"
    if let Some(lt) = prefix.rfind('<') {
        let tail = &prefix[lt..];
        if tail != MARK_OPEN && tail != MARK_CLOSE
            && (MARK_OPEN.starts_with(tail) || MARK_CLOSE.starts_with(tail))
        {
            prefix.truncate(lt);
            cut = prefix.chars().count();
        }
    }

    if open_marks(&prefix) > 0 {
        let rest_start = text.char_indices().nth(cut).map_or(text.len(), |(i, _)| i);
        if let Some(rel) = text[rest_start..].find(MARK_CLOSE) {
            let close_at = cut + text[rest_start..rest_start + rel].chars().count();
            if close_at < max + CLOSER_SLACK {
                prefix = chars[..close_at + MARK_CLOSE.len()].iter().collect();
            }
        }
    }

    for _ in 0..open_marks(&prefix) {
        prefix.push_str(MARK_CLOSE);
    }

    prefix.push_str(ELLIPSIS);
    prefix
}

/// Openers without a matching closer
fn open_marks(text: &str) -> usize {
    text.matches(MARK_OPEN)
        .count()
        .saturating_sub(text.matches(MARK_CLOSE).count())
}

/// Strip `<mark>` markup, recording the enclosed ranges as highlights.
///
/// Stray closers are dropped; an opener that is never closed highlights to
/// the end of the text.
#[must_use]
pub fn highlight(text: &str) -> FormattedValue {
    let mut out = String::with_capacity(text.len());
    let mut spans = Vec::new();
    let mut open_at: Option<usize> = None;
    let mut rest = text;

    loop {
        let (idx, opening) = match (rest.find(MARK_OPEN), rest.find(MARK_CLOSE)) {
            (Some(o), Some(c)) if o < c => (o, true),
            (_, Some(c)) => (c, false),
            (Some(o), None) => (o, true),
            (None, None) => break,
        };

        out.push_str(&rest[..idx]);
        if opening {
            open_at.get_or_insert(out.len());
            rest = &rest[idx + MARK_OPEN.len()..];
        } else {
            if let Some(start) = open_at.take() {
                push_highlight(&mut spans, start, out.len());
            }
            rest = &rest[idx + MARK_CLOSE.len()..];
        }
    }

    out.push_str(rest);
    if let Some(start) = open_at {
        push_highlight(&mut spans, start, out.len());
    }

    FormattedValue { text: out, spans }
}

fn push_highlight(spans: &mut Vec<Span>, start: usize, end: usize) {
    if start < end {
        spans.push(Span {
            kind: SpanKind::Highlight,
            range: start..end,
        });
    }
}
