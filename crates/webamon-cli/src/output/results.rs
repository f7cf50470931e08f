//! Search result pages: title, table, notes, summary and navigation.

use colored::Colorize;
use std::io::{self, Write};
use webamon_core::{PaginationState, Record};

use super::flatten;
use super::format::SpanStyle;
use super::group_thousands;
use super::navigate::{commands, CommandTemplate};
use super::table::render_batch;

/// One page of search results
#[derive(Debug, Clone)]
pub struct SearchPage<'a> {
    /// What was searched for
    pub term: &'a str,
    /// Records on this page
    pub records: &'a [Record],
    /// Top-level `total_hits`
    pub total_hits: Option<u64>,
    /// Server pagination block
    pub pagination: Option<&'a PaginationState>,
    /// Offset that was requested
    pub requested_from: u64,
}

impl SearchPage<'_> {
    fn total(&self) -> Option<u64> {
        self.pagination
            .and_then(|p| p.total)
            .or(self.total_hits)
            .filter(|&t| t > 0)
    }

    fn from(&self) -> u64 {
        self.pagination
            .and_then(|p| p.from)
            .unwrap_or(self.requested_from)
    }

    /// Title line, with totals when the server sent them
    #[must_use]
    pub fn title(&self) -> String {
        let mut title = format!("Search Results for '{}'", self.term);

        if self.pagination.is_some() {
            if let Some(total) = self.total() {
                title.push_str(&format!(
                    " ({} total, from {})",
                    group_thousands(total),
                    group_thousands(self.from())
                ));
            }
        } else if let Some(hits) = self.total_hits {
            title.push_str(&format!(" ({} total matches)", group_thousands(hits)));
        }

        title
    }

    /// "Showing N results ..." line
    #[must_use]
    pub fn summary(&self) -> String {
        let shown = self.records.len();
        let mut summary = format!("Showing {shown} results");

        if self.pagination.is_some() {
            if let Some(total) = self.total() {
                summary.push_str(&format!(" of {} total", group_thousands(total)));
            }
            summary.push_str(&format!(" (from position {})", group_thousands(self.from())));
        } else if let Some(hits) = self.total_hits.filter(|&h| h != shown as u64) {
            summary.push_str(&format!(" of {} total matches", group_thousands(hits)));
        }

        summary
    }
}

/// Write a full results page
pub fn render_page(
    out: &mut impl Write,
    page: &SearchPage<'_>,
    template: &CommandTemplate,
    show_tips: bool,
    style: &dyn SpanStyle,
) -> io::Result<()> {
    writeln!(out, "{}", page.title().bold())?;

    let (batch, omitted) = flatten::process(page.records);
    if !batch.columns.is_empty() {
        render_batch(out, &batch, style)?;
    }

    if !omitted.is_empty() {
        writeln!(
            out,
            "{} Complex fields omitted from table view: {}",
            "Note:".yellow(),
            omitted.join(", ")
        )?;
        if show_tips {
            writeln!(out, "{}", "Use -o json to see all fields".dimmed())?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", page.summary().dimmed())?;

    if let Some(pagination) = page.pagination {
        let hints = commands(template, pagination);
        if !hints.is_empty() {
            writeln!(out, "{}", "Navigation:".dimmed())?;
            for hint in hints {
                writeln!(out, "  {}", hint.to_string().dimmed())?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::format::PlainStyle;
    use serde_json::{json, Value};

    fn records(value: Value) -> Vec<Record> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    fn render(page: &SearchPage<'_>) -> String {
        colored::control::set_override(false);
        let template = CommandTemplate::new(page.term, 10);
        let mut out = Vec::new();
        render_page(&mut out, page, &template, true, &PlainStyle).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_titles() {
        let pagination = PaginationState {
            total: Some(1234),
            from: Some(20),
            ..Default::default()
        };
        let page = SearchPage {
            term: "example.com",
            records: &[],
            total_hits: None,
            pagination: Some(&pagination),
            requested_from: 0,
        };
        assert_eq!(page.title(), "Search Results for 'example.com' (1,234 total, from 20)");

        let page = SearchPage {
            pagination: None,
            total_hits: Some(5000),
            ..page
        };
        assert_eq!(page.title(), "Search Results for 'example.com' (5,000 total matches)");
    }

    #[test]
    fn test_summary_without_pagination() {
        let batch = records(json!([{"a": 1}, {"a": 2}]));
        let page = SearchPage {
            term: "x",
            records: &batch,
            total_hits: Some(2),
            pagination: None,
            requested_from: 0,
        };
        assert_eq!(page.summary(), "Showing 2 results");

        let page = SearchPage {
            total_hits: Some(40),
            ..page
        };
        assert_eq!(page.summary(), "Showing 2 results of 40 total matches");
    }

    #[test]
    fn test_highlighted_end_to_end() {
        let batch = records(json!([{
            "title": "<mark>Example</mark> Corp",
            "tags": ["a", "b", "c", "d", "e", "f"]
        }]));
        let page = SearchPage {
            term: "example",
            records: &batch,
            total_hits: Some(1),
            pagination: None,
            requested_from: 0,
        };
        let text = render(&page);
        assert!(text.contains("Example Corp"));
        assert!(!text.contains("<mark>"));
        assert!(text.contains("Complex fields omitted from table view: tags"));
        assert!(!text.contains("Tags"));
    }

    #[test]
    fn test_navigation_hints_printed() {
        let batch = records(json!([{"domain": "example.com"}]));
        let pagination = PaginationState {
            total: Some(30),
            from: Some(10),
            size: Some(10),
            has_more: Some(true),
            prev_from: Some(0),
            ..Default::default()
        };
        let page = SearchPage {
            term: "example.com",
            records: &batch,
            total_hits: None,
            pagination: Some(&pagination),
            requested_from: 10,
        };
        let text = render(&page);
        assert!(text.contains("Showing 1 results of 30 total (from position 10)"));
        assert!(text.contains("Previous: webamon search 'example.com' --from 0 --size 10"));
        assert!(text.contains("Next: webamon search 'example.com' --from 20 --size 10"));
    }
}
