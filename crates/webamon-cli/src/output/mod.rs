//! Output formatting for search results and command responses.

pub mod envelope;
pub mod export;
pub mod flatten;
pub mod format;
pub mod navigate;
pub mod results;
pub mod table;

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Readable tables with nested data simplified
    #[default]
    Table,
    /// Complete raw JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "pretty" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: table, json",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Pretty-print any serializable value
pub fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Print an error message line by line, styling lines that carry a URL
pub fn write_error(out: &mut impl Write, message: &str) -> io::Result<()> {
    let mut lines = message.lines();

    if let Some(first) = lines.next() {
        writeln!(out, "{} {}", "Error:".red().bold(), style_line(first))?;
    }
    for line in lines {
        writeln!(out, "{}", style_line(line))?;
    }

    Ok(())
}

fn style_line(line: &str) -> String {
    if line.contains("://") {
        line.blue().underline().to_string()
    } else {
        line.to_string()
    }
}

/// `1234567` as `1,234,567`
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}
