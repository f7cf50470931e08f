//! # webamon-cli
//!
//! Command-line interface for the Webamon threat intelligence search API.
//!
//! ## Features
//!
//! - **Search**: basic and Lucene queries with highlighted, flattened tables
//! - **Pagination**: ready-to-run previous/next commands (pro tier)
//! - **Export**: JSON, CSV and Markdown files
//! - **Scans**: submit URLs, fetch reports and screenshots

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
