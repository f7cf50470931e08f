//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use webamon_core::DEFAULT_PAGE_SIZE;

use crate::output::export::ExportFormat;
use crate::output::OutputFormat;

/// Default export file name, before its extension is added
pub const DEFAULT_EXPORT_FILE: &str = "webamon_results";

const SEARCH_EXAMPLES: &str = "\
Search matches are highlighted in table view. Nested data is simplified
there; use -o json for the complete records.

Examples:
  webamon search example.com
  webamon search example.com domain.name,resolved_url --size 20
  webamon search 'domain.name:\"bank*\" AND scan_status:success' --lucene --index scans
  webamon search example.com --from 10 --size 25 --export csv";

/// Command-line client for the Webamon threat intelligence search API
///
/// Works without an API key on the free tier (20 queries per day).
/// A key unlocks the pro endpoint, pagination and higher quotas.
///
/// Pricing and keys: https://webamon.com/pricing
#[derive(Parser, Debug)]
#[command(name = "webamon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Webamon API key (or set WEBAMON_API_KEY env var)
    #[arg(short = 'k', long, env = "WEBAMON_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config_file: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the Webamon threat intelligence database
    #[command(after_help = SEARCH_EXAMPLES)]
    Search(SearchArgs),

    /// Get a scan report by its report id
    Report(ReportArgs),

    /// Submit a domain or URL for scanning
    Scan(ScanArgs),

    /// Get the screenshot captured for a scan report
    Screenshot(ScreenshotArgs),

    /// Check that the Webamon API is reachable
    Status,

    /// Set up and verify an API key (prompts unless --api-key is given)
    Configure,

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Search command
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search term (IP, domain, URL, hash...) or Lucene query
    pub term: String,

    /// Comma-separated fields to search within and return
    /// [default: page_title,domain,resolved_url,dom]
    pub results: Option<String>,

    /// Number of results to return (max 100)
    #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub size: u32,

    /// Starting offset (requires an API key)
    #[arg(long, default_value_t = 0)]
    pub from: u32,

    /// Treat the term as a Lucene query
    #[arg(long, requires = "index")]
    pub lucene: bool,

    /// Index to run a Lucene query against (e.g. scans)
    #[arg(long)]
    pub index: Option<String>,

    /// Comma-separated fields to return (Lucene only)
    #[arg(long)]
    pub fields: Option<String>,

    /// Also write the results to a file
    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,

    /// Export file name; the extension is added when missing
    #[arg(long, default_value = DEFAULT_EXPORT_FILE)]
    pub export_file: String,
}

// ============================================================================
// Report command
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Report identifier (e.g. bf18c02d-ff0e-46a9-9a59-5b7b94fb27fb)
    pub report_id: String,
}

// ============================================================================
// Scan command
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Domain or URL to scan (e.g. example.com or https://example.com)
    pub url: String,

    /// Fetch the report once the scan has had a moment to finish
    #[arg(long)]
    pub fetch_report: bool,
}

// ============================================================================
// Screenshot command
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct ScreenshotArgs {
    /// Report identifier
    pub report_id: String,

    /// Save the decoded image to this file
    #[arg(long, value_name = "FILE")]
    pub save: Option<String>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (api_key, output_format, show_tips)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
