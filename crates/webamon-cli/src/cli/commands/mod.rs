//! Command implementations.
//!
//! Each command has an `execute` entry point that builds the real client,
//! and a `run` function that takes the API and the output sink explicitly.

pub mod config;
pub mod configure;
pub mod report;
pub mod scan;
pub mod screenshot;
pub mod search;
pub mod status;

use webamon::{Plan, WebamonClient};

use crate::config::Config;
use crate::output::format::{AnsiStyle, PlainStyle, SpanStyle};
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration
    pub config: Config,

    /// `--config-file`, when given
    pub config_file: Option<String>,

    /// Resolved API key (flag, env, then config file)
    pub api_key: Option<String>,

    /// Output format from the command line
    pub output: Option<OutputFormat>,

    /// Verbose output
    pub verbose: bool,

    /// Disable colors
    pub no_color: bool,
}

impl Context {
    /// Output format: command line, then config file, then the command's
    /// own default.
    #[must_use]
    pub fn output_or(&self, default: OutputFormat) -> OutputFormat {
        self.output.or(self.config.output_format).unwrap_or(default)
    }

    /// Create a Webamon client with the resolved API key.
    pub fn client(&self) -> anyhow::Result<WebamonClient> {
        Ok(WebamonClient::new(self.api_key.clone())?)
    }

    /// Tier implied by the resolved key.
    #[must_use]
    pub fn plan(&self) -> Plan {
        Plan::for_key(self.api_key.as_deref())
    }

    /// How highlights and markers are drawn.
    #[must_use]
    pub fn style(&self) -> &'static dyn SpanStyle {
        if self.no_color {
            &PlainStyle
        } else {
            &AnsiStyle
        }
    }
}
