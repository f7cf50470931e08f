//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load(cli.config_file.as_deref())?;

    // --api-key and WEBAMON_API_KEY (both via clap) beat the config file
    let flag_key = cli.api_key.filter(|k| !k.trim().is_empty());
    let api_key = flag_key.clone().or_else(|| config.api_key.clone());

    // Create context for commands
    let ctx = commands::Context {
        config,
        config_file: cli.config_file,
        api_key,
        output: cli.output,
        verbose: cli.verbose,
        no_color: cli.no_color,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Search(args) => commands::search::execute(ctx, args).await,
        Commands::Report(args) => commands::report::execute(ctx, args).await,
        Commands::Scan(args) => commands::scan::execute(ctx, args).await,
        Commands::Screenshot(args) => commands::screenshot::execute(ctx, args).await,
        Commands::Status => commands::status::execute(ctx).await,
        Commands::Configure => commands::configure::execute(ctx, flag_key).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}

/// Diagnostics go to stderr: warnings by default, debug with `--verbose`,
/// `RUST_LOG` overrides both.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
