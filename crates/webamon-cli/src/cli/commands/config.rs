//! `webamon config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::{write_json, OutputFormat};

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        ConfigCommands::Show => show_config(&ctx, &mut out),
        ConfigCommands::Set { key, value } => set_config(&ctx, &key, &value, &mut out),
        ConfigCommands::Path => show_path(&ctx, &mut out),
    }
}

fn show_config(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let config = Config::load(ctx.config_file.as_deref())?;

    if ctx.output == Some(OutputFormat::Json) {
        let masked = Config {
            api_key: config.masked_key(),
            ..config
        };
        return write_json(out, &masked);
    }

    writeln!(out, "{}", "Current Configuration:".bold())?;
    writeln!(out)?;

    let api_display = config
        .masked_key()
        .unwrap_or_else(|| "(not set)".dimmed().to_string());
    writeln!(out, "  {} {}", "api_key:".bold(), api_display)?;
    writeln!(
        out,
        "  {} {}",
        "output_format:".bold(),
        config.output_format.unwrap_or_default()
    )?;
    writeln!(out, "  {} {}", "show_tips:".bold(), config.show_tips)?;
    writeln!(out, "  {} {}", "api_url:".bold(), config.api_url())?;

    Ok(())
}

fn set_config(ctx: &Context, key: &str, value: &str, out: &mut impl Write) -> Result<()> {
    let mut config = Config::load(ctx.config_file.as_deref())?;

    match key {
        "api_key" => {
            config.api_key = Some(value.to_string()).filter(|v| !v.trim().is_empty());
            writeln!(out, "{} API key set.", "Success:".green().bold())?;
        }
        "output_format" | "output" => {
            config.output_format = Some(value.parse()?);
            writeln!(out, "{} Output format set to {}.", "Success:".green().bold(), value.cyan())?;
        }
        "show_tips" => {
            config.show_tips = value.parse()?;
            writeln!(out, "{} show_tips set to {}.", "Success:".green().bold(), value)?;
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 api_key          - Your Webamon API key\n  \
                 output_format    - Default output format (table/json)\n  \
                 show_tips        - Show helpful tips (true/false)",
                key
            );
        }
    }

    config.save(ctx.config_file.as_deref())?;

    Ok(())
}

fn show_path(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let path = Config::resolve_path(ctx.config_file.as_deref())?;
    writeln!(out, "{}", path.display())?;
    Ok(())
}
