//! `webamon configure` - Set up and verify an API key.

use anyhow::{Context as _, Result};
use colored::Colorize;
use dialoguer::Password;
use webamon::WebamonClient;

use super::Context;
use crate::config::Config;

/// Prompt for a key unless one was given, test it, and save on success.
pub async fn execute(ctx: Context, key: Option<String>) -> Result<()> {
    let key = match key {
        Some(key) => Some(key),
        None => Password::new()
            .with_prompt("API key (optional, press Enter to skip)")
            .allow_empty_password(true)
            .interact()
            .context("Could not read API key")
            .map(Some)?,
    }
    .filter(|k| !k.trim().is_empty());

    let config = Config {
        api_key: key,
        ..ctx.config.clone()
    };

    let endpoint = if config.api_key.is_some() {
        "Using pro.webamon.com (API key detected)"
    } else {
        "Using search.webamon.com (no API key)"
    };
    println!("{}", endpoint.dimmed());
    println!("{}", format!("Testing connection to {}...", config.api_url()).dimmed());

    let client = WebamonClient::new(config.api_key.clone())?;
    if let Err(e) = client.test_connection().await {
        eprintln!("{} Configuration test failed: {}", "✗".red(), e);
        if let Some(key) = &config.api_key {
            eprintln!("{}", "Debug info:".yellow());
            eprintln!("  - API URL: {}", config.api_url());
            eprintln!("  - API Key length: {} characters", key.chars().count());
            eprintln!("  - Using x-api-key header authentication");
            eprintln!("  - Ensure your API key is valid and has the correct permissions");
        }
        return Err(e).context("Configuration not saved");
    }

    println!("{} Configuration valid - API connection successful", "✓".green());
    println!("{} {}", "API URL:".cyan(), config.api_url());
    println!(
        "{} {}",
        "API Key:".cyan(),
        if config.api_key.is_some() { "Set" } else { "Not set (free tier)" }
    );

    let path = config.save(ctx.config_file.as_deref())?;
    println!("{} Configuration saved to {}", "✓".green(), path.display());

    Ok(())
}
