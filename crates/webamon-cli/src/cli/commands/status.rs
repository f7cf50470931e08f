//! `webamon status` - Check that the API answers.

use anyhow::Result;
use colored::Colorize;

use super::Context;

pub async fn execute(ctx: Context) -> Result<()> {
    let client = ctx.client()?;

    if ctx.verbose {
        println!("{}", format!("Checking {}...", client.base_url()).dimmed());
    }

    client.test_connection().await?;

    println!("{} Webamon Search API is accessible", "✓".green());
    println!("{}", "The Google of Threat Intelligence".dimmed());
    println!(
        "{} {}",
        "Plan:".cyan(),
        if client.has_api_key() { "Pro (API key set)" } else { "Free tier" }
    );

    Ok(())
}
