//! `webamon screenshot` - Retrieve the screenshot of a scan report.

use anyhow::{Context as _, Result};
use colored::Colorize;
use std::io::Write;
use webamon::{Screenshot, ThreatIntelApi};

use super::Context;
use crate::cli::args::ScreenshotArgs;
use crate::output::{write_json, OutputFormat};

pub async fn execute(ctx: Context, args: ScreenshotArgs) -> Result<()> {
    let client = ctx.client()?;
    let stdout = std::io::stdout();
    run(&ctx, &client, args, &mut stdout.lock()).await
}

pub async fn run(
    ctx: &Context,
    api: &dyn ThreatIntelApi,
    args: ScreenshotArgs,
    out: &mut impl Write,
) -> Result<()> {
    let response = api.fetch_screenshot(&args.report_id).await?;

    if ctx.output_or(OutputFormat::Table) == OutputFormat::Json || !Screenshot::has_report(&response) {
        return write_json(out, &response);
    }

    let Some(shot) = Screenshot::from_response(&response) else {
        writeln!(
            out,
            "{}",
            format!("No screenshot found for report: {}", args.report_id).yellow()
        )?;
        return Ok(());
    };

    match &args.save {
        Some(path) => {
            let image = shot.decode()?;
            std::fs::write(path, image).with_context(|| format!("Could not write {path}"))?;
            writeln!(out, "{} Screenshot saved to: {}", "✓".green(), path)?;
        }
        None => {
            writeln!(
                out,
                "{} Screenshot retrieved for report: {}",
                "✓".green(),
                args.report_id
            )?;
            writeln!(out, "{} {} characters", "Data size:".yellow(), shot.encoded_len())?;
            if ctx.config.show_tips {
                writeln!(out, "{}", "Use --save filename.png to save the screenshot".dimmed())?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::{context, FakeApi};
    use serde_json::json;
    use tempfile::TempDir;

    fn args(save: Option<String>) -> ScreenshotArgs {
        ScreenshotArgs {
            report_id: "abc".to_string(),
            save,
        }
    }

    #[tokio::test]
    async fn test_saves_decoded_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shot.png");
        let api = FakeApi {
            screenshot: Some(json!({"report": {"screenshot": "data:image/png;base64,aGVsbG8="}})),
            ..Default::default()
        };
        let mut out = Vec::new();

        run(&context(), &api, args(Some(path.to_string_lossy().into_owned())), &mut out)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
        assert!(String::from_utf8(out).unwrap().contains("Screenshot saved to"));
    }

    #[tokio::test]
    async fn test_reports_size() {
        let api = FakeApi {
            screenshot: Some(json!({"report": {"screenshot": "aGVsbG8="}})),
            ..Default::default()
        };
        let mut out = Vec::new();
        run(&context(), &api, args(None), &mut out).await.unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Data size: 8 characters"));
    }

    #[tokio::test]
    async fn test_missing_screenshot_notice() {
        let api = FakeApi {
            screenshot: Some(json!({"report": {"status": "pending"}})),
            ..Default::default()
        };
        let mut out = Vec::new();
        run(&context(), &api, args(None), &mut out).await.unwrap();
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("No screenshot found for report: abc"));
    }

    #[tokio::test]
    async fn test_invalid_base64_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shot.png");
        let api = FakeApi {
            screenshot: Some(json!({"report": {"screenshot": "not base64!"}})),
            ..Default::default()
        };
        let mut out = Vec::new();
        let result = run(&context(), &api, args(Some(path.to_string_lossy().into_owned())), &mut out).await;
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
