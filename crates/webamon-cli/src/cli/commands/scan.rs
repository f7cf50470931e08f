//! `webamon scan` - Submit a domain or URL for scanning.

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::io::Write;
use std::time::Duration;
use tracing::debug;
use webamon::{report_id, SearchRequest, ThreatIntelApi};

use super::Context;
use crate::cli::args::ScanArgs;
use crate::output::format::{format_value, FormattedValue};
use crate::output::table::{render_key_values, title_case};
use crate::output::{write_json, OutputFormat};

/// Wait between submitting a scan and asking for its report
pub const REPORT_SETTLE_DELAY: Duration = Duration::from_secs(5);

pub async fn execute(ctx: Context, args: ScanArgs) -> Result<()> {
    let client = ctx.client()?;
    let stdout = std::io::stdout();
    run(&ctx, &client, args, &mut stdout.lock()).await
}

/// Submit a scan, print the submission and optionally chain a report fetch
pub async fn run(
    ctx: &Context,
    api: &dyn ThreatIntelApi,
    args: ScanArgs,
    out: &mut impl Write,
) -> Result<()> {
    let response = api.submit_scan(&args.url).await?;
    let id = report_id(&response);

    match ctx.output_or(OutputFormat::Table) {
        OutputFormat::Json => write_json(out, &response)?,
        OutputFormat::Table => print_submission(out, ctx, &args, &response)?,
    }

    if !args.fetch_report {
        return Ok(());
    }

    let Some(id) = id else {
        writeln!(out)?;
        writeln!(
            out,
            "{} --fetch-report was given but the scan response has no report id",
            "Warning:".yellow()
        )?;
        return Ok(());
    };

    writeln!(out)?;
    writeln!(out, "{}", format!("Fetching report: {id}").cyan())?;
    settle().await;

    match api.run_search(&SearchRequest::report(&id)).await {
        Ok(report) => write_json(out, &report)?,
        Err(e) => {
            debug!(error = %e, "report fetch failed");
            writeln!(out, "{} Failed to fetch report: {}", "Warning:".yellow(), e)?;
            writeln!(out, "{}", "You can fetch the report later with:".dimmed())?;
            writeln!(out, "{}", format!("webamon report {id}").dimmed())?;
        }
    }

    Ok(())
}

/// Give a fresh scan time to produce its report
async fn settle() {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Waiting for the scan report...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    tokio::time::sleep(REPORT_SETTLE_DELAY).await;

    spinner.finish_and_clear();
}

fn print_submission(
    out: &mut impl Write,
    ctx: &Context,
    args: &ScanArgs,
    response: &Value,
) -> Result<()> {
    let Some(object) = response.as_object() else {
        return write_json(out, response);
    };

    writeln!(out, "{} Scan initiated for: {}", "✓".green(), args.url)?;

    let rows: Vec<(String, FormattedValue)> = object
        .iter()
        .map(|(key, value)| {
            let formatted = match value {
                Value::Object(_) | Value::Array(_) => FormattedValue::plain(value.to_string()),
                scalar => format_value(scalar),
            };
            (title_case(key), formatted)
        })
        .collect();

    writeln!(out, "{}", "Scan Details".bold())?;
    render_key_values(out, ["Property", "Value"], &rows, ctx.style())?;

    if let Some(id) = report_id(response) {
        writeln!(out)?;
        writeln!(out, "{} {}", "Report ID:".yellow(), id.bold())?;
        if !args.fetch_report && ctx.config.show_tips {
            writeln!(
                out,
                "{}",
                "Use this ID with 'webamon report' to get the scan results".dimmed()
            )?;
            writeln!(out, "{}", "Or use 'webamon screenshot' to get the screenshot".dimmed())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::{context, FakeApi};
    use serde_json::json;
    use tokio::time::Instant;

    fn args(fetch_report: bool) -> ScanArgs {
        ScanArgs {
            url: "example.com".to_string(),
            fetch_report,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_report_waits_then_fetches() {
        let api = FakeApi {
            scan: Some(json!({"report_id": "abc-123", "status": "queued"})),
            search: Some(json!({"results": [{"report_id": "abc-123"}]})),
            ..Default::default()
        };
        let mut out = Vec::new();
        let started = Instant::now();

        run(&context(), &api, args(true), &mut out).await.unwrap();

        assert!(started.elapsed() >= REPORT_SETTLE_DELAY);
        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], "scan example.com");
        assert!(calls[1].contains(r#"report_id:\"abc-123\""#));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Scan Details"));
        assert!(text.contains("Report ID: abc-123"));
        assert!(text.contains("Fetching report: abc-123"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_report_id_skips_delay_and_fetch() {
        let api = FakeApi {
            scan: Some(json!({"status": "queued"})),
            ..Default::default()
        };
        let mut out = Vec::new();
        let started = Instant::now();

        run(&context(), &api, args(true), &mut out).await.unwrap();

        assert!(started.elapsed() < REPORT_SETTLE_DELAY);
        assert_eq!(api.calls(), vec!["scan example.com".to_string()]);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("no report id"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_numeric_report_id_is_fetched() {
        let api = FakeApi {
            scan: Some(json!({"id": 4711})),
            search: Some(json!({"results": []})),
            ..Default::default()
        };
        let mut out = Vec::new();

        run(&context(), &api, args(true), &mut out).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].contains(r#"report_id:\"4711\""#));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Report ID: 4711"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_is_a_warning() {
        let api = FakeApi {
            scan: Some(json!({"id": "xyz"})),
            search: None,
            ..Default::default()
        };
        let mut out = Vec::new();

        run(&context(), &api, args(true), &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Failed to fetch report"));
        assert!(text.contains("webamon report xyz"));
    }

    #[tokio::test]
    async fn test_json_output_without_fetch() {
        let response = json!({"report_id": "abc"});
        let api = FakeApi {
            scan: Some(response.clone()),
            ..Default::default()
        };
        let mut ctx = context();
        ctx.output = Some(OutputFormat::Json);
        let mut out = Vec::new();

        run(&ctx, &api, args(false), &mut out).await.unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, response);
        assert_eq!(api.calls().len(), 1);
    }
}
