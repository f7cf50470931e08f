//! `webamon report` - Look up a scan report by id.

use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use webamon::{Record, SearchRequest, ThreatIntelApi};

use super::Context;
use crate::cli::args::ReportArgs;
use crate::output::envelope::unwrap_response;
use crate::output::flatten;
use crate::output::format::{format_cell, FormattedValue, SpanStyle};
use crate::output::table::{render_key_values, title_case};
use crate::output::{write_json, OutputFormat};

pub async fn execute(ctx: Context, args: ReportArgs) -> Result<()> {
    let client = ctx.client()?;
    let stdout = std::io::stdout();
    run(&ctx, &client, args, &mut stdout.lock()).await
}

/// Fetch a report and print it; JSON unless table output was asked for
pub async fn run(
    ctx: &Context,
    api: &dyn ThreatIntelApi,
    args: ReportArgs,
    out: &mut impl Write,
) -> Result<()> {
    let response = api.run_search(&SearchRequest::report(&args.report_id)).await?;

    if ctx.output_or(OutputFormat::Json) == OutputFormat::Json {
        return write_json(out, &response);
    }

    writeln!(out, "{}", format!("Searching for report: {}", args.report_id).dimmed())?;

    let records = unwrap_response(&response).records().unwrap_or_default();
    match records.as_slice() {
        [] => {
            writeln!(out, "{}", format!("No report found with ID: {}", args.report_id).yellow())?;
            writeln!(
                out,
                "{}",
                "Make sure the report ID is correct and the scan has completed".dimmed()
            )?;
        }
        [report] => print_report(out, &args.report_id, report, ctx.config.show_tips, ctx.style())?,
        many => {
            writeln!(
                out,
                "{} Found {} reports with ID {}",
                "Warning:".yellow(),
                many.len(),
                args.report_id
            )?;
            write_json(out, many)?;
        }
    }

    Ok(())
}

fn print_report(
    out: &mut impl Write,
    report_id: &str,
    report: &Record,
    show_tips: bool,
    style: &dyn SpanStyle,
) -> Result<()> {
    let (batch, omitted) = flatten::process(std::slice::from_ref(report));

    let Some(row) = batch.rows.first().filter(|_| !batch.columns.is_empty()) else {
        return write_json(out, report);
    };

    let rows: Vec<(String, FormattedValue)> = batch
        .columns
        .iter()
        .zip(row)
        .map(|(column, cell)| (title_case(column), format_cell(cell)))
        .collect();

    writeln!(out, "{}", format!("Scan Report: {report_id}").bold())?;
    render_key_values(out, ["Field", "Value"], &rows, style)?;

    if !omitted.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "{} Complex fields omitted from table view: {}",
            "Note:".yellow(),
            omitted.join(", ")
        )?;
        if show_tips {
            writeln!(out, "{}", "Use -o json to see all fields".dimmed())?;
        }
    }

    Ok(())
}
