//! `webamon search` - Search the Webamon threat intelligence database.

use anyhow::{Context as _, Result};
use colored::Colorize;
use std::io::Write;
use webamon::{Plan, SearchRequest, ThreatIntelApi, DEFAULT_SEARCH_FIELDS};

use super::Context;
use crate::cli::args::SearchArgs;
use crate::output::envelope::unwrap_response;
use crate::output::export::export;
use crate::output::navigate::CommandTemplate;
use crate::output::results::{render_page, SearchPage};
use crate::output::{write_json, OutputFormat};

pub async fn execute(ctx: Context, args: SearchArgs) -> Result<()> {
    let client = ctx.client()?;
    let stdout = std::io::stdout();
    run(&ctx, &client, args, &mut stdout.lock()).await
}

/// Run a search and print it
pub async fn run(
    ctx: &Context,
    api: &dyn ThreatIntelApi,
    mut args: SearchArgs,
    out: &mut impl Write,
) -> Result<()> {
    if args.from > 0 && api.plan() == Plan::Free {
        writeln!(
            out,
            "{} Pagination is only available for Pro users with API keys",
            "Warning:".yellow()
        )?;
        writeln!(out, "Using free tier - pagination parameters will be ignored")?;
        args.from = 0;
    }

    let request = build_request(&args);
    let response = api.run_search(&request).await?;
    let output = ctx.output_or(OutputFormat::Table);

    let unwrapped = unwrap_response(&response);
    let records = unwrapped.records();

    match (output, records.as_deref()) {
        (OutputFormat::Table, Some(records)) if !records.is_empty() => {
            let page = SearchPage {
                term: &args.term,
                records,
                total_hits: unwrapped.total_hits,
                pagination: unwrapped.pagination.as_ref(),
                requested_from: u64::from(args.from),
            };
            let template = command_template(ctx, &args, output);
            render_page(out, &page, &template, ctx.config.show_tips, ctx.style())?;
        }
        _ => write_json(out, &response)?,
    }

    if let Some(format) = args.export {
        match records {
            Some(records) => {
                let title = format!("Search Results for '{}'", args.term);
                let summary = export(&records, &args.export_file, format, &title)
                    .with_context(|| format!("Could not export results to {}", args.export_file))?;
                writeln!(out, "{}", summary.to_string().green())?;
            }
            None => {
                writeln!(
                    out,
                    "{} Nothing to export: the response holds no result records",
                    "Warning:".yellow()
                )?;
            }
        }
    }

    Ok(())
}

fn build_request(args: &SearchArgs) -> SearchRequest {
    let request = match (&args.index, args.lucene) {
        (Some(index), true) => SearchRequest::lucene(&args.term, index).fields(args.fields.clone()),
        _ => SearchRequest::basic(
            &args.term,
            args.results.as_deref().unwrap_or(DEFAULT_SEARCH_FIELDS),
        ),
    };

    request.size(args.size).from(args.from)
}

fn command_template(ctx: &Context, args: &SearchArgs, output: OutputFormat) -> CommandTemplate {
    CommandTemplate {
        search_fields: args.results.clone(),
        lucene_index: args.index.clone().filter(|_| args.lucene),
        return_fields: args.fields.clone(),
        output,
        default_output: ctx.config.output_format.unwrap_or_default(),
        export: args.export.map(|format| (format, args.export_file.clone())),
        ..CommandTemplate::new(&args.term, u64::from(args.size))
    }
}
