//! Context command - list, enrich, and aggregate into one report.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use tracing::info;

use hubscope_core::build_context;
use hubscope_providers::huggingface::{default_pipeline, HubApiClient, ModelEnricher};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the context command.
#[derive(Args)]
pub struct ContextArgs {
    /// Topic to filter models by (matches pipeline tag, tags, or name).
    pub topic: Option<String>,

    /// Number of models to retrieve before filtering (1-100).
    #[arg(long, short = 'n', default_value_t = 20)]
    pub limit: usize,

    /// Acquisition source (auto, scrape, api).
    #[arg(long, default_value = "auto")]
    pub source: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 20)]
    pub timeout: u64,
}

/// Runs the context command.
pub async fn run(args: &ContextArgs, cli: &Cli) -> Result<()> {
    if !(1..=100).contains(&args.limit) {
        anyhow::bail!("limit must be between 1 and 100");
    }

    info!(topic = ?args.topic, limit = args.limit, "Building context report");

    let ctx = super::fetch_context(&args.source, args.timeout)?;
    let outcome = default_pipeline().execute(&ctx, args.limit).await;

    if outcome.is_empty() {
        if !cli.quiet {
            eprintln!("No model identifiers retrieved");
        }
        std::process::exit(ExitCode::NoData as i32);
    }

    let enricher = ModelEnricher::new(HubApiClient::new(Arc::clone(&ctx.http)));
    let records = enricher.enrich(&outcome.identifiers).await;

    if records.is_empty() {
        if !cli.quiet {
            eprintln!("No models could be enriched");
        }
        std::process::exit(ExitCode::NoData as i32);
    }

    let report = build_context(&records, args.topic.as_deref());

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_report(&report));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&report)?);
        }
    }

    Ok(())
}
