//! Models command - list model identifiers from the hub.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::info;

use hubscope_providers::huggingface::{default_pipeline, HubApiClient, ModelEnricher};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the models command.
#[derive(Args)]
pub struct ModelsArgs {
    /// Number of identifiers to list (1-100).
    #[arg(long, short = 'n', default_value_t = 20)]
    pub limit: usize,

    /// Fetch full records instead of bare identifiers.
    #[arg(long)]
    pub enrich: bool,

    /// Acquisition source (auto, scrape, api).
    #[arg(long, default_value = "auto")]
    pub source: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 20)]
    pub timeout: u64,
}

impl Default for ModelsArgs {
    fn default() -> Self {
        Self {
            limit: 20,
            enrich: false,
            source: "auto".to_string(),
            timeout: 20,
        }
    }
}

/// Runs the models command.
pub async fn run(args: &ModelsArgs, cli: &Cli) -> Result<()> {
    if !(1..=100).contains(&args.limit) {
        anyhow::bail!("limit must be between 1 and 100");
    }

    info!(limit = args.limit, source = %args.source, "Listing models");

    let ctx = super::fetch_context(&args.source, args.timeout)?;
    let outcome = default_pipeline().execute(&ctx, args.limit).await;

    if outcome.is_empty() {
        if !cli.quiet {
            eprintln!("No model identifiers retrieved");
        }
        std::process::exit(ExitCode::NoData as i32);
    }

    if args.enrich {
        let api = HubApiClient::new(Arc::clone(&ctx.http));
        let records = ModelEnricher::new(api).enrich(&outcome.identifiers).await;

        if records.is_empty() {
            if !cli.quiet {
                eprintln!("No models could be enriched");
            }
            std::process::exit(ExitCode::NoData as i32);
        }

        match cli.format {
            OutputFormat::Text => {
                let formatter = TextFormatter::new(!cli.no_color);
                println!("{}", formatter.format_models(&records));
            }
            OutputFormat::Json => {
                let formatter = JsonFormatter::new(cli.pretty);
                println!("{}", formatter.format_records(&records)?);
            }
        }
        return Ok(());
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_identifiers(&outcome));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_identifiers(&outcome)?);
        }
    }

    Ok(())
}
