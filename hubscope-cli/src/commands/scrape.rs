//! Scrape command - fetch one page and extract its visible content.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tracing::info;

use hubscope_fetch::{HttpClient, PageScraper};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the scrape command.
#[derive(Args)]
pub struct ScrapeArgs {
    /// URL to scrape.
    pub url: String,

    /// Print only the extracted text (overrides --format).
    #[arg(long)]
    pub text_only: bool,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 20)]
    pub timeout: u64,
}

/// Runs the scrape command.
pub async fn run(args: &ScrapeArgs, cli: &Cli) -> Result<()> {
    info!(url = %args.url, "Scraping page");

    let http = Arc::new(HttpClient::with_timeout(Duration::from_secs(args.timeout))?);
    let scraper = PageScraper::new(http);
    let result = scraper.scrape(&args.url).await;

    if args.text_only {
        if !result.is_success() {
            let error = result.error.as_deref().unwrap_or("unknown error");
            anyhow::bail!("Scrape failed: {error}");
        }
        println!("{}", result.text);
        return Ok(());
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_scrape(&result));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&result)?);
        }
    }

    if !result.is_success() {
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
