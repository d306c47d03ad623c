// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! HubScope CLI - model hub metadata retrieval from the command line.
//!
//! # Examples
//!
//! ```bash
//! # List the most-liked models (default command)
//! hubscope
//!
//! # List 50 identifiers through the API only
//! hubscope models --limit 50 --source api
//!
//! # Full records instead of bare identifiers
//! hubscope models --enrich
//!
//! # Build an aggregated context report for a topic
//! hubscope context "text-generation"
//!
//! # JSON output
//! hubscope context --format json --pretty
//!
//! # Scrape one page
//! hubscope scrape https://huggingface.co/openai/whisper-large-v3
//!
//! # Enrich identifiers from a file into a CSV
//! hubscope enrich --input ids.txt --output models.csv
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{context, enrich, models, scrape};

// ============================================================================
// CLI Definition
// ============================================================================

/// HubScope CLI - model hub metadata retrieval.
#[derive(Parser)]
#[command(name = "hubscope")]
#[command(about = "Model hub metadata retrieval CLI")]
#[command(long_about = r#"
HubScope retrieves model metadata from the Hugging Face hub.

Listings come from the public HTML page first, falling back to the
JSON API when scraping yields nothing. Details are always fetched
through the API; models whose lookup fails are dropped.

Examples:
  hubscope                        # Top models (default command)
  hubscope models --limit 50      # More identifiers
  hubscope context "translation"  # Aggregated report for a topic
  hubscope --format json models   # JSON output
  hubscope enrich -i ids.txt      # File-based enrichment to CSV
"#)]
#[command(version)]
#[command(author = "HubScope Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'models' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List model identifiers (default if no command specified).
    #[command(visible_alias = "m")]
    Models(models::ModelsArgs),

    /// Build an aggregated context report.
    #[command(visible_alias = "c")]
    Context(context::ContextArgs),

    /// Scrape a single page for its title and visible text.
    #[command(visible_alias = "s")]
    Scrape(scrape::ScrapeArgs),

    /// Enrich identifiers from a file into a CSV.
    #[command(visible_alias = "e")]
    Enrich(enrich::EnrichArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Every acquisition source came back empty.
    NoData = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Models(args)) => models::run(args, &cli).await,
        Some(Commands::Context(args)) => context::run(args, &cli).await,
        Some(Commands::Scrape(args)) => scrape::run(args, &cli).await,
        Some(Commands::Enrich(args)) => enrich::run(args, &cli).await,
        None => {
            // Default to the models command
            models::run(&models::ModelsArgs::default(), &cli).await
        }
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
