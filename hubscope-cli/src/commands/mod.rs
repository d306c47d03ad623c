//! CLI command implementations.

pub mod context;
pub mod enrich;
pub mod models;
pub mod scrape;

use std::time::Duration;

use anyhow::Result;
use hubscope_fetch::{FetchContext, FetchSettings, SourceMode};
use hubscope_providers::huggingface;

/// Parses a source mode argument.
pub(crate) fn parse_source_mode(s: &str) -> Result<SourceMode> {
    match s.to_lowercase().as_str() {
        "auto" => Ok(SourceMode::Auto),
        "scrape" | "html" => Ok(SourceMode::Scrape),
        "api" => Ok(SourceMode::Api),
        _ => anyhow::bail!("Unknown source mode: {}. Valid options: auto, scrape, api", s),
    }
}

/// Builds a fetch context from command arguments.
///
/// The hub token is picked up from the environment when present.
pub(crate) fn fetch_context(source: &str, timeout_secs: u64) -> Result<FetchContext> {
    let mut settings =
        FetchSettings::default().with_timeout(Duration::from_secs(timeout_secs));
    settings.source_mode = parse_source_mode(source)?;
    if let Some(token) = huggingface::token_from_env() {
        settings = settings.with_token(token);
    }
    Ok(FetchContext::with_settings(settings)?)
}
