//! Hugging Face hub provider implementation.
//!
//! Hugging Face hosts the model listings this crate targets. The provider
//! supports two acquisition strategies:
//!
//! ## Listing Strategies
//!
//! 1. **HTML Scrape** (priority 100): Parses anchor hrefs out of the
//!    public listing page at `https://huggingface.co/models?sort=likes`
//! 2. **Hub API** (priority 50): Calls the JSON listing endpoint at
//!    `https://huggingface.co/api/models` when scraping yields nothing
//!
//! Both strategies produce the same `org/name` identifiers, so downstream
//! enrichment never needs to know which one ran.
//!
//! ## Enrichment
//!
//! Identifiers are enriched one at a time through the per-model detail
//! endpoint (`/api/models/{id}`). Records that cannot be retrieved are
//! dropped rather than surfaced as partial data.
//!
//! ## Authentication
//!
//! Requests work anonymously. When `HUGGINGFACE_HUB_TOKEN` is set, it is
//! sent as a bearer token, which raises rate limits.
//!
//! ## Usage
//!
//! ```ignore
//! use hubscope_providers::huggingface::{default_pipeline, ModelEnricher};
//!
//! let pipeline = default_pipeline();
//! let outcome = pipeline.execute(&ctx, 20).await;
//! ```

// Modules
mod api;
mod enrich;
mod listing;
mod strategies;

// Re-exports
pub use api::{HubApiClient, HF_API_BASE};
pub use enrich::ModelEnricher;
pub use listing::{extract_identifiers, ListingScraper, HF_LIST_URL};
pub use strategies::{default_pipeline, ApiListingStrategy, ScrapeListingStrategy};

/// Environment variable holding an optional hub access token.
pub const TOKEN_ENV_VAR: &str = "HUGGINGFACE_HUB_TOKEN";

/// Reads the hub access token from the environment, if present.
///
/// Empty values are treated as unset.
pub fn token_from_env() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR)
        .ok()
        .filter(|token| !token.trim().is_empty())
}
