// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `HubScope` Providers
//!
//! Hub-specific acquisition code for the `HubScope` application.
//!
//! This crate contains the concrete Hugging Face implementations behind
//! the generic listing pipeline:
//!
//! - **Listing**: HTML scraping of the public models page
//! - **API**: The JSON model API, used for listing fallback and detail
//!   enrichment
//! - **Strategies**: [`ListingStrategy`](hubscope_fetch::ListingStrategy)
//!   implementations wiring both sources into a pipeline
//!
//! ## Acquisition Sources
//!
//! | Source | Strategy ID | Priority | Notes |
//! |--------|-------------|----------|-------|
//! | HTML scrape | `huggingface.scrape` | 100 | Primary |
//! | Hub API | `huggingface.api` | 50 | Fallback, also serves enrichment |
//!
//! ## Usage
//!
//! ```ignore
//! use hubscope_providers::huggingface::{default_pipeline, HubApiClient, ModelEnricher};
//! use hubscope_fetch::FetchContext;
//!
//! // List identifiers, falling back from scrape to API
//! let ctx = FetchContext::new()?;
//! let outcome = default_pipeline().execute(&ctx, 20).await;
//!
//! // Enrich them through the detail endpoint
//! let enricher = ModelEnricher::new(HubApiClient::new(ctx.http.clone()));
//! let records = enricher.enrich(&outcome.identifiers).await;
//! ```

// Provider modules
pub mod huggingface;

// Re-export key types
pub use huggingface::{
    default_pipeline, token_from_env, ApiListingStrategy, HubApiClient, ListingScraper,
    ModelEnricher, ScrapeListingStrategy, HF_API_BASE, HF_LIST_URL, TOKEN_ENV_VAR,
};
