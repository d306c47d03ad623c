// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # HubScope Fetch
//!
//! Acquisition strategies and HTTP plumbing for HubScope.
//!
//! This crate provides the infrastructure for retrieving model listings
//! from the hub through interchangeable strategies. It includes:
//!
//! ## HTTP Layer
//!
//! - [`client::HttpClient`] - GET with fixed headers, bearer token, and retry
//! - [`retry::RetryPolicy`] - Linear backoff on transient network failures
//! - [`page::PageScraper`] - General URL scraping to title and text
//!
//! ## Listing Pipeline
//!
//! The listing pipeline executes strategies in priority order:
//!
//! - [`strategy::ListingStrategy`] - Trait for acquisition implementations
//! - [`pipeline::ListingPipeline`] - Executes strategies in order
//! - [`context::FetchContext`] - Shared client and settings
//!
//! ## Example
//!
//! ```ignore
//! use hubscope_fetch::{FetchContext, ListingPipeline};
//!
//! // Create a fetch context with default settings
//! let ctx = FetchContext::new()?;
//!
//! // Create a pipeline with acquisition strategies
//! let pipeline = ListingPipeline::with_strategies(vec![
//!     Box::new(ScrapeListingStrategy::new()),
//!     Box::new(ApiListingStrategy::new()),
//! ]);
//!
//! // Execute and get the identifiers
//! let outcome = pipeline.execute(&ctx, 20).await;
//! ```

// Core modules
pub mod client;
pub mod context;
pub mod error;
pub mod page;
pub mod pipeline;
pub mod retry;
pub mod strategy;

// Re-export key types at crate root

// Errors
pub use error::FetchError;

// HTTP layer
pub use client::{HttpClient, HttpResponse};
pub use page::PageScraper;
pub use retry::RetryPolicy;

// Strategy & Pipeline
pub use context::{FetchContext, FetchContextBuilder, FetchSettings, SourceMode};
pub use pipeline::{ListingAttempt, ListingOutcome, ListingPipeline};
pub use strategy::{ListingKind, ListingResult, ListingStrategy};
