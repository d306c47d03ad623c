// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `HubScope` Core
//!
//! Core types and aggregation for `HubScope`.
//!
//! This crate provides the domain model shared by all other `HubScope`
//! crates, including:
//!
//! - Model identifiers and the listing-page slug grammar
//! - Detail records produced by enrichment lookups
//! - Page scrape results
//! - The pure context aggregator
//!
//! ## Key Types
//!
//! ### Identifiers
//! - [`ModelId`] - A validated `organization/name` identifier
//!
//! ### Records
//! - [`ModelRecord`] - Metadata from one detail lookup
//! - [`RecordStatus`] - Success/error marker for a lookup
//!
//! ### Scraping
//! - [`ScrapeResult`] - Outcome of fetching and parsing one page
//! - [`ScrapeStatus`] - Success/error marker for a scrape
//!
//! ### Aggregation
//! - [`ContextReport`] - Summary statistics over a set of records
//! - [`build_context`] - The aggregation function itself

pub mod context;
pub mod models;

// Re-export the aggregator
pub use context::build_context;

// Re-export all model types
pub use models::{
    // Identifiers
    ModelId,
    // Records
    ModelRecord,
    RecordStatus,
    // Scraping
    ScrapeResult,
    ScrapeStatus,
    // Aggregation
    ContextReport,
};
