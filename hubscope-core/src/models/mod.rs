//! Domain models for HubScope.
//!
//! This module contains the data structures flowing through the retrieval
//! pipeline: identifiers extracted from listings, detail records produced
//! by enrichment, page scrape results, and the aggregated context report.
//!
//! ## Submodules
//!
//! - [`identifier`] - The `organization/name` identifier and slug grammar
//! - [`record`] - Detail records (ModelRecord, RecordStatus)
//! - [`scrape`] - Page scrape results (ScrapeResult, ScrapeStatus)
//! - [`report`] - Aggregated summaries (ContextReport)

mod identifier;
mod record;
mod report;
mod scrape;

// Re-export everything at the models level
pub use identifier::ModelId;
pub use record::{ModelRecord, RecordStatus};
pub use report::ContextReport;
pub use scrape::{ScrapeResult, ScrapeStatus};
