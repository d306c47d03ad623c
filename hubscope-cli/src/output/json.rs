//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;

use hubscope_core::ModelRecord;
use hubscope_fetch::{ListingKind, ListingOutcome};

// ============================================================================
// Output Types
// ============================================================================

/// JSON envelope for a listing outcome.
#[derive(Debug, Serialize)]
pub struct IdentifiersOutput {
    pub model_ids: Vec<String>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ListingKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

/// JSON envelope for enriched records.
#[derive(Debug, Serialize)]
pub struct ModelsOutput {
    pub models: Vec<ModelRecord>,
    pub count: usize,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a listing outcome as an identifier envelope.
    pub fn format_identifiers(&self, outcome: &ListingOutcome) -> Result<String> {
        let output = IdentifiersOutput {
            model_ids: outcome
                .identifiers
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            count: outcome.identifiers.len(),
            source: outcome.source,
            strategy: outcome.strategy_id.clone(),
        };
        self.format(&output)
    }

    /// Formats enriched records as a models envelope.
    pub fn format_records(&self, records: &[ModelRecord]) -> Result<String> {
        let output = ModelsOutput {
            count: records.len(),
            models: records.to_vec(),
        };
        self.format(&output)
    }
}

// ============================================================================
// Tests
// ============================================================================
