//! Aggregated context reports over sets of model records.

use serde::{Deserialize, Serialize};

use super::record::ModelRecord;

/// A summary over a filtered set of model records.
///
/// Reports are derived values: recomputed from their inputs on every
/// aggregation, never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextReport {
    /// The topic filter that produced this report, or `"all"`.
    pub topic: String,
    /// Number of records after filtering.
    pub total_models: usize,
    /// Sum of likes across the filtered records.
    pub total_likes: u64,
    /// Sum of downloads across the filtered records.
    pub total_downloads: u64,
    /// Mean likes per filtered record; exactly 0 when the report is empty.
    pub average_likes: f64,
    /// Mean downloads per filtered record; exactly 0 when the report is empty.
    pub average_downloads: f64,
    /// Filtered records ranked by likes, highest first, at most ten.
    pub top_models: Vec<ModelRecord>,
    /// Distinct non-empty pipeline tags in first-seen order.
    pub pipeline_tags: Vec<String>,
    /// All filtered records in their original order.
    pub models: Vec<ModelRecord>,
}

impl ContextReport {
    /// Whether the filter left no records to summarize.
    pub fn is_empty(&self) -> bool {
        self.total_models == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty_tracks_total() {
        let report = ContextReport {
            topic: "all".to_string(),
            total_models: 0,
            total_likes: 0,
            total_downloads: 0,
            average_likes: 0.0,
            average_downloads: 0.0,
            top_models: Vec::new(),
            pipeline_tags: Vec::new(),
            models: Vec::new(),
        };
        assert!(report.is_empty());
    }
}
