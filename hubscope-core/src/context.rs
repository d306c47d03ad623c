//! Pure aggregation of model records into context reports.
//!
//! Aggregation is arithmetic only: filtering, sums, means, and a ranked
//! truncation. There is no I/O here and no hidden state, so the same
//! records and topic always produce the same report.

use crate::models::{ContextReport, ModelRecord};

/// Maximum number of entries in a report's ranked list.
const TOP_MODELS_LIMIT: usize = 10;

/// Builds a summary report over `records`, optionally filtered by topic.
///
/// The topic match is a case-insensitive substring test against the
/// record's pipeline tag, each of its tags, and its identifier. With no
/// topic every record is included and the report is labeled `"all"`.
/// Averages are exactly 0 when the filter leaves nothing.
pub fn build_context(records: &[ModelRecord], topic: Option<&str>) -> ContextReport {
    let filtered: Vec<ModelRecord> = match topic {
        Some(topic) => {
            let needle = topic.to_lowercase();
            records
                .iter()
                .filter(|record| matches_topic(record, &needle))
                .cloned()
                .collect()
        }
        None => records.to_vec(),
    };

    let total_models = filtered.len();
    let total_likes: u64 = filtered.iter().map(|record| record.likes).sum();
    let total_downloads: u64 = filtered.iter().map(|record| record.downloads).sum();

    let (average_likes, average_downloads) = if total_models == 0 {
        (0.0, 0.0)
    } else {
        (
            total_likes as f64 / total_models as f64,
            total_downloads as f64 / total_models as f64,
        )
    };

    // Stable sort keeps the original relative order for tied like counts.
    let mut top_models = filtered.clone();
    top_models.sort_by(|a, b| b.likes.cmp(&a.likes));
    top_models.truncate(TOP_MODELS_LIMIT);

    let mut pipeline_tags: Vec<String> = Vec::new();
    for record in &filtered {
        if let Some(tag) = record.pipeline_tag.as_deref() {
            if !tag.is_empty() && !pipeline_tags.iter().any(|seen| seen == tag) {
                pipeline_tags.push(tag.to_string());
            }
        }
    }

    ContextReport {
        topic: topic.unwrap_or("all").to_string(),
        total_models,
        total_likes,
        total_downloads,
        average_likes,
        average_downloads,
        top_models,
        pipeline_tags,
        models: filtered,
    }
}

fn matches_topic(record: &ModelRecord, needle: &str) -> bool {
    if record
        .pipeline_tag
        .as_deref()
        .is_some_and(|tag| tag.to_lowercase().contains(needle))
    {
        return true;
    }
    if record
        .tags
        .iter()
        .any(|tag| tag.to_lowercase().contains(needle))
    {
        return true;
    }
    record.model_id.as_str().to_lowercase().contains(needle)
}
