//! Model detail records produced by enrichment lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identifier::ModelId;

/// Outcome marker for a single detail lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// The lookup returned usable metadata.
    Success,
    /// The lookup failed; the record carries only the error message.
    Error,
}

/// Metadata for one model, as returned by one detail lookup.
///
/// Records are immutable after creation. Fields missing from the hub
/// response stay `None` rather than being substituted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRecord {
    /// The `organization/name` identifier this record describes.
    pub model_id: ModelId,
    /// Like count at lookup time.
    #[serde(default)]
    pub likes: u64,
    /// Download count at lookup time.
    #[serde(default)]
    pub downloads: u64,
    /// Free-form tags attached to the model.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Task pipeline tag, when the model declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_tag: Option<String>,
    /// License identifier, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Creation timestamp as reported by the hub (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last-modified timestamp as reported by the hub (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// Whether the lookup behind this record succeeded.
    pub status: RecordStatus,
    /// Failure reason when `status` is [`RecordStatus::Error`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ModelRecord {
    /// Creates a failed record carrying only the error message.
    pub fn failed(model_id: ModelId, error: impl Into<String>) -> Self {
        Self {
            model_id,
            likes: 0,
            downloads: 0,
            tags: Vec::new(),
            pipeline_tag: None,
            license: None,
            created_at: None,
            last_modified: None,
            status: RecordStatus::Error,
            error: Some(error.into()),
        }
    }

    /// Whether the lookup behind this record succeeded.
    pub fn is_success(&self) -> bool {
        self.status == RecordStatus::Success
    }

    /// Creation timestamp parsed to UTC, when present and well-formed.
    pub fn created_date(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref()?)
    }

    /// Last-modified timestamp parsed to UTC, when present and well-formed.
    pub fn modified_date(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.last_modified.as_deref()?)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
