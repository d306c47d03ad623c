//! Integration tests for the public aggregation API.

use hubscope_core::{build_context, ModelId, ModelRecord, RecordStatus};

fn record(id: &str, likes: u64, pipeline_tag: Option<&str>) -> ModelRecord {
    ModelRecord {
        model_id: ModelId::new(id),
        likes,
        downloads: likes * 10,
        tags: Vec::new(),
        pipeline_tag: pipeline_tag.map(String::from),
        license: None,
        created_at: None,
        last_modified: None,
        status: RecordStatus::Success,
        error: None,
    }
}

#[test]
fn test_report_serialization_roundtrip() {
    let records = vec![
        record("org/a", 5, Some("text-generation")),
        record("org/b", 9, Some("fill-mask")),
    ];
    let report = build_context(&records, None);

    let json = serde_json::to_string(&report).unwrap();
    let parsed: hubscope_core::ContextReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.total_models, 2);
    assert_eq!(parsed.total_likes, 14);
    assert_eq!(parsed.top_models[0].model_id.as_str(), "org/b");
}

#[test]
fn test_identifier_feeds_aggregation() {
    let id = ModelId::from_href("/org/model?sort=likes").unwrap();
    let report = build_context(&[record(id.as_str(), 1, None)], Some("org/model"));
    assert_eq!(report.total_models, 1);
}
