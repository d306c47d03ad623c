//! JSON client for the hub's model API.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use hubscope_core::{ModelId, ModelRecord, RecordStatus};
use hubscope_fetch::{FetchError, HttpClient};

// ============================================================================
// Constants
// ============================================================================

/// Base URL of the model API.
pub const HF_API_BASE: &str = "https://huggingface.co/api/models";

// ============================================================================
// Response Types
// ============================================================================

/// One entry in the API listing response.
///
/// The hub sends both `id` and `modelId` for the same value, so the two
/// keys are kept as separate fields instead of serde aliases.
#[derive(Debug, Deserialize)]
struct ApiModelEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "modelId")]
    model_id: Option<String>,
}

impl ApiModelEntry {
    fn identifier(self) -> Option<ModelId> {
        self.model_id.or(self.id).map(ModelId::new)
    }
}

/// The per-model detail response.
#[derive(Debug, Deserialize)]
struct ApiModelDetail {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "modelId")]
    model_id: Option<String>,
    #[serde(default)]
    likes: u64,
    #[serde(default)]
    downloads: u64,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    pipeline_tag: Option<String>,
    #[serde(default)]
    license: Option<String>,
    #[serde(default, alias = "createdAt")]
    created_at: Option<String>,
    #[serde(default, alias = "lastModified")]
    last_modified: Option<String>,
    #[serde(default, alias = "cardData")]
    card_data: Option<CardData>,
}

/// The slice of the model card this crate reads.
#[derive(Debug, Deserialize)]
struct CardData {
    #[serde(default)]
    license: Option<String>,
}

impl ApiModelDetail {
    fn into_record(self, requested: &ModelId) -> ModelRecord {
        // Card metadata wins over the top-level license field.
        let license = self.card_data.and_then(|card| card.license).or(self.license);
        ModelRecord {
            model_id: self
                .model_id
                .or(self.id)
                .map_or_else(|| requested.clone(), ModelId::new),
            likes: self.likes,
            downloads: self.downloads,
            tags: self.tags,
            pipeline_tag: self.pipeline_tag,
            license,
            created_at: self.created_at,
            last_modified: self.last_modified,
            status: RecordStatus::Success,
            error: None,
        }
    }
}

// ============================================================================
// API Client
// ============================================================================

/// Client for the hub's JSON model API.
pub struct HubApiClient {
    http: Arc<HttpClient>,
    base_url: String,
}

impl HubApiClient {
    /// Creates a client against the default API base.
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            base_url: HF_API_BASE.to_string(),
        }
    }

    /// Overrides the API base URL (used in tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Lists up to `limit` model identifiers, most-liked first.
    #[instrument(skip(self), fields(limit))]
    pub async fn list_models(&self, limit: usize) -> Result<Vec<ModelId>, FetchError> {
        let url = format!("{}?sort=likes&direction=-1&limit={limit}", self.base_url);
        let response = self.http.get(&url).await?;
        if !response.is_success() {
            return Err(FetchError::status(response.status.as_u16()));
        }

        let entries: Vec<ApiModelEntry> = serde_json::from_str(&response.body)?;
        let identifiers: Vec<ModelId> = entries
            .into_iter()
            .filter_map(ApiModelEntry::identifier)
            .take(limit)
            .collect();
        debug!(count = identifiers.len(), "Listed models via hub API");
        Ok(identifiers)
    }

    /// Looks up detail metadata for one model.
    ///
    /// Failures are folded into the record itself: a non-success status
    /// or unparseable body yields an error record, never an `Err`.
    #[instrument(skip(self), fields(model = %id))]
    pub async fn model_detail(&self, id: &ModelId) -> ModelRecord {
        let url = format!("{}/{}", self.base_url, id);
        match self.http.get(&url).await {
            Ok(response) if response.is_success() => {
                match serde_json::from_str::<ApiModelDetail>(&response.body) {
                    Ok(detail) => detail.into_record(id),
                    Err(e) => {
                        debug!(error = %e, "Detail response did not parse");
                        ModelRecord::failed(id.clone(), e.to_string())
                    }
                }
            }
            Ok(response) => {
                let status = response.status.as_u16();
                debug!(status, "Detail lookup returned non-success status");
                ModelRecord::failed(id.clone(), format!("HTTP {status}"))
            }
            Err(e) => ModelRecord::failed(id.clone(), e.to_string()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> HubApiClient {
        let http = Arc::new(HttpClient::new().unwrap());
        HubApiClient::new(http).with_base_url(server.uri())
    }

    #[test]
    fn test_detail_parses_real_shape() {
        let raw = r#"{
            "_id": "621ffdc136468d709f17434d",
            "id": "openai/whisper-large-v3",
            "modelId": "openai/whisper-large-v3",
            "likes": 4512,
            "downloads": 2984201,
            "tags": ["audio", "speech-recognition"],
            "pipeline_tag": "automatic-speech-recognition",
            "createdAt": "2023-11-07T18:36:53.000Z",
            "lastModified": "2024-08-12T09:25:47.000Z",
            "cardData": {"license": "apache-2.0", "language": ["en"]},
            "siblings": [{"rfilename": "config.json"}]
        }"#;

        let detail: ApiModelDetail = serde_json::from_str(raw).unwrap();
        let record = detail.into_record(&ModelId::new("openai/whisper-large-v3"));

        assert!(record.is_success());
        assert_eq!(record.model_id.as_str(), "openai/whisper-large-v3");
        assert_eq!(record.likes, 4512);
        assert_eq!(record.downloads, 2_984_201);
        assert_eq!(record.license.as_deref(), Some("apache-2.0"));
        assert_eq!(
            record.pipeline_tag.as_deref(),
            Some("automatic-speech-recognition")
        );
        assert_eq!(record.created_at.as_deref(), Some("2023-11-07T18:36:53.000Z"));
    }

    #[test]
    fn test_detail_license_falls_back_to_top_level() {
        let raw = r#"{"id": "org/model", "license": "mit"}"#;
        let detail: ApiModelDetail = serde_json::from_str(raw).unwrap();
        let record = detail.into_record(&ModelId::new("org/model"));
        assert_eq!(record.license.as_deref(), Some("mit"));
    }

    #[test]
    fn test_detail_card_license_wins() {
        let raw = r#"{"id": "org/model", "license": "mit", "cardData": {"license": "apache-2.0"}}"#;
        let detail: ApiModelDetail = serde_json::from_str(raw).unwrap();
        let record = detail.into_record(&ModelId::new("org/model"));
        assert_eq!(record.license.as_deref(), Some("apache-2.0"));
    }

    #[test]
    fn test_detail_defaults_for_sparse_payload() {
        let detail: ApiModelDetail = serde_json::from_str("{}").unwrap();
        let record = detail.into_record(&ModelId::new("org/model"));
        assert!(record.is_success());
        assert_eq!(record.model_id.as_str(), "org/model");
        assert_eq!(record.likes, 0);
        assert!(record.tags.is_empty());
        assert!(record.license.is_none());
    }

    #[tokio::test]
    async fn test_list_models_parses_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("sort", "likes"))
            .and(query_param("direction", "-1"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[
                    {"id": "org/first", "modelId": "org/first"},
                    {"modelId": "org/second"},
                    {"unrelated": true}
                ]"#,
            ))
            .mount(&server)
            .await;

        let ids = client(&server).list_models(2).await.unwrap();
        let names: Vec<&str> = ids.iter().map(ModelId::as_str).collect();
        assert_eq!(names, vec!["org/first", "org/second"]);
    }

    #[tokio::test]
    async fn test_list_models_non_2xx_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server).list_models(10).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[tokio::test]
    async fn test_list_models_invalid_json_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server).list_models(10).await.unwrap_err();
        assert!(matches!(err, FetchError::Json(_)));
    }

    #[tokio::test]
    async fn test_model_detail_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/org/model"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"id": "org/model", "likes": 7, "downloads": 11, "pipeline_tag": "text-generation"}"#,
            ))
            .mount(&server)
            .await;

        let record = client(&server).model_detail(&ModelId::new("org/model")).await;
        assert!(record.is_success());
        assert_eq!(record.likes, 7);
        assert_eq!(record.downloads, 11);
    }

    #[tokio::test]
    async fn test_model_detail_non_2xx_fails_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/org/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let record = client(&server)
            .model_detail(&ModelId::new("org/missing"))
            .await;
        assert!(!record.is_success());
        assert_eq!(record.error.as_deref(), Some("HTTP 404"));
    }

    #[tokio::test]
    async fn test_model_detail_parse_error_fails_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/org/model"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let record = client(&server).model_detail(&ModelId::new("org/model")).await;
        assert!(!record.is_success());
        assert!(record.error.is_some());
    }
}
