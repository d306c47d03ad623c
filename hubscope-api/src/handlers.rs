//! API request handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use hubscope_core::{build_context, ContextReport, ModelId, ModelRecord, ScrapeResult};
use hubscope_fetch::{ListingPipeline, PageScraper};
use hubscope_providers::huggingface::{
    ApiListingStrategy, HubApiClient, ModelEnricher, ScrapeListingStrategy,
};

use crate::error::ApiError;
use crate::routes::AppState;

// ============================================================================
// Constants
// ============================================================================

const DEFAULT_LIMIT: usize = 20;
const MIN_LIMIT: usize = 1;
const MAX_LIMIT: usize = 100;

const RETRIEVAL_UNAVAILABLE: &str = "Unable to retrieve model data from Hugging Face";
const ENRICH_UNAVAILABLE: &str = "Unable to enrich model data";

// ============================================================================
// Request / Response Types
// ============================================================================

/// Service metadata returned at the root.
#[derive(Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

/// Health check body.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Query parameters for `/scrape`.
#[derive(Deserialize)]
pub struct ScrapeQuery {
    pub url: String,
    pub format: Option<String>,
}

/// Query parameters for `/models`.
#[derive(Deserialize)]
pub struct ModelsQuery {
    pub limit: Option<usize>,
    pub enrich: Option<bool>,
}

/// Query parameters for `/context`.
#[derive(Deserialize)]
pub struct ContextQuery {
    pub topic: Option<String>,
    pub limit: Option<usize>,
}

/// Response body for `/models`.
///
/// Plain listings carry `model_ids`; enriched listings carry `models`.
/// Exactly one of the two is present.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<ModelRecord>>,
    pub count: usize,
}

/// Rendering of a successful `/scrape`: the full result, or just its text.
#[derive(Debug)]
pub enum ScrapeResponse {
    Full(ScrapeResult),
    TextOnly(String),
}

impl IntoResponse for ScrapeResponse {
    fn into_response(self) -> Response {
        match self {
            ScrapeResponse::Full(result) => Json(result).into_response(),
            ScrapeResponse::TextOnly(text) => text.into_response(),
        }
    }
}

impl ModelsResponse {
    fn ids(identifiers: Vec<ModelId>) -> Self {
        Self {
            count: identifiers.len(),
            model_ids: Some(identifiers.into_iter().map(String::from).collect()),
            models: None,
        }
    }

    fn enriched(records: Vec<ModelRecord>) -> Self {
        Self {
            count: records.len(),
            model_ids: None,
            models: Some(records),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - Service metadata.
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "hubscope",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec!["/health", "/scrape", "/models", "/context"],
    })
}

/// GET /health - Service health check.
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: "hubscope",
            timestamp: chrono::Utc::now(),
        }),
    )
}

/// GET /scrape?url=...&format=json|text - Scrape one page for its title and
/// visible text.
pub async fn scrape(
    State(state): State<AppState>,
    Query(params): Query<ScrapeQuery>,
) -> Result<ScrapeResponse, ApiError> {
    let parsed = url::Url::parse(&params.url)
        .map_err(|_| ApiError::BadRequest(format!("Invalid URL: {}", params.url)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::BadRequest(
            "URL scheme must be http or https".to_string(),
        ));
    }

    let scraper = PageScraper::new(Arc::clone(&state.ctx.http));
    let result = scraper.scrape(parsed.as_str()).await;

    if !result.is_success() {
        let reason = result
            .error
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(ApiError::BadRequest(format!("Scrape failed: {reason}")));
    }

    if params.format.as_deref() == Some("text") {
        return Ok(ScrapeResponse::TextOnly(result.text));
    }
    Ok(ScrapeResponse::Full(result))
}

/// GET /models?limit=20&enrich=false - List identifiers, optionally enriched.
pub async fn models(
    State(state): State<AppState>,
    Query(params): Query<ModelsQuery>,
) -> Result<Json<ModelsResponse>, ApiError> {
    let limit = clamp_limit(params.limit);
    let identifiers = listed_identifiers(&state, limit).await?;

    if params.enrich.unwrap_or(false) {
        let records = enriched_records(&state, &identifiers).await?;
        return Ok(Json(ModelsResponse::enriched(records)));
    }

    Ok(Json(ModelsResponse::ids(identifiers)))
}

/// GET /context?topic=...&limit=20 - Aggregated context report.
pub async fn context(
    State(state): State<AppState>,
    Query(params): Query<ContextQuery>,
) -> Result<Json<ContextReport>, ApiError> {
    let limit = clamp_limit(params.limit);
    let identifiers = listed_identifiers(&state, limit).await?;
    let records = enriched_records(&state, &identifiers).await?;

    Ok(Json(build_context(&records, params.topic.as_deref())))
}

// ============================================================================
// Helpers
// ============================================================================

fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(MIN_LIMIT, MAX_LIMIT)
}

/// Lists identifiers through the cache, running the pipeline on a miss.
async fn listed_identifiers(
    state: &AppState,
    limit: usize,
) -> Result<Vec<ModelId>, ApiError> {
    if let Some(cached) = state.cache.get(limit).await {
        debug!(limit, "Listing served from cache");
        return Ok(cached);
    }

    let pipeline = ListingPipeline::with_strategies(vec![
        Box::new(ScrapeListingStrategy::new().with_list_url(state.config.list_url.clone())),
        Box::new(ApiListingStrategy::new().with_base_url(state.config.api_base.clone())),
    ]);
    let outcome = pipeline.execute(&state.ctx, limit).await;

    if outcome.is_empty() {
        return Err(ApiError::Unavailable(RETRIEVAL_UNAVAILABLE.to_string()));
    }

    state.cache.put(limit, outcome.identifiers.clone()).await;
    Ok(outcome.identifiers)
}

/// Enriches identifiers, treating a fully-failed batch as unavailable.
async fn enriched_records(
    state: &AppState,
    ids: &[ModelId],
) -> Result<Vec<ModelRecord>, ApiError> {
    let api = HubApiClient::new(Arc::clone(&state.ctx.http))
        .with_base_url(state.config.api_base.clone());
    let records = ModelEnricher::new(api).enrich(ids).await;

    if records.is_empty() {
        return Err(ApiError::Unavailable(ENRICH_UNAVAILABLE.to_string()));
    }

    Ok(records)
}

// ============================================================================
// Tests
// ============================================================================
