//! API route definitions.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use hubscope_fetch::FetchContext;
use hubscope_providers::huggingface::{HF_API_BASE, HF_LIST_URL};

use crate::cache::ListingCache;
use crate::handlers;

/// Upstream endpoints the service talks to.
pub struct ServiceConfig {
    /// Listing page scraped for identifiers.
    pub list_url: String,
    /// Base URL for JSON listing and detail lookups.
    pub api_base: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            list_url: HF_LIST_URL.to_string(),
            api_base: HF_API_BASE.to_string(),
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<FetchContext>,
    pub cache: Arc<ListingCache>,
    pub config: Arc<ServiceConfig>,
}

/// Create the main API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/scrape", get(handlers::scrape))
        .route("/models", get(handlers::models))
        .route("/context", get(handlers::context))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
