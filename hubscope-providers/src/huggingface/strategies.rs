//! Listing strategies for the hub provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use hubscope_fetch::{
    FetchContext, FetchError, ListingKind, ListingPipeline, ListingResult, ListingStrategy,
};

use super::api::{HubApiClient, HF_API_BASE};
use super::listing::{ListingScraper, HF_LIST_URL};

/// Builds the default pipeline: HTML scrape first, hub API as fallback.
pub fn default_pipeline() -> ListingPipeline {
    ListingPipeline::with_strategies(vec![
        Box::new(ScrapeListingStrategy::new()),
        Box::new(ApiListingStrategy::new()),
    ])
}

// ============================================================================
// HTML Scrape Strategy
// ============================================================================

/// Lists models by scraping the public listing page.
pub struct ScrapeListingStrategy {
    list_url: String,
}

impl ScrapeListingStrategy {
    /// Creates the strategy against the default listing page.
    pub fn new() -> Self {
        Self {
            list_url: HF_LIST_URL.to_string(),
        }
    }

    /// Overrides the listing URL (used in tests).
    pub fn with_list_url(mut self, url: impl Into<String>) -> Self {
        self.list_url = url.into();
        self
    }
}

impl Default for ScrapeListingStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingStrategy for ScrapeListingStrategy {
    fn id(&self) -> &str {
        "huggingface.scrape"
    }

    fn kind(&self) -> ListingKind {
        ListingKind::Scrape
    }

    async fn is_available(&self, ctx: &FetchContext) -> bool {
        ctx.allows(ListingKind::Scrape)
    }

    #[instrument(skip(self, ctx))]
    async fn fetch(&self, ctx: &FetchContext, limit: usize) -> Result<ListingResult, FetchError> {
        let scraper =
            ListingScraper::new(Arc::clone(&ctx.http)).with_list_url(self.list_url.clone());
        let identifiers = scraper.fetch_identifiers(limit).await?;
        Ok(ListingResult::new(identifiers, self.id(), self.kind()))
    }

    fn priority(&self) -> u32 {
        100 // Preferred source
    }
}

// ============================================================================
// Hub API Strategy
// ============================================================================

/// Lists models through the hub's JSON API.
pub struct ApiListingStrategy {
    api_base: String,
}

impl ApiListingStrategy {
    /// Creates the strategy against the default API base.
    pub fn new() -> Self {
        Self {
            api_base: HF_API_BASE.to_string(),
        }
    }

    /// Overrides the API base URL (used in tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }
}

impl Default for ApiListingStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingStrategy for ApiListingStrategy {
    fn id(&self) -> &str {
        "huggingface.api"
    }

    fn kind(&self) -> ListingKind {
        ListingKind::Api
    }

    async fn is_available(&self, ctx: &FetchContext) -> bool {
        ctx.allows(ListingKind::Api)
    }

    #[instrument(skip(self, ctx))]
    async fn fetch(&self, ctx: &FetchContext, limit: usize) -> Result<ListingResult, FetchError> {
        let client =
            HubApiClient::new(Arc::clone(&ctx.http)).with_base_url(self.api_base.clone());
        let identifiers = client.list_models(limit).await?;
        Ok(ListingResult::new(identifiers, self.id(), self.kind()))
    }

    fn priority(&self) -> u32 {
        50 // Fallback when scraping yields nothing
    }
}
