//! HTML listing scraper for the hub's public models page.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use scraper::{Html, Selector};
use tracing::{debug, instrument};

use hubscope_core::ModelId;
use hubscope_fetch::{FetchError, HttpClient};

// ============================================================================
// Constants
// ============================================================================

/// Public listing page, sorted by likes.
pub const HF_LIST_URL: &str = "https://huggingface.co/models?sort=likes";

/// Matches every anchor in the listing document.
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("Invalid selector"));

// ============================================================================
// Listing Scraper
// ============================================================================

/// Scrapes model identifiers out of the hub's HTML listing page.
pub struct ListingScraper {
    http: Arc<HttpClient>,
    list_url: String,
}

impl ListingScraper {
    /// Creates a scraper against the default listing page.
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            list_url: HF_LIST_URL.to_string(),
        }
    }

    /// Overrides the listing URL (used in tests).
    pub fn with_list_url(mut self, url: impl Into<String>) -> Self {
        self.list_url = url.into();
        self
    }

    /// Fetches the listing page and extracts up to `limit` identifiers.
    ///
    /// A non-2xx response is an error; a page without model links is an
    /// empty `Ok`.
    #[instrument(skip(self), fields(url = %self.list_url))]
    pub async fn fetch_identifiers(&self, limit: usize) -> Result<Vec<ModelId>, FetchError> {
        let response = self.http.get(&self.list_url).await?;
        if !response.is_success() {
            return Err(FetchError::status(response.status.as_u16()));
        }

        let identifiers = extract_identifiers(&response.body, limit);
        debug!(count = identifiers.len(), "Extracted identifiers from listing page");
        Ok(identifiers)
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Extracts model identifiers from listing-page HTML.
///
/// Anchors are scanned in document order and duplicates keep their first
/// occurrence. The result is truncated to `limit` only after
/// deduplication, so duplicate links never eat into the limit.
pub fn extract_identifiers(html: &str, limit: usize) -> Vec<ModelId> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut identifiers = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(id) = ModelId::from_href(href) else {
            continue;
        };
        if seen.insert(id.as_str().to_string()) {
            identifiers.push(id);
        }
    }

    // Drop search hits and percent-encoded paths that slip through href parsing.
    identifiers.retain(|id| !id.as_str().starts_with("search/") && !id.as_str().contains('%'));
    identifiers.truncate(limit);
    identifiers
}

// ============================================================================
// Tests
// ============================================================================
