//! Listing strategy trait and types.
//!
//! A strategy represents one method of producing a model identifier list
//! from the hub. Strategies are tried in priority order by the listing
//! pipeline, with lower-priority ones serving as fallbacks.

use async_trait::async_trait;
use hubscope_core::ModelId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::context::FetchContext;
use crate::error::FetchError;

// ============================================================================
// Listing Kind
// ============================================================================

/// The kind of acquisition mechanism a strategy uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    /// HTML listing page scraping
    Scrape,
    /// Structured hub API
    Api,
}

impl ListingKind {
    /// Returns the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Scrape => "HTML Scrape",
            Self::Api => "Hub API",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Listing Result
// ============================================================================

/// The result of a successful listing fetch.
#[derive(Debug, Clone)]
pub struct ListingResult {
    /// The extracted identifiers, deduplicated, in first-seen order.
    pub identifiers: Vec<ModelId>,
    /// The strategy that produced them.
    pub strategy_id: String,
    /// The kind of acquisition used.
    pub kind: ListingKind,
}

impl ListingResult {
    /// Creates a new listing result.
    pub fn new(
        identifiers: Vec<ModelId>,
        strategy_id: impl Into<String>,
        kind: ListingKind,
    ) -> Self {
        Self {
            identifiers,
            strategy_id: strategy_id.into(),
            kind,
        }
    }
}

// ============================================================================
// Listing Strategy Trait
// ============================================================================

/// A strategy for producing a model identifier list.
///
/// The pipeline tries strategies in priority order until one yields a
/// non-empty list. A strategy that returns an empty list is treated the
/// same as a failed one: the next strategy gets its turn.
///
/// ## Implementing a Strategy
///
/// ```ignore
/// struct ScrapeListingStrategy;
///
/// #[async_trait]
/// impl ListingStrategy for ScrapeListingStrategy {
///     fn id(&self) -> &str {
///         "huggingface.scrape"
///     }
///
///     fn kind(&self) -> ListingKind {
///         ListingKind::Scrape
///     }
///
///     async fn is_available(&self, ctx: &FetchContext) -> bool {
///         ctx.allows(ListingKind::Scrape)
///     }
///
///     async fn fetch(&self, ctx: &FetchContext, limit: usize) -> Result<ListingResult, FetchError> {
///         // Fetch the listing page and extract identifiers
///     }
/// }
/// ```
#[async_trait]
pub trait ListingStrategy: Send + Sync {
    /// Unique identifier for this strategy (e.g., "huggingface.scrape").
    ///
    /// Format: `{provider}.{method}`
    fn id(&self) -> &str;

    /// The kind of acquisition this strategy uses.
    fn kind(&self) -> ListingKind;

    /// Human-readable name for this strategy.
    fn display_name(&self) -> String {
        format!("{} ({})", self.id(), self.kind().display_name())
    }

    /// Check if this strategy is currently eligible.
    ///
    /// This should be a quick check (not network-dependent), typically
    /// against the context's source mode.
    async fn is_available(&self, ctx: &FetchContext) -> bool;

    /// Produce an identifier list of at most `limit` entries.
    async fn fetch(&self, ctx: &FetchContext, limit: usize) -> Result<ListingResult, FetchError>;

    /// Whether to try the next strategy if this one fails with the given error.
    fn should_fallback(&self, _error: &FetchError) -> bool {
        true
    }

    /// Priority of this strategy (higher = try first).
    ///
    /// Default priorities:
    /// - Scrape: 100 (preferred, sees the ranked listing page)
    /// - API: 50 (fallback)
    fn priority(&self) -> u32 {
        match self.kind() {
            ListingKind::Scrape => 100,
            ListingKind::Api => 50,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_kind_display() {
        assert_eq!(ListingKind::Scrape.display_name(), "HTML Scrape");
        assert_eq!(ListingKind::Api.display_name(), "Hub API");
        assert_eq!(ListingKind::Api.to_string(), "Hub API");
    }

    #[test]
    fn test_listing_kind_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&ListingKind::Scrape).unwrap(),
            r#""scrape""#
        );
        assert_eq!(
            serde_json::to_string(&ListingKind::Api).unwrap(),
            r#""api""#
        );
    }

    #[test]
    fn test_listing_result_new() {
        let result = ListingResult::new(
            vec![ModelId::new("org/model")],
            "huggingface.scrape",
            ListingKind::Scrape,
        );
        assert_eq!(result.identifiers.len(), 1);
        assert_eq!(result.strategy_id, "huggingface.scrape");
    }
}
