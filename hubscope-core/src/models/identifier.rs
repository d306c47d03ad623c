//! Model identifiers and the listing-page slug grammar.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// Slug Grammar
// ============================================================================

/// Pattern for a model page path: `/organization/name`.
static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/([A-Za-z0-9][A-Za-z0-9_.-]*)/([A-Za-z0-9][A-Za-z0-9_.-]*)$")
        .expect("Invalid regex")
});

/// Hub path segments that can never be an organization name.
const RESERVED_ORGS: &[&str] = &[
    "models",
    "datasets",
    "spaces",
    "docs",
    "search",
    "organizations",
    "settings",
    "pricing",
    "login",
    "join",
    "new",
    "collections",
    "tasks",
    "events",
    "api",
    "blog",
    "about",
    "terms",
    "privacy",
    "contact",
    "people",
];

// ============================================================================
// ModelId
// ============================================================================

/// An `organization/name` identifier for a single hub model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Creates an identifier from an already-structured source (API entries).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parses an identifier from an anchor href on a listing page.
    ///
    /// The query string and fragment are stripped before matching. Returns
    /// `None` when the remaining path does not match the slug grammar, when
    /// the organization segment is a reserved hub path, or when either
    /// segment contains `%` or `@`.
    pub fn from_href(href: &str) -> Option<Self> {
        let path = match href.split_once(['?', '#']) {
            Some((path, _)) => path,
            None => href,
        };

        let captures = SLUG_RE.captures(path)?;
        let org = captures.get(1)?.as_str();
        let name = captures.get(2)?.as_str();

        if org.contains(['%', '@']) || name.contains(['%', '@']) {
            return None;
        }
        if RESERVED_ORGS.contains(&org) {
            return None;
        }

        Some(Self(format!("{org}/{name}")))
    }

    /// The organization segment.
    pub fn org(&self) -> &str {
        self.0.split_once('/').map_or(self.0.as_str(), |(org, _)| org)
    }

    /// The model name segment.
    pub fn name(&self) -> &str {
        self.0.split_once('/').map_or("", |(_, name)| name)
    }

    /// The full `organization/name` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_href_valid_slug() {
        let id = ModelId::from_href("/meta-llama/Llama-3.1-8B").unwrap();
        assert_eq!(id.as_str(), "meta-llama/Llama-3.1-8B");
        assert_eq!(id.org(), "meta-llama");
        assert_eq!(id.name(), "Llama-3.1-8B");
    }

    #[test]
    fn test_from_href_strips_query_and_fragment() {
        let id = ModelId::from_href("/openai/whisper-large?library=transformers").unwrap();
        assert_eq!(id.as_str(), "openai/whisper-large");

        let id = ModelId::from_href("/openai/whisper-large#readme").unwrap();
        assert_eq!(id.as_str(), "openai/whisper-large");
    }

    #[test]
    fn test_from_href_rejects_reserved_orgs() {
        assert!(ModelId::from_href("/models/trending").is_none());
        assert!(ModelId::from_href("/datasets/squad").is_none());
        assert!(ModelId::from_href("/search/full-text").is_none());
        assert!(ModelId::from_href("/docs/transformers").is_none());
    }

    #[test]
    fn test_from_href_rejects_encoded_and_user_segments() {
        assert!(ModelId::from_href("/org/name%20space").is_none());
        assert!(ModelId::from_href("/user@host/model").is_none());
    }

    #[test]
    fn test_from_href_rejects_malformed_paths() {
        assert!(ModelId::from_href("/single-segment").is_none());
        assert!(ModelId::from_href("/a/b/c").is_none());
        assert!(ModelId::from_href("meta-llama/Llama-3.1-8B").is_none());
        assert!(ModelId::from_href("/-leading/dash").is_none());
        assert!(ModelId::from_href("//empty-org").is_none());
        assert!(ModelId::from_href("").is_none());
    }

    #[test]
    fn test_from_href_allows_dots_underscores_dashes() {
        let id = ModelId::from_href("/some_org/model.v2-final").unwrap();
        assert_eq!(id.as_str(), "some_org/model.v2-final");
    }

    #[test]
    fn test_display_matches_as_str() {
        let id = ModelId::new("google/gemma-2b");
        assert_eq!(id.to_string(), "google/gemma-2b");
    }

    #[test]
    fn test_accessors_on_unslashed_id() {
        let id = ModelId::new("standalone");
        assert_eq!(id.org(), "standalone");
        assert_eq!(id.name(), "");
    }

    #[test]
    fn test_serde_transparent() {
        let id = ModelId::new("google/gemma-2b");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""google/gemma-2b""#);

        let parsed: ModelId = serde_json::from_str(r#""bert-base/uncased""#).unwrap();
        assert_eq!(parsed.as_str(), "bert-base/uncased");
    }
}
