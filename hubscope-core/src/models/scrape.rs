//! Results of fetching and parsing a single page.

use serde::{Deserialize, Serialize};

/// Outcome marker for a page scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeStatus {
    /// The page was fetched and parsed.
    Success,
    /// The fetch or parse failed; the result carries the error message.
    Error,
}

/// The outcome of scraping one URL.
///
/// Failures are encoded in the value rather than raised, so a scrape
/// always yields a result describing what happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// The URL that was fetched.
    pub url: String,
    /// Contents of the `<title>` element, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Document text with script and style content removed.
    #[serde(default)]
    pub text: String,
    /// Whether the fetch and parse succeeded.
    pub status: ScrapeStatus,
    /// Failure reason when `status` is [`ScrapeStatus::Error`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResult {
    /// Creates a successful result.
    pub fn success(url: impl Into<String>, title: Option<String>, text: String) -> Self {
        Self {
            url: url.into(),
            title,
            text,
            status: ScrapeStatus::Success,
            error: None,
        }
    }

    /// Creates a failed result carrying the error message.
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            text: String::new(),
            status: ScrapeStatus::Error,
            error: Some(error.into()),
        }
    }

    /// Whether the scrape succeeded.
    pub fn is_success(&self) -> bool {
        self.status == ScrapeStatus::Success
    }
}
