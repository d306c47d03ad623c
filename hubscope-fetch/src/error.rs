//! Fetch error types.

use thiserror::Error;

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed at the network level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("HTTP {status}")]
    Status {
        /// The status code of the response.
        status: u16,
    },

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response structure did not match expectations.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl FetchError {
    /// Creates a status error from a response code.
    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }

    /// Whether this error is a network-level transport failure.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
