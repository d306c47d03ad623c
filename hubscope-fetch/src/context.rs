//! Fetch context shared by listing strategies.
//!
//! The fetch context is passed to all strategies and bundles the shared
//! HTTP client with the settings that govern how listings are fetched.

use std::sync::Arc;
use std::time::Duration;

use crate::client::HttpClient;
use crate::error::FetchError;
use crate::retry::RetryPolicy;
use crate::strategy::ListingKind;

// ============================================================================
// Source Mode
// ============================================================================

/// How to select listing strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceMode {
    /// Try the scrape strategy first, then fall back to the API.
    #[default]
    Auto,
    /// Only use the HTML scrape strategy.
    Scrape,
    /// Only use the hub API strategy.
    Api,
}

impl SourceMode {
    /// Returns true if this mode allows strategies of the given kind.
    pub fn allows(&self, kind: ListingKind) -> bool {
        match self {
            Self::Auto => true,
            Self::Scrape => kind == ListingKind::Scrape,
            Self::Api => kind == ListingKind::Api,
        }
    }
}

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for listing and enrichment fetches.
#[derive(Clone)]
pub struct FetchSettings {
    /// Which listing strategies to allow.
    pub source_mode: SourceMode,
    /// Timeout for each HTTP request.
    pub timeout: Duration,
    /// Total attempts per request, including the first.
    pub max_attempts: u32,
    /// Base delay between retries; grows linearly per attempt.
    pub retry_delay: Duration,
    /// Optional hub token attached as a bearer credential.
    pub token: Option<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            source_mode: SourceMode::Auto,
            timeout: Duration::from_secs(20),
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
            token: None,
        }
    }
}

impl FetchSettings {
    /// Creates settings for scrape-only mode.
    pub fn scrape_only() -> Self {
        Self {
            source_mode: SourceMode::Scrape,
            ..Default::default()
        }
    }

    /// Creates settings for API-only mode.
    pub fn api_only() -> Self {
        Self {
            source_mode: SourceMode::Api,
            ..Default::default()
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl std::fmt::Debug for FetchSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The token never appears in logs or debug output.
        f.debug_struct("FetchSettings")
            .field("source_mode", &self.source_mode)
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.max_attempts)
            .field("retry_delay", &self.retry_delay)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context provided to listing strategies.
///
/// The context owns the shared HTTP client, configured once from the
/// settings (timeout, retry budget, optional token) and reused by every
/// strategy and enrichment lookup.
pub struct FetchContext {
    /// HTTP client with retry.
    pub http: Arc<HttpClient>,
    /// Fetch settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a new fetch context with default settings.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_settings(FetchSettings::default())
    }

    /// Creates a context with custom settings.
    pub fn with_settings(settings: FetchSettings) -> Result<Self, FetchError> {
        let retry = RetryPolicy::new(settings.max_attempts)
            .with_base_delay(settings.retry_delay.as_secs());

        let mut client = HttpClient::with_timeout(settings.timeout)?.with_retry_policy(retry);
        if let Some(token) = &settings.token {
            client = client.with_token(token.clone());
        }

        Ok(Self {
            http: Arc::new(client),
            settings,
        })
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }

    /// Returns true if the given strategy kind is allowed.
    pub fn allows(&self, kind: ListingKind) -> bool {
        self.settings.source_mode.allows(kind)
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a [`FetchContext`].
pub struct FetchContextBuilder {
    http: Option<Arc<HttpClient>>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            http: None,
            settings: FetchSettings::default(),
        }
    }

    /// Sets a pre-built HTTP client, bypassing client construction.
    pub fn http(mut self, http: Arc<HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the fetch settings.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the source mode.
    pub fn source_mode(mut self, mode: SourceMode) -> Self {
        self.settings.source_mode = mode;
        self
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Sets the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.settings.token = Some(token.into());
        self
    }

    /// Builds the fetch context.
    pub fn build(self) -> Result<FetchContext, FetchError> {
        match self.http {
            Some(http) => Ok(FetchContext {
                http,
                settings: self.settings,
            }),
            None => FetchContext::with_settings(self.settings),
        }
    }
}

impl Default for FetchContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
