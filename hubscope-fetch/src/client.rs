//! HTTP client with identifying headers and retry.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::error::FetchError;
use crate::retry::RetryPolicy;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Browser-style user agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; arm64 Mac OS X 14_5) \
                              AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125 Safari/537.36";

// ============================================================================
// HTTP Response
// ============================================================================

/// A response body paired with its status code.
///
/// Non-success statuses are values, not errors: callers decide what a
/// 404 or 503 means for them.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code of the response.
    pub status: StatusCode,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client with retry on transient network failures.
#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    retry: RetryPolicy,
    token: Option<String>,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(default_headers())
            .build()?;

        Ok(Self {
            inner: client,
            retry: RetryPolicy::default(),
            token: None,
        })
    }

    /// Sets the retry policy for this client.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Attaches a bearer token sent with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Performs a GET request, retrying transient network failures.
    ///
    /// Every HTTP status comes back as an [`HttpResponse`]. The retry
    /// budget is spent only on connection errors and timeouts, with a
    /// linearly growing delay between attempts.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let mut attempts = 0;
        let max_attempts = self.retry.max_attempts;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "Making GET request");

            let mut request = self.inner.get(url);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let result = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    response.text().await.map(|body| HttpResponse { status, body })
                }
                Err(e) => Err(e),
            };

            match result {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if attempts < max_attempts && self.retry.should_retry(&e) {
                        let delay = self.retry.delay_for_attempt(attempts);
                        warn!(
                            error = %e,
                            delay_secs = delay.as_secs(),
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("retry", &self.retry)
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

/// Fixed identifying headers sent with every request.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_returns_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let response = client.get(&format!("{}/page", server.uri())).await.unwrap();

        assert!(response.is_success());
        assert_eq!(response.body, "hello");
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_value() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            // A non-2xx response must be fetched exactly once.
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let response = client
            .get(&format!("{}/missing", server.uri()))
            .await
            .unwrap();

        assert!(!response.is_success());
        assert_eq!(response.status.as_u16(), 404);
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/private"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap().with_token("secret-token");
        let response = client
            .get(&format!("{}/private", server.uri()))
            .await
            .unwrap();

        assert_eq!(response.body, "ok");
    }
}
