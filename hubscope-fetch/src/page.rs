//! General page scraping to a title-and-text result.

use std::sync::Arc;
use std::sync::LazyLock;

use scraper::{Html, Node, Selector};
use tracing::{debug, instrument, warn};

use hubscope_core::ScrapeResult;

use crate::client::HttpClient;

/// Selector for the document title element.
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("Invalid selector"));

/// Fetches pages and reduces them to title and visible text.
///
/// Failures are encoded in the returned [`ScrapeResult`] rather than
/// raised, so callers always get a value describing the attempt.
#[derive(Debug, Clone)]
pub struct PageScraper {
    http: Arc<HttpClient>,
}

impl PageScraper {
    /// Creates a scraper over the given client.
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Fetches `url` and reduces the document to title and visible text.
    ///
    /// A non-success status or a network failure after retries produces
    /// an error-status result carrying the reason.
    #[instrument(skip(self))]
    pub async fn scrape(&self, url: &str) -> ScrapeResult {
        match self.http.get(url).await {
            Ok(response) if response.is_success() => {
                debug!(status = %response.status, bytes = response.body.len(), "Page fetched");
                let (title, text) = parse_page(&response.body);
                ScrapeResult::success(url, title, text)
            }
            Ok(response) => {
                warn!(status = %response.status, "Page fetch returned error status");
                ScrapeResult::failed(url, format!("HTTP {}", response.status.as_u16()))
            }
            Err(e) => {
                warn!(error = %e, "Page fetch failed");
                ScrapeResult::failed(url, e.to_string())
            }
        }
    }
}

/// Extracts the title and the script/style-free text of a document.
fn parse_page(html: &str) -> (Option<String>, String) {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());

    (title, visible_text(&document))
}

/// Collects text content in document order, skipping script and style
/// subtrees. Each text node is trimmed; nodes are joined with a space.
fn visible_text(document: &Html) -> String {
    let mut pieces: Vec<&str> = Vec::new();
    let mut stack = vec![document.tree.root()];

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Element(element) if matches!(element.name(), "script" | "style") => continue,
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    pieces.push(trimmed);
                }
            }
            _ => {}
        }

        // Push children reversed so the stack walks in document order
        let children: Vec<_> = node.children().collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }

    pieces.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r"
        <html>
          <head>
            <title> Example Page </title>
            <style>body { color: red; }</style>
          </head>
          <body>
            <h1>Heading</h1>
            <script>console.log('hidden');</script>
            <p>First paragraph.</p>
            <div><span>Nested</span> text</div>
          </body>
        </html>";

    #[test]
    fn test_parse_page_title_trimmed() {
        let (title, _) = parse_page(PAGE);
        assert_eq!(title.as_deref(), Some("Example Page"));
    }

    #[test]
    fn test_parse_page_skips_script_and_style() {
        let (_, text) = parse_page(PAGE);
        assert!(text.contains("Heading"));
        assert!(text.contains("First paragraph."));
        assert!(text.contains("Nested text"));
        assert!(!text.contains("hidden"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn test_parse_page_without_title() {
        let (title, text) = parse_page("<html><body><p>No title here</p></body></html>");
        assert!(title.is_none());
        assert_eq!(text, "No title here");
    }

    #[test]
    fn test_parse_page_tolerates_malformed_markup() {
        let (_, text) = parse_page("<p>Unclosed <b>bold <p>next");
        assert!(text.contains("Unclosed"));
        assert!(text.contains("next"));
    }

    #[tokio::test]
    async fn test_scrape_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let scraper = PageScraper::new(Arc::new(HttpClient::new().unwrap()));
        let result = scraper.scrape(&format!("{}/doc", server.uri())).await;

        assert!(result.is_success());
        assert_eq!(result.title.as_deref(), Some("Example Page"));
        assert!(result.text.contains("First paragraph."));
    }

    #[tokio::test]
    async fn test_scrape_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let scraper = PageScraper::new(Arc::new(HttpClient::new().unwrap()));
        let result = scraper.scrape(&format!("{}/doc", server.uri())).await;

        assert!(!result.is_success());
        assert_eq!(result.error.as_deref(), Some("HTTP 503"));
    }
}
