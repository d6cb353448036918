//! Mock page fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{PageFetcher, PageRequest, RenderedPage};
use crate::error::{ScrapeError, ScrapeResult};

#[derive(Debug, Clone)]
enum MockResponse {
    Html(String),
    Failure(String),
}

/// Mock fetcher with canned pages keyed by URL.
///
/// Unknown URLs answer with HTTP 404.
///
/// ```rust
/// use jobscrape::MockPageFetcher;
///
/// let fetcher = MockPageFetcher::new()
///     .with_page("https://acme.test/careers", "<body><a href='/jobs/1'>Engineer</a></body>")
///     .with_failure("https://broken.test/careers", "connection reset");
/// ```
#[derive(Default, Clone)]
pub struct MockPageFetcher {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    calls: Arc<RwLock<Vec<PageRequest>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn add_page(&self, url: &str, html: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(url.to_string(), MockResponse::Html(html.to_string()));
    }

    /// Fail every fetch of `url` with `message`.
    pub fn add_failure(&self, url: &str, message: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(url.to_string(), MockResponse::Failure(message.to_string()));
    }

    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.add_page(url, html);
        self
    }

    pub fn with_failure(self, url: &str, message: &str) -> Self {
        self.add_failure(url, message);
        self
    }

    /// Requests received so far, in order.
    pub fn calls(&self) -> Vec<PageRequest> {
        self.calls.read().unwrap().clone()
    }

    /// Check if a URL was fetched
    pub fn was_fetched(&self, url: &str) -> bool {
        self.calls.read().unwrap().iter().any(|c| c.url == url)
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch(&self, request: &PageRequest) -> ScrapeResult<RenderedPage> {
        self.calls.write().unwrap().push(request.clone());

        let response = self.responses.read().unwrap().get(&request.url).cloned();
        match response {
            Some(MockResponse::Html(html)) => Ok(RenderedPage::from_html(&request.url, html)),
            Some(MockResponse::Failure(message)) => Err(ScrapeError::Extraction(message)),
            None => Err(ScrapeError::Status {
                status: 404,
                url: request.url.clone(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
