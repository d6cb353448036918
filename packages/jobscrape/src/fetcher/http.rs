//! HTTP-based page fetcher.
//!
//! Fetches the jobs page with reqwest and extracts body text with `scraper`.
//! No JavaScript rendering, so the load and scroll waits are ignored.

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, warn};

use super::{PageFetcher, PageRequest, RenderedPage};
use crate::error::{ScrapeError, ScrapeResult};

/// Browser-like User-Agent; some careers sites refuse obvious bots
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Plain HTTP fetcher for static careers pages.
pub struct HttpPageFetcher {
    client: reqwest::Client,
    rate_limit_ms: u64,
}

impl HttpPageFetcher {
    /// Create a fetcher with a 30 second timeout.
    pub fn new() -> ScrapeResult<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a fetcher with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> ScrapeResult<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US,en;q=0.5"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            rate_limit_ms: 0,
        })
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Set rate limiting delay after each request (milliseconds).
    pub fn with_rate_limit(mut self, ms: u64) -> Self {
        self.rate_limit_ms = ms;
        self
    }

    async fn fetch_html(&self, url: &str) -> ScrapeResult<(String, String)> {
        reqwest::Url::parse(url).map_err(|_| ScrapeError::InvalidUrl {
            url: url.to_string(),
        })?;

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            ScrapeError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let final_url = response.url().to_string();
        let html = response.text().await?;
        Ok((html, final_url))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, request: &PageRequest) -> ScrapeResult<RenderedPage> {
        debug!(url = %request.url, "HTTP fetch starting");

        let (html, final_url) = self.fetch_html(&request.url).await?;
        let mut page = RenderedPage::from_html(&request.url, html).with_final_url(final_url);
        page.fetched_at = Utc::now();

        debug!(
            url = %request.url,
            final_url = %page.final_url,
            text_length = page.text.len(),
            "Page fetched"
        );

        if self.rate_limit_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.rate_limit_ms)).await;
        }

        Ok(page)
    }

    fn name(&self) -> &str {
        "http"
    }
}
