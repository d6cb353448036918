//! Page fetching.
//!
//! A [`PageFetcher`] turns a company's jobs page URL into a [`RenderedPage`]:
//! the final HTML plus its visible body text. Rendering JavaScript-heavy
//! pages is left to external fetchers plugged in through the trait.
//!
//! # Available fetchers
//!
//! - `HttpPageFetcher` - Plain HTTP fetch, no JavaScript
//! - `MockPageFetcher` - For testing

mod http;
mod mock;

pub use http::HttpPageFetcher;
pub use mock::MockPageFetcher;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Node, Selector};
use std::time::Duration;

use crate::error::ScrapeResult;
use crate::models::Company;

/// Elements whose text never shows up on screen.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start and end a line of rendered text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table",
    "tr", "ul",
];

/// Table cells render side by side, separated by whitespace.
const CELL_ELEMENTS: &[&str] = &["td", "th"];

/// What to fetch and how long a rendering fetcher should let it settle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,
    /// Wait after the initial load
    pub load_wait: Duration,
    /// Wait after scrolling to the bottom to trigger lazy loading
    pub scroll_wait: Duration,
}

impl PageRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            load_wait: Duration::ZERO,
            scroll_wait: Duration::ZERO,
        }
    }

    /// Build the request for a company's jobs page, if it has one.
    pub fn for_company(company: &Company) -> Option<Self> {
        let url = company.jobs_page.as_ref()?;
        Some(Self {
            url: url.clone(),
            load_wait: company.load_wait(),
            scroll_wait: company.scroll_wait(),
        })
    }
}

/// A fetched page ready for detection and extraction.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// URL that was requested
    pub url: String,
    /// URL after redirects; relative links resolve against this
    pub final_url: String,
    pub html: String,
    /// Visible body text, one line per block element
    pub text: String,
    pub fetched_at: DateTime<Utc>,
}

impl RenderedPage {
    /// Build a page from raw HTML, extracting its visible text.
    pub fn from_html(url: impl Into<String>, html: impl Into<String>) -> Self {
        let url = url.into();
        let html = html.into();
        let text = visible_text(&Html::parse_document(&html));
        Self {
            final_url: url.clone(),
            url,
            html,
            text,
            fetched_at: Utc::now(),
        }
    }

    pub fn with_final_url(mut self, final_url: impl Into<String>) -> Self {
        self.final_url = final_url.into();
        self
    }

    /// Parse the HTML for selector queries.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }
}

/// Collect the text a reader would see in the page body.
///
/// Inline content (`a`, `strong`, `span`, ...) flows into the surrounding
/// line, so phrases split across tags stay intact. Block elements break
/// lines and whitespace runs collapse to a single space.
pub fn visible_text(document: &Html) -> String {
    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next());
    let root = body.unwrap_or_else(|| document.root_element());

    let mut text = TextLines::default();
    collect_text(root, &mut text);
    text.finish()
}

fn collect_text(element: ElementRef<'_>, out: &mut TextLines) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if HIDDEN_ELEMENTS.contains(&name) {
                continue;
            }

            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                out.break_line();
            }
            collect_text(child_element, out);
            if block {
                out.break_line();
            } else if CELL_ELEMENTS.contains(&name) {
                out.current.push(' ');
            }
        } else if let Node::Text(text) = child.value() {
            out.current.push_str(text);
        }
    }
}

#[derive(Default)]
struct TextLines {
    lines: Vec<String>,
    current: String,
}

impl TextLines {
    fn break_line(&mut self) {
        let line = self.current.split_whitespace().collect::<Vec<_>>().join(" ");
        if !line.is_empty() {
            self.lines.push(line);
        }
        self.current.clear();
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines.join("\n")
    }
}

/// Fetches and renders jobs pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page.
    async fn fetch(&self, request: &PageRequest) -> ScrapeResult<RenderedPage>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
