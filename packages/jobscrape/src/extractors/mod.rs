//! Job extraction from rendered pages.
//!
//! Each company's [`ScraperSpec`] is resolved to a [`JobExtractor`] through an
//! [`ExtractorRegistry`]:
//!
//! - `selector` - CSS selectors for the posting element, title, link and id
//! - `links` - every anchor whose href contains a pattern
//! - `custom` - an extractor registered in code by name, for pages the two
//!   declarative kinds cannot describe

mod links;
mod selector;

pub use links::LinksExtractor;
pub use selector::SelectorExtractor;

use scraper::{ElementRef, Selector};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use crate::error::{ScrapeError, ScrapeResult};
use crate::fetcher::RenderedPage;
use crate::models::{JobPosting, ScraperSpec};

/// Pulls job postings out of a rendered jobs page.
pub trait JobExtractor: Send + Sync {
    fn extract(&self, page: &RenderedPage) -> ScrapeResult<Vec<JobPosting>>;

    /// Get the extractor name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Resolves scraper specs to extractors.
#[derive(Default, Clone)]
pub struct ExtractorRegistry {
    custom: HashMap<String, Arc<dyn JobExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom extractor under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, extractor: impl JobExtractor + 'static) {
        self.custom.insert(name.into(), Arc::new(extractor));
    }

    pub fn with_extractor(
        mut self,
        name: impl Into<String>,
        extractor: impl JobExtractor + 'static,
    ) -> Self {
        self.register(name, extractor);
        self
    }

    pub fn resolve(&self, spec: &ScraperSpec) -> ScrapeResult<Arc<dyn JobExtractor>> {
        match spec {
            ScraperSpec::Selector {
                item,
                title,
                link,
                id_attr,
            } => Ok(Arc::new(SelectorExtractor::new(
                item,
                title.as_deref(),
                link.as_deref(),
                id_attr.as_deref(),
            )?)),
            ScraperSpec::Links { href_contains } => {
                Ok(Arc::new(LinksExtractor::new(href_contains.clone())))
            }
            ScraperSpec::Custom { name } => {
                self.custom
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ScrapeError::UnknownScraper { name: name.clone() })
            }
        }
    }
}

pub(crate) fn parse_selector(selector: &str) -> ScrapeResult<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Element text with runs of whitespace collapsed to single spaces.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve an href against the page URL, skipping non-navigational links.
pub(crate) fn resolve_link(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
    {
        return None;
    }

    match base {
        Some(base) => base.join(href).ok().map(|url| url.to_string()),
        None => Url::parse(href).ok().map(|url| url.to_string()),
    }
}
