use scraper::Selector;
use std::collections::HashSet;
use url::Url;

use super::{element_text, parse_selector, resolve_link, JobExtractor};
use crate::error::ScrapeResult;
use crate::fetcher::RenderedPage;
use crate::models::JobPosting;

/// Treats every anchor whose href contains a pattern as a posting.
///
/// Works for the many boards that render each opening as a single link to
/// its detail page. The resolved href doubles as the job id.
pub struct LinksExtractor {
    href_contains: String,
}

impl LinksExtractor {
    pub fn new(href_contains: impl Into<String>) -> Self {
        Self {
            href_contains: href_contains.into(),
        }
    }
}

impl JobExtractor for LinksExtractor {
    fn extract(&self, page: &RenderedPage) -> ScrapeResult<Vec<JobPosting>> {
        let anchors: Selector = parse_selector("a[href]")?;
        let document = page.document();
        let base = Url::parse(&page.final_url).ok();

        let mut seen = HashSet::new();
        let mut jobs = Vec::new();

        for anchor in document.select(&anchors) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !href.contains(&self.href_contains) {
                continue;
            }
            let Some(link) = resolve_link(base.as_ref(), href) else {
                continue;
            };
            let title = element_text(anchor);
            if title.is_empty() || !seen.insert(link.clone()) {
                continue;
            }

            jobs.push(JobPosting {
                title,
                id: link.clone(),
                link: Some(link),
            });
        }

        Ok(jobs)
    }

    fn name(&self) -> &str {
        "links"
    }
}
