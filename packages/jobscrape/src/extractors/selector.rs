use scraper::Selector;
use url::Url;

use super::{element_text, parse_selector, resolve_link, JobExtractor};
use crate::error::ScrapeResult;
use crate::fetcher::RenderedPage;
use crate::models::JobPosting;

/// CSS-selector driven extractor.
///
/// One posting per element matching `item`. Title comes from the `title`
/// sub-selector (else the item's own text), link from the `link`
/// sub-selector's href (else the item's href when it is an anchor), and id
/// from the `id_attr` attribute on the item, falling back to link then title.
pub struct SelectorExtractor {
    item: Selector,
    title: Option<Selector>,
    link: Option<Selector>,
    id_attr: Option<String>,
}

impl SelectorExtractor {
    pub fn new(
        item: &str,
        title: Option<&str>,
        link: Option<&str>,
        id_attr: Option<&str>,
    ) -> ScrapeResult<Self> {
        Ok(Self {
            item: parse_selector(item)?,
            title: title.map(parse_selector).transpose()?,
            link: link.map(parse_selector).transpose()?,
            id_attr: id_attr.map(str::to_string),
        })
    }
}

impl JobExtractor for SelectorExtractor {
    fn extract(&self, page: &RenderedPage) -> ScrapeResult<Vec<JobPosting>> {
        let document = page.document();
        let base = Url::parse(&page.final_url).ok();
        let mut jobs = Vec::new();

        for item in document.select(&self.item) {
            let title = match &self.title {
                Some(selector) => item.select(selector).next().map(element_text),
                None => Some(element_text(item)),
            };
            let Some(title) = title.filter(|t| !t.is_empty()) else {
                continue;
            };

            let href = match &self.link {
                Some(selector) => item
                    .select(selector)
                    .next()
                    .and_then(|el| el.value().attr("href")),
                None if item.value().name() == "a" => item.value().attr("href"),
                None => None,
            };
            let link = href.and_then(|href| resolve_link(base.as_ref(), href));

            let id = self
                .id_attr
                .as_deref()
                .and_then(|attr| item.value().attr(attr))
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .or_else(|| link.clone())
                .unwrap_or_else(|| title.clone());

            jobs.push(JobPosting { title, link, id });
        }

        Ok(jobs)
    }

    fn name(&self) -> &str {
        "selector"
    }
}
