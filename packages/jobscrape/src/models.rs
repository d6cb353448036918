//! Core data types: companies, postings and page status.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single job posting pulled from a careers page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,

    #[serde(default)]
    pub link: Option<String>,

    /// Stable identifier used for diffing against known jobs
    pub id: String,
}

impl JobPosting {
    pub fn new(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: None,
            id: id.into(),
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// How to pull postings out of a company's jobs page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScraperSpec {
    /// One posting per element matching `item`
    Selector {
        item: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        link: Option<String>,
        #[serde(default)]
        id_attr: Option<String>,
    },

    /// Every anchor whose href contains `href_contains`
    Links { href_contains: String },

    /// Extractor registered in code under `name`
    Custom { name: String },
}

fn default_true() -> bool {
    true
}

fn default_sleep() -> u64 {
    1
}

/// An employer whose careers page is checked on each run.
///
/// Only `name`, `active`, `jobs_page`, `scraper`, the sleeps,
/// `no_jobs_phrase` and `relevant_search_terms` drive the scrape. The rest
/// is bookkeeping kept alongside the company in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,

    #[serde(default = "default_true")]
    pub active: bool,

    #[serde(default)]
    pub careers_landing_page: Option<String>,

    #[serde(default)]
    pub jobs_page: Option<String>,

    #[serde(default)]
    pub scraper: Option<ScraperSpec>,

    /// Seconds to wait after the page loads
    #[serde(default = "default_sleep")]
    pub load_sleep: u64,

    /// Seconds to wait after scrolling to the bottom
    #[serde(default = "default_sleep")]
    pub scroll_sleep: u64,

    #[serde(default)]
    pub diff_page: bool,

    #[serde(default)]
    pub location: Option<String>,

    /// Company-specific phrase shown when there are no openings
    #[serde(default)]
    pub no_jobs_phrase: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    /// Overrides the global search terms when non-empty
    #[serde(default)]
    pub relevant_search_terms: Option<Vec<String>>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub what: Option<String>,

    #[serde(default)]
    pub referral: Option<String>,

    #[serde(default)]
    pub application_history: Option<String>,
}

impl Company {
    /// Create an active company with every optional field unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            careers_landing_page: None,
            jobs_page: None,
            scraper: None,
            load_sleep: default_sleep(),
            scroll_sleep: default_sleep(),
            diff_page: false,
            location: None,
            no_jobs_phrase: None,
            notes: None,
            relevant_search_terms: None,
            tags: None,
            what: None,
            referral: None,
            application_history: None,
        }
    }

    pub fn with_jobs_page(mut self, url: impl Into<String>) -> Self {
        self.jobs_page = Some(url.into());
        self
    }

    pub fn with_scraper(mut self, scraper: ScraperSpec) -> Self {
        self.scraper = Some(scraper);
        self
    }

    pub fn with_no_jobs_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.no_jobs_phrase = Some(phrase.into());
        self
    }

    pub fn with_search_terms(mut self, terms: &[&str]) -> Self {
        self.relevant_search_terms = Some(terms.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn load_wait(&self) -> Duration {
        Duration::from_secs(self.load_sleep)
    }

    pub fn scroll_wait(&self) -> Duration {
        Duration::from_secs(self.scroll_sleep)
    }
}

/// What the jobs page said about openings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobsPageStatus {
    /// The company's own "no jobs" phrase was on the page
    SpecificNoJobsPhraseFound,
    /// One of the generic "no jobs" phrases was on the page
    GenericNoJobsPhraseFound,
    /// No "no jobs" phrase matched, yet nothing was extracted
    NoJobsPhraseNotFoundButNoJobs,
    /// At least one posting was extracted
    SomeJobFound,
}

impl JobsPageStatus {
    /// Whether a company ending in this status should be checked by hand.
    ///
    /// Either a generic phrase matched, which may be a false positive, or
    /// no phrase matched and no posting came out.
    pub fn needs_verification(self) -> bool {
        matches!(
            self,
            Self::GenericNoJobsPhraseFound | Self::NoJobsPhraseNotFoundButNoJobs
        )
    }
}

/// Persisted record of a company that failed to scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyError {
    pub company_name: String,
    pub message: String,
}

/// New postings for one company, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyGroup {
    pub company: Company,
    pub jobs: Vec<JobPosting>,
}
