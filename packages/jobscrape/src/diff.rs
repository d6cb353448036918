//! Diff relevant postings against previously seen job ids.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::ScrapeConfig;
use crate::extractors::ExtractorRegistry;
use crate::fetcher::PageFetcher;
use crate::models::{Company, CompanyGroup, JobPosting};
use crate::scrape::{get_relevant_jobs, CompanyFailure};

/// Job ids already seen, per company name.
///
/// Serializes as a JSON object of company name to a sorted array of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnownJobs(BTreeMap<String, BTreeSet<String>>);

impl KnownJobs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, company: &str, job_id: &str) -> bool {
        self.0
            .get(company)
            .is_some_and(|ids| ids.contains(job_id))
    }

    /// Record an id; returns `true` if it was not known before.
    pub fn insert(&mut self, company: &str, job_id: &str) -> bool {
        self.0
            .entry(company.to_string())
            .or_default()
            .insert(job_id.to_string())
    }

    /// Known ids for a company, sorted.
    pub fn ids(&self, company: &str) -> Vec<&str> {
        self.0
            .get(company)
            .map(|ids| ids.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn companies(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<C, I> FromIterator<(C, I)> for KnownJobs
where
    C: Into<String>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (C, I)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(company, ids)| {
                    let ids: BTreeSet<String> = ids.into_iter().map(Into::into).collect();
                    (company.into(), ids)
                })
                .collect(),
        )
    }
}

/// New postings grouped by company name, in the order companies first
/// produced one.
pub type NewJobs = IndexMap<String, CompanyGroup>;

/// Result of a scrape-and-diff pass.
#[derive(Debug, Default)]
pub struct DiffOutcome {
    pub new_jobs: NewJobs,
    /// Input known jobs plus every new id
    pub known_jobs: KnownJobs,
    pub verify_no_jobs: Vec<Company>,
    pub skipped_companies: Vec<String>,
    pub errors: Vec<CompanyFailure>,
}

/// Group postings whose ids are not yet known, recording them as known.
///
/// An id repeated within `relevant_jobs` is reported once.
pub fn diff_relevant_jobs(
    relevant_jobs: Vec<(Company, JobPosting)>,
    known_jobs: &mut KnownJobs,
) -> NewJobs {
    let mut new_jobs = NewJobs::new();

    for (company, job) in relevant_jobs {
        if !known_jobs.insert(&company.name, &job.id) {
            continue;
        }
        new_jobs
            .entry(company.name.clone())
            .or_insert_with(|| CompanyGroup {
                company,
                jobs: Vec::new(),
            })
            .jobs
            .push(job);
    }

    new_jobs
}

/// Scrape every company and diff the relevant postings against `known_jobs`.
pub async fn get_new_relevant_jobs(
    fetcher: &dyn PageFetcher,
    registry: &ExtractorRegistry,
    config: &ScrapeConfig,
    mut known_jobs: KnownJobs,
    limit_company: Option<&str>,
    additional_search_term: Option<&str>,
) -> DiffOutcome {
    let report = get_relevant_jobs(
        fetcher,
        registry,
        config,
        limit_company,
        additional_search_term,
    )
    .await;

    let new_jobs = diff_relevant_jobs(report.relevant_jobs, &mut known_jobs);

    tracing::info!(
        companies_with_new_jobs = new_jobs.len(),
        new_jobs = new_jobs.values().map(|g| g.jobs.len()).sum::<usize>(),
        "Diff complete"
    );

    DiffOutcome {
        new_jobs,
        known_jobs,
        verify_no_jobs: report.verify_no_jobs,
        skipped_companies: report.skipped_companies,
        errors: report.errors,
    }
}
