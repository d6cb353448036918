//! "Has jobs" detection.
//!
//! Decides from a page's visible text whether it advertises any openings,
//! before any extraction is attempted.

use crate::error::{ScrapeError, ScrapeResult};
use crate::models::{Company, JobsPageStatus};

/// Phrases careers pages commonly show when nothing is open.
pub const GENERIC_NO_JOBS_PHRASES: &[&str] = &[
    "No available positions",
    "No positions",
    "Sorry",
    "No job",
    "No current",
    "No open",
    "None available",
    "Don't have",
    "don't currently",
    "No openings",
];

/// Check whether the page text advertises openings.
///
/// A company-specific `no_jobs_phrase` takes precedence over the generic
/// list. All matching is case-insensitive.
pub fn has_jobs(page_text: &str, company: &Company) -> ScrapeResult<(bool, JobsPageStatus)> {
    let text = page_text.to_lowercase();
    if text.trim().is_empty() {
        return Err(ScrapeError::EmptyPage {
            company: company.name.clone(),
        });
    }

    if let Some(phrase) = &company.no_jobs_phrase {
        if text.contains(&phrase.to_lowercase()) {
            return Ok((false, JobsPageStatus::SpecificNoJobsPhraseFound));
        }
        return Ok((true, JobsPageStatus::NoJobsPhraseNotFoundButNoJobs));
    }

    let has_jobs = GENERIC_NO_JOBS_PHRASES
        .iter()
        .all(|phrase| !text.contains(&phrase.to_lowercase()));

    let status = if has_jobs {
        JobsPageStatus::NoJobsPhraseNotFoundButNoJobs
    } else {
        JobsPageStatus::GenericNoJobsPhraseFound
    };

    Ok((has_jobs, status))
}
