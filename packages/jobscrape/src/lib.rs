//! Career Page Scraper
//!
//! Periodically checks employer career pages, picks out postings whose titles
//! match configured search terms, and diffs them against the set of job ids
//! already seen. New postings and persistent per-company failures are
//! published through a [`Notifier`].
//!
//! # Pipeline
//!
//! ```text
//! Company ─► PageFetcher ─► has_jobs ─► JobExtractor ─► relevance ─► diff
//!                                                                     │
//!                                   JobStore (known ids, errors) ◄────┤
//!                                   Notifier ("New jobs", errors) ◄───┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use jobscrape::{FileStore, HttpPageFetcher, ConsoleNotifier, Runner, RunOptions};
//!
//! let runner = Runner::new(
//!     "jobscrape.toml",
//!     HttpPageFetcher::new()?,
//!     FileStore::new("existing_jobs.json", "errors.json"),
//!     ConsoleNotifier,
//! );
//! let summary = runner.run(&RunOptions::default()).await?;
//! ```
//!
//! # Modules
//!
//! - [`models`] - Companies, postings and page status
//! - [`config`] - Companies file and environment settings
//! - [`fetcher`] - Page fetching (HTTP and mock)
//! - [`detector`] - "Has jobs" detection
//! - [`extractors`] - Job extraction from rendered pages
//! - [`scrape`] - Per-company scrape and relevance filter
//! - [`diff`] - Diff against known job ids
//! - [`report`] - Message formatting and console summary
//! - [`errors`] - Persistent per-company error tracking
//! - [`store`] - State persistence
//! - [`notify`] - Notification delivery
//! - [`runner`] - One full run
//! - [`scheduler`] - Periodic runs

pub mod config;
pub mod detector;
pub mod diff;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod fetcher;
pub mod models;
pub mod notify;
pub mod report;
pub mod runner;
pub mod scheduler;
pub mod scrape;
pub mod store;

#[cfg(test)]
mod testing;

pub use config::{ScrapeConfig, Settings};
pub use detector::{has_jobs, GENERIC_NO_JOBS_PHRASES};
pub use diff::{diff_relevant_jobs, get_new_relevant_jobs, DiffOutcome, KnownJobs, NewJobs};
pub use error::{ConfigError, Error, NotifyError, Result, ScrapeError, StoreError};
pub use errors::{track_errors, ErrorUpdate};
pub use extractors::{ExtractorRegistry, JobExtractor, LinksExtractor, SelectorExtractor};
pub use fetcher::{HttpPageFetcher, MockPageFetcher, PageFetcher, PageRequest, RenderedPage};
pub use models::{Company, CompanyError, CompanyGroup, JobPosting, JobsPageStatus, ScraperSpec};
pub use notify::{ConsoleNotifier, Notification, Notifier, RecordingNotifier, WebhookNotifier};
pub use report::{console_summary, format_errors_message, format_new_jobs_message};
pub use runner::{LocalOutcome, RunOptions, RunSummary, Runner};
pub use scheduler::start_scheduler;
pub use scrape::{
    get_company_relevant_jobs, get_relevant_jobs, title_is_relevant, CompanyFailure, ScrapeReport,
};
pub use store::{FileStore, JobStore, MemoryStore, SaveTarget};
