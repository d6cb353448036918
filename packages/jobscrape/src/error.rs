//! Typed errors for the scraper library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the binary can
//! attach its own context on top.

use thiserror::Error;

/// Top-level error for a scrape run.
#[derive(Debug, Error)]
pub enum Error {
    /// Companies file or settings could not be loaded
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// State could not be read or written
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Notification could not be delivered
    #[error("notify error: {0}")]
    Notify(#[from] NotifyError),

    /// Page fetcher could not be built
    #[error("fetcher setup failed: {0}")]
    Fetcher(#[from] ScrapeError),

    /// Scheduler could not be created or started
    #[error("scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Errors raised while scraping a single company.
///
/// These never abort a run; they are collected per company.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Page body had no text
    #[error("{company}: Error retrieving text")]
    EmptyPage { company: String },

    /// Active company has no jobs page configured
    #[error("{company}: no jobs page configured")]
    MissingJobsPage { company: String },

    /// Jobs exist but no scraper is configured for the company
    #[error("Scrape not implemented")]
    ScrapeNotImplemented,

    /// CSS selector in a scraper spec did not parse
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Scraper spec names an extractor that was never registered
    #[error("unknown custom scraper: {name}")]
    UnknownScraper { name: String },

    /// Extractor-specific failure
    #[error("extraction failed: {0}")]
    Extraction(String),
}

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Companies file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Companies file is not valid TOML for the expected shape
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Environment variable had an unusable value
    #[error("{name} is invalid: {reason}")]
    InvalidVar { name: String, reason: String },
}

/// Errors persisting run state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored document is not valid JSON for the expected shape
    #[error("JSON error on {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors delivering notifications.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint rejected the notification
    #[error("notification rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Result type alias for run operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for per-company scrape operations.
pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
