//! One full scrape run: load state, scrape, diff, persist, notify.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::{ScrapeConfig, Settings};
use crate::diff::{get_new_relevant_jobs, DiffOutcome};
use crate::error::Result;
use crate::errors::track_errors;
use crate::extractors::ExtractorRegistry;
use crate::fetcher::{HttpPageFetcher, PageFetcher};
use crate::notify::{ConsoleNotifier, Notifier, WebhookNotifier};
use crate::report::{console_summary, format_new_jobs_message};
use crate::store::{FileStore, JobStore, SaveTarget};

pub const NEW_JOBS_SUBJECT: &str = "New jobs";
pub const NEW_ERRORS_SUBJECT: &str = "New scrape errors";

/// Per-run switches.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Only scrape companies whose name contains this (case-insensitive)
    pub limit_company: Option<String>,
    /// Extra search term for this run only
    pub additional_search_term: Option<String>,
    /// Write known jobs to a timestamped copy instead of replacing them
    pub dont_replace_existing: bool,
    /// Never write known jobs
    pub dont_write_existing: bool,
}

impl RunOptions {
    fn save_target(&self) -> Option<SaveTarget> {
        if self.dont_write_existing {
            None
        } else if self.dont_replace_existing {
            Some(SaveTarget::Timestamped)
        } else {
            Some(SaveTarget::Replace)
        }
    }
}

/// Result of a managed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// New jobs message, when anything was new
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_jobs: Option<String>,
    /// All errors message, when anything failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
    /// Where known jobs were written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_jobs_written: Option<String>,
    pub has_new_errors: bool,
}

/// Result of a local check.
#[derive(Debug, Clone)]
pub struct LocalOutcome {
    /// Colored console summary
    pub summary: String,
    pub new_job_count: usize,
    /// Where known jobs were written
    pub written: Option<String>,
}

/// Runs scrapes against a companies file with pluggable collaborators.
#[derive(Clone)]
pub struct Runner {
    config_path: PathBuf,
    fetcher: Arc<dyn PageFetcher>,
    registry: ExtractorRegistry,
    store: Arc<dyn JobStore>,
    notifier: Arc<dyn Notifier>,
}

impl Runner {
    pub fn new(
        config_path: impl Into<PathBuf>,
        fetcher: impl PageFetcher + 'static,
        store: impl JobStore + 'static,
        notifier: impl Notifier + 'static,
    ) -> Self {
        Self {
            config_path: config_path.into(),
            fetcher: Arc::new(fetcher),
            registry: ExtractorRegistry::new(),
            store: Arc::new(store),
            notifier: Arc::new(notifier),
        }
    }

    /// Build the default runner: HTTP fetcher, JSON files, webhook if set.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let fetcher = HttpPageFetcher::with_timeout(settings.http_timeout)?
            .with_rate_limit(settings.rate_limit_ms);
        let store = FileStore::new(&settings.existing_jobs_path, &settings.errors_path);

        let runner = match &settings.webhook_url {
            Some(url) => Self::new(
                &settings.config_path,
                fetcher,
                store,
                WebhookNotifier::new(url)?,
            ),
            None => Self::new(&settings.config_path, fetcher, store, ConsoleNotifier),
        };
        Ok(runner)
    }

    /// Use a registry holding custom extractors.
    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    async fn scrape(&self, options: &RunOptions) -> Result<DiffOutcome> {
        // Re-read every run so edits apply without a restart
        let config = ScrapeConfig::load(&self.config_path).await?;
        let known_jobs = self.store.load_known_jobs().await?;

        info!(
            config = %self.config_path.display(),
            companies = config.companies.len(),
            search_terms = config.search_terms.len(),
            "Starting scrape run"
        );

        Ok(get_new_relevant_jobs(
            self.fetcher.as_ref(),
            &self.registry,
            &config,
            known_jobs,
            options.limit_company.as_deref(),
            options.additional_search_term.as_deref(),
        )
        .await)
    }

    /// Managed run: persist state and publish notifications.
    pub async fn run(&self, options: &RunOptions) -> Result<RunSummary> {
        let outcome = self.scrape(options).await?;
        let mut summary = RunSummary::default();

        if !outcome.new_jobs.is_empty() {
            let message = format_new_jobs_message(&outcome.new_jobs);

            if let Some(target) = options.save_target() {
                let written = self
                    .store
                    .save_known_jobs(&outcome.known_jobs, target)
                    .await?;
                summary.known_jobs_written = Some(written);
            }

            self.notifier.publish(NEW_JOBS_SUBJECT, &message).await?;
            info!("New jobs:{}", message);
            summary.new_jobs = Some(message);
        }

        let previous_errors = self.store.load_errors().await?;
        let update = track_errors(&previous_errors, &outcome.errors);

        if let Some(message) = &update.errors_message {
            if update.has_new_errors {
                self.notifier.publish(NEW_ERRORS_SUBJECT, message).await?;
            }
            info!(has_new_errors = update.has_new_errors, "{}", message);
        }
        if let Some(errors) = &update.persist {
            self.store.save_errors(errors).await?;
        }

        summary.errors = update.errors_message;
        summary.has_new_errors = update.has_new_errors;
        Ok(summary)
    }

    /// Local run: no notifications or error tracking, console summary only.
    pub async fn check(&self, options: &RunOptions) -> Result<LocalOutcome> {
        let outcome = self.scrape(options).await?;
        let summary = console_summary(&outcome.new_jobs, &outcome.verify_no_jobs, &outcome.errors);
        let new_job_count = outcome.new_jobs.values().map(|g| g.jobs.len()).sum();

        let mut written = None;
        if !outcome.new_jobs.is_empty() {
            if let Some(target) = options.save_target() {
                written = Some(
                    self.store
                        .save_known_jobs(&outcome.known_jobs, target)
                        .await?,
                );
            }
        }

        Ok(LocalOutcome {
            summary,
            new_job_count,
            written,
        })
    }
}
