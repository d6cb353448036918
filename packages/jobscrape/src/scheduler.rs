//! Periodic scrape runs using tokio-cron-scheduler.
//!
//! ```text
//! Scheduler (cron, e.g. every hour)
//!     │
//!     └─► Runner::run()
//!             ├─► scrape + diff
//!             ├─► JobStore (known jobs, errors)
//!             └─► Notifier ("New jobs", "New scrape errors")
//! ```

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::error::Result;
use crate::runner::{RunOptions, Runner};

/// Start periodic runs on `cron` (six fields, seconds first).
///
/// The returned scheduler must be kept alive; dropping it stops the runs.
/// A failed run is logged and the next one still fires.
pub async fn start_scheduler(runner: Runner, options: RunOptions, cron: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(cron, move |_uuid, _lock| {
        let runner = runner.clone();
        let options = options.clone();
        Box::pin(async move {
            match runner.run(&options).await {
                Ok(summary) => tracing::info!(
                    new_jobs = summary.new_jobs.is_some(),
                    errors = summary.errors.is_some(),
                    has_new_errors = summary.has_new_errors,
                    "Scheduled scrape finished"
                ),
                Err(e) => tracing::error!("Scheduled scrape failed: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(cron = %cron, "Scheduled scraping started");
    Ok(scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::MockPageFetcher;
    use crate::notify::RecordingNotifier;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_invalid_cron_is_error() {
        let runner = Runner::new(
            "missing.toml",
            MockPageFetcher::new(),
            MemoryStore::new(),
            RecordingNotifier::new(),
        );

        let result = start_scheduler(runner, RunOptions::default(), "not a cron").await;
        assert!(result.is_err());
    }
}
