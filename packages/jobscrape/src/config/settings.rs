use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Runtime settings loaded from environment variables
#[derive(Debug, Clone)]
pub struct Settings {
    /// Companies file (TOML)
    pub config_path: PathBuf,
    /// Known job ids (JSON)
    pub existing_jobs_path: PathBuf,
    /// Persisted per-company errors (JSON)
    pub errors_path: PathBuf,
    /// Where notifications are POSTed; logs only when unset
    pub webhook_url: Option<String>,
    /// Cron expression for scheduled runs (seconds field first)
    pub cron: String,
    pub http_timeout: Duration,
    pub rate_limit_ms: u64,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            config_path: lookup("JOBSCRAPE_CONFIG")
                .unwrap_or_else(|| "jobscrape.toml".to_string())
                .into(),
            existing_jobs_path: lookup("JOBSCRAPE_EXISTING_JOBS")
                .unwrap_or_else(|| "existing_jobs.json".to_string())
                .into(),
            errors_path: lookup("JOBSCRAPE_ERRORS")
                .unwrap_or_else(|| "errors.json".to_string())
                .into(),
            webhook_url: lookup("JOBSCRAPE_WEBHOOK_URL").filter(|url| !url.trim().is_empty()),
            cron: lookup("JOBSCRAPE_CRON").unwrap_or_else(|| "0 0 * * * *".to_string()),
            http_timeout: Duration::from_secs(parse_number(
                "JOBSCRAPE_HTTP_TIMEOUT_SECS",
                lookup("JOBSCRAPE_HTTP_TIMEOUT_SECS"),
                30,
            )?),
            rate_limit_ms: parse_number(
                "JOBSCRAPE_RATE_LIMIT_MS",
                lookup("JOBSCRAPE_RATE_LIMIT_MS"),
                0,
            )?,
        })
    }
}

fn parse_number(name: &str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidVar {
            name: name.to_string(),
            reason: format!("expected a whole number, got '{}'", raw),
        }),
    }
}
