// Command-line entry point for the career page scraper

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jobscrape::{FileStore, HttpPageFetcher, RunOptions, Runner, Settings};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jobscrape", about = "Scrape careers pages for new relevant jobs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape once and print a summary; no notifications
    Check {
        /// Path to file with existing jobs
        existing_jobs_json: PathBuf,

        /// Companies file (defaults to JOBSCRAPE_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        options: RunArgs,
    },
    /// Scrape once, persist state and send notifications
    Run {
        #[command(flatten)]
        options: RunArgs,
    },
    /// Run on the JOBSCRAPE_CRON schedule until interrupted
    Schedule {
        #[command(flatten)]
        options: RunArgs,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Search term to add in considering a job relevant
    #[arg(long, alias = "temp-term")]
    additional_search_term: Option<String>,

    /// Search only companies that contain this string in their name
    #[arg(long)]
    limit_company: Option<String>,

    /// Don't replace the existing jobs file
    #[arg(long)]
    dont_replace_existing: bool,

    /// Don't write the existing jobs file
    #[arg(long)]
    dont_write_existing: bool,
}

impl From<RunArgs> for RunOptions {
    fn from(args: RunArgs) -> Self {
        Self {
            limit_company: args.limit_company,
            additional_search_term: args.additional_search_term,
            dont_replace_existing: args.dont_replace_existing,
            dont_write_existing: args.dont_write_existing,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,jobscrape=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env().context("Failed to load settings")?;

    match cli.command {
        Command::Check {
            existing_jobs_json,
            config,
            options,
        } => {
            let fetcher = HttpPageFetcher::with_timeout(settings.http_timeout)
                .context("Failed to create HTTP client")?
                .with_rate_limit(settings.rate_limit_ms);
            let store = FileStore::new(&existing_jobs_json, &settings.errors_path);
            let runner = Runner::new(
                config.unwrap_or(settings.config_path),
                fetcher,
                store,
                jobscrape::ConsoleNotifier,
            );

            let outcome = runner
                .check(&options.into())
                .await
                .context("Scrape failed")?;

            println!("{}", outcome.summary);
            if let Some(path) = outcome.written {
                println!("Wrote new existing jobs to {}", path);
            }
        }
        Command::Run { options } => {
            let runner = Runner::from_settings(&settings).context("Failed to build runner")?;
            let summary = runner
                .run(&options.into())
                .await
                .context("Scrape run failed")?;

            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Schedule { options } => {
            let runner = Runner::from_settings(&settings).context("Failed to build runner")?;
            let _scheduler = jobscrape::start_scheduler(runner, options.into(), &settings.cron)
                .await
                .context("Failed to start scheduler")?;

            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for shutdown signal")?;
            tracing::info!("Shutting down");
        }
    }

    Ok(())
}
