//! State persistence.
//!
//! Two documents survive between runs: the known job ids and the previous
//! run's per-company errors. Where they live is up to the [`JobStore`]
//! implementation.
//!
//! # Available stores
//!
//! - `FileStore` - JSON files on local disk
//! - `MemoryStore` - In-memory, for tests

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::diff::KnownJobs;
use crate::error::StoreResult;
use crate::models::CompanyError;

/// Where an updated known-jobs document goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    /// Overwrite the document that was loaded
    Replace,
    /// Write a sibling copy with the current time in its name
    Timestamped,
}

/// Persists known job ids and per-company errors between runs.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Load known job ids; a missing document is empty.
    async fn load_known_jobs(&self) -> StoreResult<KnownJobs>;

    /// Save known job ids, returning the location written.
    async fn save_known_jobs(&self, jobs: &KnownJobs, target: SaveTarget) -> StoreResult<String>;

    /// Load the previous run's errors; a missing document is empty.
    async fn load_errors(&self) -> StoreResult<Vec<CompanyError>>;

    async fn save_errors(&self, errors: &[CompanyError]) -> StoreResult<()>;
}

/// Serialize as JSON with 4-space indentation.
pub fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// `existing_jobs.json` → `existing_jobs_2024-05-01_09:30:15.123456.json`
pub fn timestamped_path(path: &Path, now: DateTime<Local>) -> PathBuf {
    let stamp = now.format("%Y-%m-%d_%H:%M:%S%.6f");
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}_{}", stem, stamp),
    };
    path.with_file_name(file_name)
}
