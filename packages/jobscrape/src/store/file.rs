use async_trait::async_trait;
use chrono::Local;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{timestamped_path, to_pretty_json, JobStore, SaveTarget};
use crate::diff::KnownJobs;
use crate::error::{StoreError, StoreResult};
use crate::models::CompanyError;

/// Stores both documents as pretty-printed JSON files.
#[derive(Debug, Clone)]
pub struct FileStore {
    existing_jobs_path: PathBuf,
    errors_path: PathBuf,
}

impl FileStore {
    pub fn new(existing_jobs_path: impl Into<PathBuf>, errors_path: impl Into<PathBuf>) -> Self {
        Self {
            existing_jobs_path: existing_jobs_path.into(),
            errors_path: errors_path.into(),
        }
    }

    pub fn existing_jobs_path(&self) -> &Path {
        &self.existing_jobs_path
    }

    pub fn errors_path(&self) -> &Path {
        &self.errors_path
    }

    async fn read_json<T: DeserializeOwned + Default>(path: &Path) -> StoreResult<T> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored document, starting empty");
                return Ok(T::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    async fn write_json<T: serde::Serialize + Sync>(path: &Path, value: &T) -> StoreResult<()> {
        let json = to_pretty_json(value).map_err(|source| StoreError::Json {
            path: path.display().to_string(),
            source,
        })?;
        tokio::fs::write(path, json)
            .await
            .map_err(|source| StoreError::Io {
                path: path.display().to_string(),
                source,
            })
    }
}

#[async_trait]
impl JobStore for FileStore {
    async fn load_known_jobs(&self) -> StoreResult<KnownJobs> {
        Self::read_json(&self.existing_jobs_path).await
    }

    async fn save_known_jobs(&self, jobs: &KnownJobs, target: SaveTarget) -> StoreResult<String> {
        let path = match target {
            SaveTarget::Replace => self.existing_jobs_path.clone(),
            SaveTarget::Timestamped => timestamped_path(&self.existing_jobs_path, Local::now()),
        };
        Self::write_json(&path, jobs).await?;
        info!(path = %path.display(), "Wrote known jobs");
        Ok(path.display().to_string())
    }

    async fn load_errors(&self) -> StoreResult<Vec<CompanyError>> {
        Self::read_json(&self.errors_path).await
    }

    async fn save_errors(&self, errors: &[CompanyError]) -> StoreResult<()> {
        Self::write_json(&self.errors_path, &errors).await
    }
}
