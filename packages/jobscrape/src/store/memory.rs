use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::{JobStore, SaveTarget};
use crate::diff::KnownJobs;
use crate::error::StoreResult;
use crate::models::CompanyError;

#[derive(Default)]
struct MemoryState {
    known_jobs: KnownJobs,
    errors: Vec<CompanyError>,
    saves: Vec<(SaveTarget, KnownJobs)>,
    error_saves: usize,
}

/// In-memory store for tests.
///
/// Timestamped saves are recorded but never replace the loaded document,
/// matching how a file store leaves the original in place.
#[derive(Default, Clone)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_known_jobs(self, known_jobs: KnownJobs) -> Self {
        self.state.write().unwrap().known_jobs = known_jobs;
        self
    }

    pub fn with_errors(self, errors: Vec<CompanyError>) -> Self {
        self.state.write().unwrap().errors = errors;
        self
    }

    /// Current known-jobs document.
    pub fn known_jobs(&self) -> KnownJobs {
        self.state.read().unwrap().known_jobs.clone()
    }

    /// Current errors document.
    pub fn errors(&self) -> Vec<CompanyError> {
        self.state.read().unwrap().errors.clone()
    }

    /// Every known-jobs save, in order.
    pub fn saves(&self) -> Vec<(SaveTarget, KnownJobs)> {
        self.state.read().unwrap().saves.clone()
    }

    /// Number of times the errors document was written.
    pub fn error_save_count(&self) -> usize {
        self.state.read().unwrap().error_saves
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn load_known_jobs(&self) -> StoreResult<KnownJobs> {
        Ok(self.known_jobs())
    }

    async fn save_known_jobs(&self, jobs: &KnownJobs, target: SaveTarget) -> StoreResult<String> {
        let mut state = self.state.write().unwrap();
        state.saves.push((target, jobs.clone()));
        let location = match target {
            SaveTarget::Replace => {
                state.known_jobs = jobs.clone();
                "memory://existing_jobs".to_string()
            }
            SaveTarget::Timestamped => format!("memory://existing_jobs_{}", state.saves.len()),
        };
        Ok(location)
    }

    async fn load_errors(&self) -> StoreResult<Vec<CompanyError>> {
        Ok(self.errors())
    }

    async fn save_errors(&self, errors: &[CompanyError]) -> StoreResult<()> {
        let mut state = self.state.write().unwrap();
        state.errors = errors.to_vec();
        state.error_saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replace_and_timestamped_saves() {
        let store = MemoryStore::new();
        let first: KnownJobs = [("Acme", vec!["1"])].into_iter().collect();
        let second: KnownJobs = [("Acme", vec!["1", "2"])].into_iter().collect();

        store.save_known_jobs(&first, SaveTarget::Replace).await.unwrap();
        let location = store
            .save_known_jobs(&second, SaveTarget::Timestamped)
            .await
            .unwrap();

        assert_eq!(location, "memory://existing_jobs_2");
        assert_eq!(store.load_known_jobs().await.unwrap(), first);
        assert_eq!(store.saves().len(), 2);
    }

    #[tokio::test]
    async fn test_errors_document() {
        let store = MemoryStore::new().with_errors(vec![CompanyError {
            company_name: "Acme".to_string(),
            message: "boom".to_string(),
        }]);

        assert_eq!(store.load_errors().await.unwrap().len(), 1);
        store.save_errors(&[]).await.unwrap();
        assert!(store.errors().is_empty());
        assert_eq!(store.error_save_count(), 1);
    }
}
