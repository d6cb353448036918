use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::models::Company;

/// Companies file contents.
///
/// ```toml
/// search_terms = ["engineer", "developer"]
///
/// [[companies]]
/// name = "Acme"
/// jobs_page = "https://acme.test/careers"
/// no_jobs_phrase = "check back soon"
///
/// [companies.scraper]
/// kind = "links"
/// href_contains = "/careers/"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Global terms a title must contain (any of, case-insensitive)
    pub search_terms: Vec<String>,

    pub companies: Vec<Company>,
}

impl ScrapeConfig {
    /// Load the companies file from disk.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse companies file content; `origin` is only used in errors.
    pub fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }
}
