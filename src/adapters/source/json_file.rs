//! JSON file trip source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::TripRequest;
use crate::domain::ports::TripSource;

/// Reads a JSON array of trip requests from a file on each load.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TripSource for JsonFileSource {
    async fn load(&self) -> DomainResult<Vec<TripRequest>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|err| {
            DomainError::SourceRead(format!("{}: {err}", self.path.display()))
        })?;
        serde_json::from_slice(&bytes).map_err(|err| {
            DomainError::SourceParse(format!("{}: {err}", self.path.display()))
        })
    }
}
