//! Domain errors for the Wayline enrichment pipeline.

use thiserror::Error;

/// Domain-level errors that can occur in the Wayline system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Route request failed: {0}")]
    RouteRequest(String),

    #[error("Route service returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Trip source read failed: {0}")]
    SourceRead(String),

    #[error("Trip source returned malformed data: {0}")]
    SourceParse(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

/// Shorthand result type used throughout the domain and service layers.
pub type DomainResult<T> = Result<T, DomainError>;

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        Self::RouteRequest(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SourceParse(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        Self::SourceRead(err.to_string())
    }
}
