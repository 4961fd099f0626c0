//! Error types for the dashboard worker
//!
//! Uses thiserror for ergonomic error definitions.
//! All errors are non-panicking; every failure path ends in a degraded view.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Dashboard worker errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Artifact could not be retrieved (network/transport failure)
    #[error("Retrieval error for {resource}: {reason}")]
    Retrieval { resource: String, reason: String },

    /// Artifact host answered with a non-success status
    #[error("Artifact {resource} returned HTTP {status}")]
    Status { resource: String, status: u16 },

    /// Aggregate failure: one or more required artifacts did not load
    #[error("Required artifacts failed to load: {}", .0.join("; "))]
    RequiredArtifacts(Vec<String>),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Worker runtime errors
    #[error("Worker error: {0}")]
    Worker(String),
}

impl DashboardError {
    /// Retrieval error for a named artifact
    pub fn retrieval(resource: &str, reason: impl std::fmt::Display) -> Self {
        DashboardError::Retrieval {
            resource: resource.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<worker::Error> for DashboardError {
    fn from(err: worker::Error) -> Self {
        DashboardError::Worker(err.to_string())
    }
}

impl From<DashboardError> for worker::Error {
    fn from(err: DashboardError) -> Self {
        worker::Error::RustError(err.to_string())
    }
}
