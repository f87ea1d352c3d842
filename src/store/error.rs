use std::io;

use thiserror::Error;
use uuid::Uuid;

/// Errors raised at the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error while reading or writing the data file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("project not found: {0}")]
    ProjectNotFound(Uuid),

    #[error("phase not found: {0}")]
    PhaseNotFound(Uuid),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
