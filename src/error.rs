//! Error types for the annotation store.
//!
//! The error surface is deliberately shallow: identifier lookups return
//! `Option` rather than erroring, blank-input mutations silently no-op, and
//! only persistence itself can genuinely fail.

use thiserror::Error;

/// Failures loading or saving persisted state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode/decode persisted state: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Failed to commit state file: {0}")]
    Commit(String),
}

impl From<tempfile::PersistError> for StoreError {
    fn from(err: tempfile::PersistError) -> Self {
        StoreError::Commit(err.to_string())
    }
}
