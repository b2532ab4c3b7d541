//! Note store error types.

use thiserror::Error;

/// Errors raised by a [`NoteStore`](super::NoteStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be parsed or written as JSON
    #[error("Invalid notes data: {0}")]
    Serde(#[from] serde_json::Error),

    /// The note does not exist in the store
    #[error("Note not found: {0}")]
    NotFound(String),

    /// The store refused the operation
    #[error("Store rejected {operation}: {reason}")]
    Rejected { operation: String, reason: String },
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
