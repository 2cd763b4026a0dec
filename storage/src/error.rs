//! Storage error types.
//!
//! Used by the repository and the JSON file manager. Lookups that find nothing
//! return `None`/`false` rather than an error.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Returns a closure that wraps an `io::Error` with the path it happened on.
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
