//! Storage error types.
//!
//! Produced while reading or writing the sessions file. The store never returns them from
//! `load`/`save` directly; they travel inside [`crate::LoadOutcome`] / [`crate::SaveOutcome`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when persisting or restoring sessions.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid sessions file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize sessions: {0}")]
    Serialize(#[source] serde_json::Error),
}
