//! Error types for cantodb-ingest
//!
//! Only the errors here stop a run. Per-document problems are reported as
//! events by the directory driver and processing moves on.

use crate::services::ScanError;
use thiserror::Error;

/// Fatal run errors
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input folder could not be listed
    #[error("Cannot read input directory: {0}")]
    DirectoryUnreadable(#[from] ScanError),

    /// Store could not be opened or initialized
    #[error("Store initialization failed: {0}")]
    Store(#[from] cantodb_common::Error),
}

/// Result type for whole-run operations
pub type IngestResult<T> = Result<T, IngestError>;
