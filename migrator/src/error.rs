use std::path::PathBuf;
use thiserror::Error;

/// Global error type for the migrator CLI.
#[derive(Error, Debug)]
pub enum MigratorError {
    /// Underlying IO failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A document failed to decode or re-encode.
    #[error("document error: {0}")]
    Insight(#[from] insight::InsightError),

    /// One or more lines in the input file failed to process.
    #[error("{failed} of {total} documents in {path:?} failed")]
    FailedLines {
        path: PathBuf,
        failed: usize,
        total: usize,
    },
}

/// A specialized Result type for migrator operations.
pub type Result<T> = std::result::Result<T, MigratorError>;
