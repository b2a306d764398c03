//! Error types for drive-stats
//!
//! This module defines the error hierarchy covering:
//! - Per-row record validation errors (recoverable)
//! - Configuration and CLI errors (fatal)
//! - Worker thread errors
//! - I/O and CSV errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Row-level errors are skipped, file-level errors abort the file,
//!   configuration errors abort the run
//! - Preserve error chains for debugging

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the drive-stats application
#[derive(Error, Debug)]
pub enum StatsError {
    /// Record validation errors
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("worker error: {0}")]
    Worker(#[from] WorkerError),

    /// CSV decoding/encoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation errors for a single snapshot row
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Date token could not be parsed at all
    #[error("malformed date '{token}'")]
    MalformedDate { token: String },

    /// Row content is out of bounds or schema-incompatible
    #[error("invalid record: {reason}")]
    InvalidRecord { reason: String },
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Input path does not exist
    #[error("input path '{path}' does not exist")]
    InputNotFound { path: PathBuf },

    /// Output file must carry the expected table extension
    #[error("unsupported output extension for '{path}': expected .{expected}")]
    UnsupportedExtension { path: PathBuf, expected: &'static str },

    /// Invalid worker count
    #[error("invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Output path error
    #[error("invalid output path '{path}': {reason}")]
    InvalidOutputPath { path: PathBuf, reason: String },
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked
    #[error("worker {id} panicked")]
    Panicked { id: usize },

    /// Worker thread could not be spawned
    #[error("failed to spawn worker {id}: {reason}")]
    SpawnFailed { id: usize, reason: String },
}

/// Result type alias for StatsError
pub type Result<T> = std::result::Result<T, StatsError>;

/// Represents the outcome of ingesting a single snapshot file
#[derive(Debug)]
pub enum FileOutcome {
    /// File fully processed
    Success {
        path: PathBuf,
        rows_folded: u64,
        rows_skipped: u64,
    },

    /// File aborted mid-way; rows folded before the failure are kept
    Failed { path: PathBuf, error: StatsError },
}

impl FileOutcome {
    /// Returns true if this outcome represents success
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Success { .. })
    }

    /// Returns the path associated with this outcome
    pub fn path(&self) -> &std::path::Path {
        match self {
            FileOutcome::Success { path, .. } => path,
            FileOutcome::Failed { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_display() {
        let err = RecordError::MalformedDate {
            token: "20-19-05".into(),
        };
        assert_eq!(err.to_string(), "malformed date '20-19-05'");

        let err = RecordError::InvalidRecord {
            reason: "month out of bounds".into(),
        };
        assert!(err.to_string().contains("month out of bounds"));
    }

    #[test]
    fn test_error_conversion() {
        let rec_err = RecordError::MalformedDate { token: "x".into() };
        let stats_err: StatsError = rec_err.into();
        assert!(matches!(stats_err, StatsError::Record(_)));
    }

    #[test]
    fn test_file_outcome() {
        let outcome = FileOutcome::Success {
            path: PathBuf::from("/data/2019-05-02.csv"),
            rows_folded: 10,
            rows_skipped: 1,
        };
        assert!(outcome.is_success());
        assert_eq!(outcome.path(), std::path::Path::new("/data/2019-05-02.csv"));
    }
}
