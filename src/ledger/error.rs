//! Error types for the acquisition logs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing an acquisition log.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// File system error on one of the log files.
    #[error("IO error on acquisition log {path}: {source}")]
    Io {
        /// The log file where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl LedgerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// No From<std::io::Error>: every variant needs the log path for context.
