//! Error types for run setup.

use std::path::PathBuf;

use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that abort a run before any record is processed.
///
/// Page and record failures are never surfaced here; they are logged and
/// counted in [`RunStats`](super::RunStats).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The run folder could not be created.
    #[error("failed to create run folder {path}: {source}")]
    CreateFolder {
        /// Folder that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The acquisition logs could not be opened or reset.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl PipelineError {
    /// Creates a folder creation error.
    pub fn create_folder(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateFolder {
            path: path.into(),
            source,
        }
    }
}
