//! Error types for the fallback acquisition tool.

use thiserror::Error;

/// Errors raised while running the external acquisition tool.
#[derive(Debug, Error)]
pub enum FallbackError {
    /// The tool process could not be started (missing binary, permissions).
    #[error("failed to launch {program}: {source}")]
    Launch {
        /// Program that was executed.
        program: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },
}

impl FallbackError {
    /// Creates a launch error.
    pub fn launch(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }
}
