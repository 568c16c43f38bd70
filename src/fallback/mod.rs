//! Fallback acquisition through an external tool.
//!
//! Used for records with no direct link, and for records whose direct
//! download failed. The tool is the last strategy: whatever it reports is
//! final for the record, and a failure lands in the error log.

mod command;
mod error;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

pub use command::{CommandTool, DEFAULT_TOOL_LABEL, DEFAULT_TOOL_PROGRAM};
pub use error::FallbackError;

use crate::download::{DelayPolicy, is_valid_pdf};
use crate::ledger::AcquisitionLog;
use crate::outcome::{AcquisitionSource, AttemptOutcome, FailureKind};
use crate::sanitize::pdf_filename;

/// Captured result of one tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Process exit code; `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl ToolOutput {
    /// True when the tool exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// External program that retrieves a paper by title into a given path.
#[async_trait]
pub trait AcquisitionTool: Send + Sync {
    /// Name written to the success log and used in failure reasons.
    fn label(&self) -> &str;

    /// Attempts to write the paper titled `title` to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`FallbackError`] only if the tool could not be run at all.
    async fn fetch(&self, title: &str, out: &Path) -> Result<ToolOutput, FallbackError>;
}

/// Runs the acquisition tool for a record and records the outcome.
pub struct FallbackAcquirer {
    tool: Arc<dyn AcquisitionTool>,
    log: Arc<dyn AcquisitionLog>,
    delay: Arc<dyn DelayPolicy>,
    verify_signature: bool,
}

impl std::fmt::Debug for FallbackAcquirer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackAcquirer")
            .field("tool", &self.tool.label())
            .field("verify_signature", &self.verify_signature)
            .finish_non_exhaustive()
    }
}

impl FallbackAcquirer {
    /// Creates an acquirer with signature verification enabled.
    #[must_use]
    pub fn new(
        tool: Arc<dyn AcquisitionTool>,
        log: Arc<dyn AcquisitionLog>,
        delay: Arc<dyn DelayPolicy>,
    ) -> Self {
        Self {
            tool,
            log,
            delay,
            verify_signature: true,
        }
    }

    /// Enables or disables the `%PDF-` signature check on the tool's output.
    #[must_use]
    pub fn with_signature_check(mut self, verify_signature: bool) -> Self {
        self.verify_signature = verify_signature;
        self
    }

    /// Attempts to acquire `folder/<title> - <authors>.pdf` through the tool.
    ///
    /// Earlier error-log lines for the record are cleared first. Any failure
    /// is appended to the error log as `"<label> failed"`.
    #[instrument(skip(self, folder), fields(tool = %self.tool.label()))]
    pub async fn attempt(&self, title: &str, authors: &str, folder: &Path) -> AttemptOutcome {
        let filename = pdf_filename(title, authors);

        if let Err(error) = self.log.clear_failure(title, authors) {
            warn!(error = %error, "could not clear earlier failure lines");
        }

        match self.log.exists(&filename) {
            Ok(true) => {
                info!(filename = %filename, "already acquired, skipping");
                return AttemptOutcome::AlreadyAcquired { filename };
            }
            Ok(false) => {}
            Err(error) => {
                warn!(error = %error, "success log unreadable, running tool anyway");
            }
        }

        self.delay.wait().await;

        let path = folder.join(&filename);
        let label = self.tool.label().to_string();
        info!("trying acquisition tool");

        let reason = match self.tool.fetch(title, &path).await {
            Ok(output) => {
                let file_ok = self.file_is_acceptable(&path).await;
                if output.success() && file_ok {
                    let source = AcquisitionSource::Tool(label);
                    match self.log.record_success(&filename, &source) {
                        Ok(()) => {
                            info!(path = %path.display(), "tool acquisition successful");
                            return AttemptOutcome::Acquired { filename, source };
                        }
                        Err(error) => {
                            warn!(error = %error, "could not record success");
                            error.to_string()
                        }
                    }
                } else {
                    debug!(
                        exit_code = ?output.exit_code,
                        stderr = %output.stderr.trim(),
                        file_ok,
                        "tool did not produce a PDF"
                    );
                    format!("{label} failed")
                }
            }
            Err(error) => {
                warn!(error = %error, "tool could not be run");
                format!("{label} failed")
            }
        };

        warn!(title = %title, "tool acquisition failed");
        if let Err(error) = self.log.record_failure(title, authors, &reason) {
            warn!(error = %error, "could not record failure");
        }
        AttemptOutcome::Failed(FailureKind::tool(reason))
    }

    /// True if `path` exists and, when checking is on, carries the PDF signature.
    /// A present but invalid file is deleted.
    async fn file_is_acceptable(&self, path: &Path) -> bool {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return false;
        }
        if !self.verify_signature || is_valid_pdf(path).await {
            return true;
        }
        info!(path = %path.display(), "invalid PDF detected, deleting");
        if let Err(error) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), error = %error, "could not delete non-PDF file");
        }
        false
    }
}
