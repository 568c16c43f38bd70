//! Direct download strategy: fetch a record's PDF link into the run folder.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::client::HttpClient;
use super::delay::DelayPolicy;
use super::error::DownloadError;
use super::signature::is_valid_pdf;
use crate::ledger::AcquisitionLog;
use crate::outcome::{AcquisitionSource, AttemptOutcome, FailureKind};
use crate::sanitize::pdf_filename;

/// Downloads a record's direct link and records the outcome in the log.
///
/// Never propagates errors: every failure becomes [`AttemptOutcome::Failed`]
/// so the caller can fall back to the next strategy.
pub struct Downloader {
    client: HttpClient,
    log: Arc<dyn AcquisitionLog>,
    delay: Arc<dyn DelayPolicy>,
    verify_signature: bool,
}

impl std::fmt::Debug for Downloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Downloader")
            .field("client", &self.client)
            .field("verify_signature", &self.verify_signature)
            .finish_non_exhaustive()
    }
}

impl Downloader {
    /// Creates a downloader with signature verification enabled.
    #[must_use]
    pub fn new(
        client: HttpClient,
        log: Arc<dyn AcquisitionLog>,
        delay: Arc<dyn DelayPolicy>,
    ) -> Self {
        Self {
            client,
            log,
            delay,
            verify_signature: true,
        }
    }

    /// Enables or disables the `%PDF-` signature check on written files.
    #[must_use]
    pub fn with_signature_check(mut self, verify_signature: bool) -> Self {
        self.verify_signature = verify_signature;
        self
    }

    /// Attempts to fetch `url` into `folder/<title> - <authors>.pdf`.
    ///
    /// If the filename is already in the success log, returns
    /// [`AttemptOutcome::AlreadyAcquired`] without touching the network.
    #[instrument(skip(self, folder))]
    pub async fn attempt(
        &self,
        url: &str,
        title: &str,
        authors: &str,
        folder: &Path,
    ) -> AttemptOutcome {
        let filename = pdf_filename(title, authors);

        match self.log.exists(&filename) {
            Ok(true) => {
                info!(filename = %filename, "already acquired, skipping");
                return AttemptOutcome::AlreadyAcquired { filename };
            }
            Ok(false) => {}
            Err(error) => {
                warn!(error = %error, "success log unreadable");
                return AttemptOutcome::Failed(FailureKind::transport(error.to_string()));
            }
        }

        self.delay.wait().await;

        let path = folder.join(&filename);
        if let Err(error) = self.fetch(url, &path).await {
            warn!(url = %url, error = %error, "direct download failed");
            let reason = error.to_string();
            let failure = if error.is_validation() {
                FailureKind::validation(reason)
            } else {
                FailureKind::transport(reason)
            };
            return AttemptOutcome::Failed(failure);
        }

        if let Err(error) = self.log.clear_failure(title, authors) {
            warn!(error = %error, "could not clear earlier failure lines");
        }
        let source = AcquisitionSource::Url(url.to_string());
        if let Err(error) = self.log.record_success(&filename, &source) {
            warn!(error = %error, "could not record success");
            return AttemptOutcome::Failed(FailureKind::transport(error.to_string()));
        }

        info!(filename = %filename, url = %url, "downloaded");
        AttemptOutcome::Acquired { filename, source }
    }

    async fn fetch(&self, url: &str, path: &Path) -> Result<u64, DownloadError> {
        let bytes = self.client.download_to_path(url, path).await?;

        if self.verify_signature && !is_valid_pdf(path).await {
            debug!(path = %path.display(), "signature mismatch, deleting");
            if let Err(error) = tokio::fs::remove_file(path).await {
                warn!(path = %path.display(), error = %error, "could not delete non-PDF file");
            }
            return Err(DownloadError::not_pdf(path));
        }

        Ok(bytes)
    }
}
