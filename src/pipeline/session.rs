//! Per-run acquisition state: the run folder, its logs, and both strategies.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::download::Downloader;
use crate::fallback::FallbackAcquirer;
use crate::ledger::AcquisitionLog;
use crate::outcome::AttemptOutcome;
use crate::scholar::ResultRecord;

/// State scoped to one run: where PDFs land and how each record is acquired.
pub struct HarvestSession {
    folder: PathBuf,
    log: Arc<dyn AcquisitionLog>,
    direct: Downloader,
    fallback: FallbackAcquirer,
}

impl std::fmt::Debug for HarvestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvestSession")
            .field("folder", &self.folder)
            .field("direct", &self.direct)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl HarvestSession {
    /// Assembles a session from already-built parts.
    ///
    /// `direct` and `fallback` are expected to share `log`.
    #[must_use]
    pub fn new(
        folder: impl Into<PathBuf>,
        log: Arc<dyn AcquisitionLog>,
        direct: Downloader,
        fallback: FallbackAcquirer,
    ) -> Self {
        Self {
            folder: folder.into(),
            log,
            direct,
            fallback,
        }
    }

    /// Folder receiving PDFs and the two log files.
    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// The session's acquisition log.
    #[must_use]
    pub fn log(&self) -> &Arc<dyn AcquisitionLog> {
        &self.log
    }

    /// Acquires one record: direct link first, fallback tool on failure or
    /// when no link exists.
    #[instrument(skip(self, record), fields(title = %record.title))]
    pub async fn acquire(&self, record: &ResultRecord) -> AttemptOutcome {
        info!(authors = %record.authors, link = ?record.pdf_link, "processing record");

        if let Some(url) = record.pdf_link.as_deref() {
            let outcome = self
                .direct
                .attempt(url, &record.title, &record.authors, &self.folder)
                .await;
            if outcome.is_success() {
                return outcome;
            }
            info!("direct download failed, trying fallback");
        } else {
            info!("no direct link, trying fallback");
        }

        self.fallback
            .attempt(&record.title, &record.authors, &self.folder)
            .await
    }
}
