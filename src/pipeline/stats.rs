//! Counters for one harvest run.

use std::fmt;

use crate::outcome::{AcquisitionSource, AttemptOutcome};

/// Statistics collected over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Result pages requested.
    pub pages_requested: u32,
    /// Pages skipped because the fetch failed.
    pub pages_failed: u32,
    /// Records parsed across all pages.
    pub records: usize,
    /// PDFs written by a direct download.
    pub acquired: usize,
    /// PDFs written by the fallback tool.
    pub via_tool: usize,
    /// Records skipped because the success log already listed them.
    pub already_present: usize,
    /// Records that ended in failure.
    pub failed: usize,
}

impl RunStats {
    /// Counts one record outcome.
    pub fn record(&mut self, outcome: &AttemptOutcome) {
        match outcome {
            AttemptOutcome::Acquired {
                source: AcquisitionSource::Url(_),
                ..
            } => self.acquired += 1,
            AttemptOutcome::Acquired {
                source: AcquisitionSource::Tool(_),
                ..
            } => self.via_tool += 1,
            AttemptOutcome::AlreadyAcquired { .. } => self.already_present += 1,
            AttemptOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Records that are present in the success log after the run.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.acquired + self.via_tool + self.already_present
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records from {}/{} pages: {} downloaded, {} via tool, {} already present, {} failed",
            self.records,
            self.pages_requested.saturating_sub(self.pages_failed),
            self.pages_requested,
            self.acquired,
            self.via_tool,
            self.already_present,
            self.failed
        )
    }
}
