//! In-memory acquisition logs, used where real files are not wanted.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{
    AcquisitionLog, LedgerError, failure_line, keep_error_line, line_mentions_filename,
    success_line,
};
use crate::outcome::AcquisitionSource;

#[derive(Debug, Default)]
struct Lines {
    success: Vec<String>,
    errors: Vec<String>,
}

/// Acquisition logs held in memory with the same line formats as [`super::FileLog`].
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Lines>,
}

impl MemoryLog {
    /// Creates empty logs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates logs pre-seeded with success lines.
    #[must_use]
    pub fn with_success_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let log = Self::new();
        log.lines().success = lines.into_iter().map(Into::into).collect();
        log
    }

    /// Snapshot of the success log.
    #[must_use]
    pub fn success_lines(&self) -> Vec<String> {
        self.lines().success.clone()
    }

    /// Snapshot of the error log.
    #[must_use]
    pub fn error_lines(&self) -> Vec<String> {
        self.lines().errors.clone()
    }

    fn lines(&self) -> MutexGuard<'_, Lines> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AcquisitionLog for MemoryLog {
    fn exists(&self, filename: &str) -> Result<bool, LedgerError> {
        Ok(self
            .lines()
            .success
            .iter()
            .any(|line| line_mentions_filename(line, filename)))
    }

    fn record_success(
        &self,
        filename: &str,
        source: &AcquisitionSource,
    ) -> Result<(), LedgerError> {
        self.lines().success.push(success_line(filename, source));
        Ok(())
    }

    fn record_failure(&self, title: &str, authors: &str, reason: &str) -> Result<(), LedgerError> {
        self.lines()
            .errors
            .push(failure_line(title, authors, reason));
        Ok(())
    }

    fn clear_failure(&self, title: &str, authors: &str) -> Result<(), LedgerError> {
        self.lines()
            .errors
            .retain(|line| keep_error_line(line, title, authors));
        Ok(())
    }

    fn reset(&self) -> Result<(), LedgerError> {
        let mut lines = self.lines();
        lines.success.clear();
        lines.errors.clear();
        Ok(())
    }
}
