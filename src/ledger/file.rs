//! Text-file backed acquisition logs living inside a run folder.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::{
    AcquisitionLog, LedgerError, failure_line, keep_error_line, line_mentions_filename,
    success_line,
};
use crate::outcome::AcquisitionSource;

/// Success log filename inside a run folder.
pub const SUCCESS_LOG_NAME: &str = "literature.txt";

/// Error log filename inside a run folder.
pub const ERROR_LOG_NAME: &str = "literature_errors.txt";

/// Acquisition logs stored as two UTF-8 text files, one entry per line.
#[derive(Debug)]
pub struct FileLog {
    success_path: PathBuf,
    error_path: PathBuf,
    // Serializes exists-check/append/compaction against each other.
    lock: Mutex<()>,
}

impl FileLog {
    /// Opens the logs inside `folder`, creating empty files when absent.
    ///
    /// The folder itself must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if either file cannot be created.
    pub fn open(folder: &Path) -> Result<Self, LedgerError> {
        Self::open_paths(folder.join(SUCCESS_LOG_NAME), folder.join(ERROR_LOG_NAME))
    }

    /// Opens logs at explicit paths, creating empty files when absent.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if either file cannot be created.
    pub fn open_paths(
        success_path: impl Into<PathBuf>,
        error_path: impl Into<PathBuf>,
    ) -> Result<Self, LedgerError> {
        let log = Self {
            success_path: success_path.into(),
            error_path: error_path.into(),
            lock: Mutex::new(()),
        };
        touch(&log.success_path)?;
        touch(&log.error_path)?;
        debug!(
            success = %log.success_path.display(),
            errors = %log.error_path.display(),
            "acquisition logs ready"
        );
        Ok(log)
    }

    /// Path of the success log.
    #[must_use]
    pub fn success_path(&self) -> &Path {
        &self.success_path
    }

    /// Path of the error log.
    #[must_use]
    pub fn error_path(&self) -> &Path {
        &self.error_path
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl AcquisitionLog for FileLog {
    fn exists(&self, filename: &str) -> Result<bool, LedgerError> {
        let _guard = self.guard();
        let contents = read_or_empty(&self.success_path)?;
        Ok(contents
            .lines()
            .any(|line| line_mentions_filename(line, filename)))
    }

    fn record_success(
        &self,
        filename: &str,
        source: &AcquisitionSource,
    ) -> Result<(), LedgerError> {
        let _guard = self.guard();
        append_line(&self.success_path, &success_line(filename, source))
    }

    fn record_failure(&self, title: &str, authors: &str, reason: &str) -> Result<(), LedgerError> {
        let _guard = self.guard();
        append_line(&self.error_path, &failure_line(title, authors, reason))
    }

    fn clear_failure(&self, title: &str, authors: &str) -> Result<(), LedgerError> {
        let _guard = self.guard();
        let contents = match fs::read_to_string(&self.error_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(LedgerError::io(&self.error_path, e)),
        };

        let mut kept = String::with_capacity(contents.len());
        let mut dropped = 0usize;
        for line in contents.lines() {
            if keep_error_line(line, title, authors) {
                kept.push_str(line);
                kept.push('\n');
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            debug!(dropped, title, "compacting error log");
        }
        fs::write(&self.error_path, kept).map_err(|e| LedgerError::io(&self.error_path, e))
    }

    fn reset(&self) -> Result<(), LedgerError> {
        let _guard = self.guard();
        File::create(&self.success_path).map_err(|e| LedgerError::io(&self.success_path, e))?;
        File::create(&self.error_path).map_err(|e| LedgerError::io(&self.error_path, e))?;
        debug!("acquisition logs truncated");
        Ok(())
    }
}

fn touch(path: &Path) -> Result<(), LedgerError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
        .map_err(|e| LedgerError::io(path, e))
}

fn read_or_empty(path: &Path) -> Result<String, LedgerError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(LedgerError::io(path, e)),
    }
}

fn append_line(path: &Path, line: &str) -> Result<(), LedgerError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LedgerError::io(path, e))?;
    writeln!(file, "{line}").map_err(|e| LedgerError::io(path, e))
}
