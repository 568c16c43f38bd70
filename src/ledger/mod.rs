//! Acquisition logs: the durable record of which results were already fetched.
//!
//! Two flat text stores are kept per run folder:
//!
//! - the success log (`literature.txt`), one `filename | source` line per PDF
//! - the error log (`literature_errors.txt`), one `title | authors | reason` line
//!   per failed record
//!
//! Both are append-only except for [`AcquisitionLog::clear_failure`], which
//! rewrites the error log without the lines of a record that is about to be
//! retried or has just succeeded. The logs are the single source of truth for
//! "already acquired" and are consulted before any network or tool work, which
//! keeps reruns idempotent.
//!
//! # Matching semantics
//!
//! Lookups are substring containment, not field equality:
//!
//! - [`AcquisitionLog::exists`] is true when any success line *contains* the
//!   filename, so a filename that is a substring of another logged filename is
//!   reported as present.
//! - [`AcquisitionLog::clear_failure`] drops every error line containing the
//!   title *or* the authors.
//!
//! Existing logs written by earlier runs rely on these rules, so they are kept.

mod error;
mod file;
mod memory;

pub use error::LedgerError;
pub use file::{ERROR_LOG_NAME, FileLog, SUCCESS_LOG_NAME};
pub use memory::MemoryLog;

use crate::outcome::AcquisitionSource;

/// Store of acquisition outcomes keyed by generated PDF filename.
///
/// Implementations must serialize their own read-modify-write sequences; the
/// trait is object-safe and shared as `Arc<dyn AcquisitionLog>`.
pub trait AcquisitionLog: Send + Sync {
    /// Returns true if any success line contains `filename`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the success store cannot be read.
    fn exists(&self, filename: &str) -> Result<bool, LedgerError>;

    /// Appends `"<filename> | <source>"` to the success store.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the success store cannot be written.
    fn record_success(&self, filename: &str, source: &AcquisitionSource)
    -> Result<(), LedgerError>;

    /// Appends `"<title> | <authors> | <reason>"` to the error store.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the error store cannot be written.
    fn record_failure(&self, title: &str, authors: &str, reason: &str) -> Result<(), LedgerError>;

    /// Rewrites the error store without lines containing `title` or `authors`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the error store cannot be read or rewritten.
    fn clear_failure(&self, title: &str, authors: &str) -> Result<(), LedgerError>;

    /// Empties both stores.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if either store cannot be truncated.
    fn reset(&self) -> Result<(), LedgerError>;
}

pub(crate) fn success_line(filename: &str, source: &AcquisitionSource) -> String {
    format!("{filename} | {source}")
}

pub(crate) fn failure_line(title: &str, authors: &str, reason: &str) -> String {
    format!("{title} | {authors} | {reason}")
}

pub(crate) fn line_mentions_filename(line: &str, filename: &str) -> bool {
    line.contains(filename)
}

/// An error line survives compaction only if it mentions neither the title nor the authors.
/// An empty title or authors string mentions nothing.
pub(crate) fn keep_error_line(line: &str, title: &str, authors: &str) -> bool {
    !mentions(line, title) && !mentions(line, authors)
}

fn mentions(line: &str, needle: &str) -> bool {
    !needle.is_empty() && line.contains(needle)
}
