//! Scholar Harvest Core Library
//!
//! This library pages through an academic search engine's results for a
//! query, extracts a (title, authors, PDF link) record from each result, and
//! materializes one local PDF per record. A direct download is tried first,
//! with an external acquisition tool as fallback. Two flat logs in the run
//! folder make reruns idempotent.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`sanitize`] - Filename and folder-name cleanup
//! - [`scholar`] - Results page fetching and parsing
//! - [`ledger`] - Success/error logs (the `AcquisitionLog` trait)
//! - [`download`] - Direct PDF download with signature check and courtesy delays
//! - [`fallback`] - External acquisition tool strategy
//! - [`pipeline`] - Run orchestration and statistics
//! - [`outcome`] - Per-record attempt results
//! - [`config`] - TOML configuration file and resolved settings

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
pub mod fallback;
pub mod ledger;
pub mod outcome;
pub mod pipeline;
pub mod sanitize;
pub mod scholar;
#[cfg(test)]
pub mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use config::{ConfigError, FileConfig, HarvestConfig};
pub use download::{DelayPolicy, DownloadError, Downloader, HttpClient, NoDelay, RandomDelay};
pub use fallback::{AcquisitionTool, CommandTool, FallbackAcquirer, FallbackError, ToolOutput};
pub use ledger::{AcquisitionLog, FileLog, LedgerError, MemoryLog};
pub use outcome::{AcquisitionSource, AttemptOutcome, FailureKind};
pub use pipeline::{
    HarvestOptions, HarvestSession, Harvester, PipelineError, RunMode, RunStats, RunSummary,
};
pub use sanitize::{pdf_filename, sanitize_filename, sanitize_folder_name};
pub use scholar::{ResultRecord, SearchClient, SearchError, parse_results};
