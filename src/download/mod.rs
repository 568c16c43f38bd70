//! Direct PDF downloads streamed to disk.
//!
//! This module provides the first acquisition strategy for a result record:
//! a single GET of the record's PDF link, streamed into the run folder under
//! the record's generated filename.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Fixed timeout and browser User-Agent shared with the search session
//! - `%PDF-` signature check with deletion of rejected files
//! - Randomized courtesy delay before every request ([`DelayPolicy`])
//! - Structured error types with full context
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use harvest_core::download::{Downloader, HttpClient, RandomDelay};
//! use harvest_core::ledger::FileLog;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let folder = Path::new("./graph networks PDFs");
//! let log = Arc::new(FileLog::open(folder)?);
//! let downloader = Downloader::new(HttpClient::new()?, log, Arc::new(RandomDelay::default()));
//! let outcome = downloader
//!     .attempt("https://example.com/paper.pdf", "Paper", "A Author", folder)
//!     .await;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod delay;
mod direct;
mod error;
mod signature;

pub use client::HttpClient;
pub use constants::{DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY, DIRECT_TIMEOUT_SECS, PDF_MAGIC};
pub use delay::{DelayPolicy, NoDelay, RandomDelay};
pub use direct::Downloader;
pub use error::DownloadError;
pub use signature::is_valid_pdf;

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
