//! Error types for the download module.
//!
//! This module defines structured errors for direct PDF downloads, carrying
//! the URL or path each failure happened on.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during a direct download.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Any response status other than 200.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error during download (create folder, create file, write).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The retrieved file does not start with the PDF signature and was deleted.
    #[error("corrupt or non-PDF file detected: {path}")]
    NotPdf {
        /// Where the rejected file was written.
        path: PathBuf,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build download HTTP client: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl DownloadError {
    /// Creates a network error from a reqwest error, promoting timeouts.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::timeout(url)
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a signature mismatch error.
    pub fn not_pdf(path: impl Into<PathBuf>) -> Self {
        Self::NotPdf { path: path.into() }
    }

    /// Returns true for the signature-mismatch variant.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NotPdf { .. })
    }
}

// No From<reqwest::Error> / From<std::io::Error>: variants need the URL or
// path for context, which the helper constructors take explicitly.
