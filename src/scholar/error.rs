//! Error types for result page retrieval.

use thiserror::Error;

/// Errors that can occur while fetching a results page.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The configured search endpoint is not a valid URL.
    #[error("invalid search endpoint: {url}")]
    InvalidEndpoint {
        /// The rejected endpoint string.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build search HTTP client: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level error (DNS, connection refused, TLS, body read).
    #[error("network error fetching results page {page}: {source}")]
    Network {
        /// Zero-based page index.
        page: u32,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out.
    #[error("timeout fetching results page {page}")]
    Timeout {
        /// Zero-based page index.
        page: u32,
    },

    /// The endpoint answered with something other than 200.
    #[error("HTTP {status} fetching results page {page}")]
    HttpStatus {
        /// Zero-based page index.
        page: u32,
        /// The HTTP status code.
        status: u16,
    },
}

impl SearchError {
    /// Creates a network or timeout error depending on the reqwest error kind.
    pub fn transport(page: u32, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { page }
        } else {
            Self::Network { page, source }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(page: u32, status: u16) -> Self {
        Self::HttpStatus { page, status }
    }
}
