//! HTTP client wrapper for downloading PDFs.
//!
//! This module provides the `HttpClient` struct which streams a response body
//! to a caller-chosen path, with timeout configuration and partial-file cleanup.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::constants::DIRECT_TIMEOUT_SECS;
use super::error::DownloadError;
use crate::user_agent::SESSION_USER_AGENT;

/// HTTP client for direct PDF downloads.
///
/// Created once per run and shared across records for connection pooling.
///
/// # Example
///
/// ```no_run
/// use harvest_core::download::HttpClient;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()?;
/// let bytes = client
///     .download_to_path("https://example.com/paper.pdf", Path::new("./run/Paper - A.pdf"))
///     .await?;
/// println!("wrote {bytes} bytes");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with the default direct-download timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, DownloadError> {
        Self::with_timeout(Duration::from_secs(DIRECT_TIMEOUT_SECS))
    }

    /// Creates a client that gives up when connecting, or any single read,
    /// stalls for longer than `timeout`. A slow but steady body is not cut off.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] if the HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .gzip(true)
            .user_agent(SESSION_USER_AGENT)
            .build()
            .map_err(|source| DownloadError::Client { source })?;
        Ok(Self { client })
    }

    /// Downloads `url` to exactly `path`, creating the parent folder.
    ///
    /// Returns the number of bytes written. On any error after the file was
    /// created, the partial file is removed.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server returns any status other than 200
    /// - Writing to disk fails
    #[instrument(skip(self, path), fields(url = %url))]
    pub async fn download_to_path(&self, url: &str, path: &Path) -> Result<u64, DownloadError> {
        debug!("starting download");

        let parsed_url = Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self
            .client
            .get(parsed_url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DownloadError::io(parent, e))?;
        }

        let mut file = File::create(path)
            .await
            .map_err(|e| DownloadError::io(path, e))?;

        let stream_result = stream_to_file(&mut file, response, url, path).await;
        if stream_result.is_err() {
            debug!(path = %path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(path).await;
        }
        let bytes_written = stream_result?;

        info!(path = %path.display(), bytes = bytes_written, "download complete");
        Ok(bytes_written)
    }
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;

    Ok(bytes_written)
}
