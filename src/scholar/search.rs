//! Results page retrieval from the search endpoint.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use super::SearchError;
use crate::user_agent::SESSION_USER_AGENT;

/// Default search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://scholar.google.com/scholar";

/// Results shown per page; page `n` starts at offset `n * RESULTS_PER_PAGE`.
pub const RESULTS_PER_PAGE: u32 = 10;

const LOCALE: &str = "en";

const SDT_FILTER: &str = "0,5";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Query parameters for one results page, in request order.
#[must_use]
pub fn page_params(query: &str, page: u32) -> [(&'static str, String); 4] {
    [
        ("start", page.saturating_mul(RESULTS_PER_PAGE).to_string()),
        ("q", query.to_string()),
        ("hl", LOCALE.to_string()),
        ("as_sdt", SDT_FILTER.to_string()),
    ]
}

/// HTTP session for the search endpoint.
///
/// Every request carries [`SESSION_USER_AGENT`].
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    endpoint: Url,
}

impl SearchClient {
    /// Creates a client for [`DEFAULT_SEARCH_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Client`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, SearchError> {
        Self::with_endpoint(DEFAULT_SEARCH_URL)
    }

    /// Creates a client for a custom endpoint (mirrors, tests).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidEndpoint`] for an unparseable URL and
    /// [`SearchError::Client`] if the HTTP client cannot be built.
    pub fn with_endpoint(endpoint: &str) -> Result<Self, SearchError> {
        let endpoint = Url::parse(endpoint).map_err(|_| SearchError::InvalidEndpoint {
            url: endpoint.to_string(),
        })?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .gzip(true)
            .user_agent(SESSION_USER_AGENT)
            .build()
            .map_err(|source| SearchError::Client { source })?;
        Ok(Self { client, endpoint })
    }

    /// The endpoint pages are requested from.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Builds the full request URL for one page.
    #[must_use]
    pub fn page_url(&self, query: &str, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(page_params(query, page));
        url
    }

    /// Fetches the markup of one results page (zero-based `page`).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::HttpStatus`] for any status other than 200, and
    /// [`SearchError::Network`] / [`SearchError::Timeout`] for transport failures.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_page(&self, query: &str, page: u32) -> Result<String, SearchError> {
        let url = self.page_url(query, page);
        debug!(url = %url, "requesting results page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::transport(page, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SearchError::http_status(page, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| SearchError::transport(page, e))
    }
}
