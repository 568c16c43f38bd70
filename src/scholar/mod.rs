//! Search results: fetching result pages and extracting records from them.
//!
//! - [`SearchClient`] - GETs one results page per page index
//! - [`parse_results`] - turns one page's markup into [`ResultRecord`]s

mod error;
mod parser;
mod search;

pub use error::SearchError;
pub use parser::{NO_TITLE, UNKNOWN_AUTHORS, parse_results};
pub use search::{DEFAULT_SEARCH_URL, RESULTS_PER_PAGE, SearchClient, page_params};

use crate::sanitize::pdf_filename;

/// One parsed search result.
///
/// Title and authors are already sanitized when a record is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// Result title, or [`NO_TITLE`].
    pub title: String,
    /// Author segment of the citation line, or [`UNKNOWN_AUTHORS`].
    pub authors: String,
    /// Direct link from the alternate-sources box, taken verbatim.
    pub pdf_link: Option<String>,
}

impl ResultRecord {
    /// Filename the record's PDF is stored and logged under.
    #[must_use]
    pub fn filename(&self) -> String {
        pdf_filename(&self.title, &self.authors)
    }
}
