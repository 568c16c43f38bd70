//! Extraction of result records from a results page.
//!
//! Each result sits in a `div` whose class attribute is exactly `gs_r gs_or gs_scl`;
//! blocks with extra or reordered classes are not results.
//! Inside it:
//!
//! - `h3.gs_rt` holds the title (with `[PDF]`-style type markers)
//! - `div.gs_or_ggsm` is the alternate-sources box whose first link is the
//!   direct PDF link
//! - `div.gs_a` is the citation line, `authors - venue, year - host`

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::ResultRecord;
use crate::sanitize::sanitize_filename;

/// Title used when a result block has no heading.
pub const NO_TITLE: &str = "No title found";

/// Authors used when a result block has no citation line.
pub const UNKNOWN_AUTHORS: &str = "Unknown authors";

/// Separator between the fields of the citation line.
const CITATION_SEPARATOR: &str = " - ";

/// Parses a static CSS selector; panics on invalid selector.
fn compile_static_selector(selector: &str) -> Selector {
    Selector::parse(selector).unwrap_or_else(|e| panic!("invalid static selector '{selector}': {e}"))
}

static RESULT_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector(r#"div[class="gs_r gs_or gs_scl"]"#));
static TITLE: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("h3.gs_rt"));
static ALTERNATE_SOURCES: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector("div.gs_or_ggsm"));
static LINK: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("a"));
static CITATION_LINE: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("div.gs_a"));

/// Extracts every result record from one results page, in document order.
///
/// Pure: parsing the same markup twice yields the same records. Markup without
/// result blocks yields an empty vector.
///
/// # Example
///
/// ```
/// use harvest_core::scholar::parse_results;
///
/// let html = r#"<div class="gs_r gs_or gs_scl">
///   <h3 class="gs_rt">[PDF] Deep Learning Survey</h3>
///   <div class="gs_a">J Smith, A Lee - Journal of AI, 2020 - example.org</div>
/// </div>"#;
/// let records = parse_results(html);
/// assert_eq!(records[0].title, "Deep Learning Survey");
/// assert_eq!(records[0].authors, "J Smith, A Lee");
/// assert_eq!(records[0].pdf_link, None);
/// ```
#[must_use]
pub fn parse_results(html: &str) -> Vec<ResultRecord> {
    let document = Html::parse_document(html);
    let records: Vec<ResultRecord> = document.select(&RESULT_BLOCK).map(parse_block).collect();
    debug!(count = records.len(), "parsed results page");
    records
}

fn parse_block(block: ElementRef<'_>) -> ResultRecord {
    let title = block
        .select(&TITLE)
        .next()
        .map_or_else(|| NO_TITLE.to_string(), element_text);

    let pdf_link = block
        .select(&ALTERNATE_SOURCES)
        .next()
        .and_then(|sources| sources.select(&LINK).next())
        .and_then(|link| link.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(ToString::to_string);

    let authors = block
        .select(&CITATION_LINE)
        .next()
        .map_or_else(
            || UNKNOWN_AUTHORS.to_string(),
            |citation| {
                let text = element_text(citation);
                let first = text.split(CITATION_SEPARATOR).next().unwrap_or_default();
                sanitize_filename(first)
            },
        );

    ResultRecord {
        title: sanitize_filename(&title),
        authors,
        pdf_link,
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
