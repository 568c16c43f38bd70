//! Filesystem-safe string derivation for result titles, filenames and run folders.
//!
//! Search result titles carry bracketed type markers (`[PDF]`, `[HTML]`,
//! `[CITATION]`, ...) that are noise for a filename. These are removed first,
//! then characters that are illegal on common filesystems are dropped
//! (filenames) or replaced with `_` (folder names).

use std::sync::LazyLock;

use regex::Regex;

/// Characters rejected by at least one common filesystem.
const ILLEGAL_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Compiles a regex at static init; panics on invalid pattern.
fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Noise markers in removal order. Each matches the bracketed tag followed by
/// one or more `]`, so every occurrence in `[PDF][PDF]` is removed. Case-sensitive.
static NOISE_MARKER_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\[PDF\]+",
        r"\[HTML\]+",
        r"\[CITATION\]+",
        r"\[C\]+",
        r"\[BOOK\]+",
        r"\[B\]+",
    ]
    .into_iter()
    .map(compile_static_regex)
    .collect()
});

/// Strips noise markers and illegal characters, then trims and collapses whitespace.
///
/// # Example
///
/// ```
/// use harvest_core::sanitize::sanitize_filename;
///
/// assert_eq!(sanitize_filename("[PDF] Deep Learning Survey"), "Deep Learning Survey");
/// assert_eq!(sanitize_filename("What? A: Study"), "What A Study");
/// ```
#[must_use]
pub fn sanitize_filename(raw: &str) -> String {
    let mut cleaned = raw.to_string();
    for marker in NOISE_MARKER_RES.iter() {
        if marker.is_match(&cleaned) {
            cleaned = marker.replace_all(&cleaned, "").into_owned();
        }
    }

    let cleaned: String = cleaned
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .collect();

    // One line per log record: line breaks and runs of spaces become one space.
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derives the PDF filename for a (title, authors) pair.
///
/// This is the key used by the acquisition logs, so it must stay stable
/// across runs.
#[must_use]
pub fn pdf_filename(title: &str, authors: &str) -> String {
    format!("{}.pdf", sanitize_filename(&format!("{title} - {authors}")))
}

/// Replaces illegal characters with `_` and trims surrounding whitespace.
///
/// Noise markers are kept; a search query is user input, not a scraped title.
#[must_use]
pub fn sanitize_folder_name(raw: &str) -> String {
    raw.chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { '_' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}
