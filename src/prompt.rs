//! Interactive prompts for values not given on the command line.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};

use crate::cli::MAX_PAGES;

/// Prompt shown when no query argument was given.
pub const QUERY_PROMPT: &str = "Enter search query: ";

/// Prompt shown when no page count was given.
pub const PAGES_PROMPT: &str = "Enter number of pages to search: ";

/// Message printed before exiting on an unusable page count.
pub const INVALID_PAGES_MESSAGE: &str = "Invalid number of pages.";

/// Writes `prompt` and reads one line, without its line ending.
///
/// # Errors
///
/// Fails if the prompt cannot be written or input cannot be read.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    output
        .write_all(prompt.as_bytes())
        .and_then(|()| output.flush())
        .context("failed to write prompt")?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed to read input")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Parses a page count typed at the prompt.
///
/// Returns `None` unless the trimmed text is an integer in `1..=MAX_PAGES`.
#[must_use]
pub fn parse_page_count(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|pages| (1..=MAX_PAGES).contains(pages))
}

/// Asks for the query; an empty answer is an error.
///
/// # Errors
///
/// Fails on IO errors or an empty query.
pub fn ask_query<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    let query = ask(input, output, QUERY_PROMPT)?;
    let query = query.trim();
    if query.is_empty() {
        bail!("a search query is required");
    }
    Ok(query.to_string())
}

/// Asks for the page count; `Ok(None)` means the answer was not a valid count.
///
/// # Errors
///
/// Fails on IO errors only.
pub fn ask_pages<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<u32>> {
    let raw = ask(input, output, PAGES_PROMPT)?;
    Ok(parse_page_count(&raw))
}
