//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Highest accepted page count.
pub const MAX_PAGES: u32 = 100;

/// Collect PDFs for every result of an academic search query.
///
/// Results pages are fetched for QUERY, each result's PDF is downloaded
/// directly when a link is listed, and an external tool is tried otherwise.
/// Files land in "<output-dir>/<query> PDFs" next to a success log
/// (literature.txt) and an error log (literature_errors.txt).
#[derive(Parser, Debug)]
#[command(name = "scholar-harvest")]
#[command(author, version, about)]
pub struct Args {
    /// Search query (prompted for when omitted)
    pub query: Option<String>,

    /// Number of result pages to search, 10 results each (prompted for when omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGES)))]
    pub pages: Option<u32>,

    /// Start over: truncate both logs instead of resuming
    #[arg(long)]
    pub fresh: bool,

    /// Base directory for the run folder
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Fallback acquisition program
    #[arg(long, value_name = "PROGRAM")]
    pub tool: Option<String>,

    /// Skip the random courtesy delay before each request
    #[arg(long)]
    pub no_delay: bool,

    /// Open the run folder once it is ready
    #[arg(long)]
    pub open: bool,

    /// Config file path (defaults to $XDG_CONFIG_HOME/scholar-harvest/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Default tracing level derived from `-q` / `-v`.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
