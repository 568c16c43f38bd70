//! Run orchestration.
//!
//! A run has two phases. First every requested results page is fetched and
//! parsed into [`ResultRecord`](crate::scholar::ResultRecord)s; a page that
//! fails is skipped. Then records are processed one at a time, in page order:
//!
//! 1. record with a link: direct download, fallback tool on any failure
//! 2. record without a link: fallback tool only
//!
//! Only setup problems (run folder, log files) stop a run.

mod error;
mod harvester;
mod session;
mod stats;

pub use error::PipelineError;
pub use harvester::{HarvestOptions, Harvester, RUN_FOLDER_SUFFIX, RunMode, RunSummary};
pub use session::HarvestSession;
pub use stats::RunStats;
