//! Run orchestration: page collection, then sequential per-record acquisition.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::error::PipelineError;
use super::session::HarvestSession;
use super::stats::RunStats;
use crate::download::{DelayPolicy, Downloader, HttpClient};
use crate::fallback::{AcquisitionTool, FallbackAcquirer};
use crate::ledger::{AcquisitionLog, FileLog};
use crate::sanitize::sanitize_folder_name;
use crate::scholar::{ResultRecord, SearchClient, parse_results};

/// Suffix appended to the sanitized query to name the run folder.
pub const RUN_FOLDER_SUFFIX: &str = " PDFs";

/// How existing logs in the run folder are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Keep both logs; records already in the success log are skipped.
    #[default]
    Resume,
    /// Truncate both logs before collecting.
    Fresh,
}

/// Inputs of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestOptions {
    /// Search query text.
    pub query: String,
    /// Number of result pages to request.
    pub pages: u32,
    /// Log handling at start.
    pub mode: RunMode,
    /// Whether written files must carry the PDF signature.
    pub verify_signature: bool,
}

impl HarvestOptions {
    /// Options for a resumable run with signature checks on.
    #[must_use]
    pub fn new(query: impl Into<String>, pages: u32) -> Self {
        Self {
            query: query.into(),
            pages,
            mode: RunMode::Resume,
            verify_signature: true,
        }
    }
}

/// Where a finished run left its files, and what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Run folder.
    pub folder: PathBuf,
    /// Counters for the run.
    pub stats: RunStats,
}

/// Drives a complete run: collect records from result pages, then acquire
/// each record through the direct download and the fallback tool.
pub struct Harvester {
    search: SearchClient,
    http: HttpClient,
    tool: Arc<dyn AcquisitionTool>,
    delay: Arc<dyn DelayPolicy>,
    output_dir: PathBuf,
}

impl std::fmt::Debug for Harvester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harvester")
            .field("search", &self.search)
            .field("tool", &self.tool.label())
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

impl Harvester {
    /// Creates a harvester writing run folders under `output_dir`.
    #[must_use]
    pub fn new(
        search: SearchClient,
        http: HttpClient,
        tool: Arc<dyn AcquisitionTool>,
        delay: Arc<dyn DelayPolicy>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            search,
            http,
            tool,
            delay,
            output_dir: output_dir.into(),
        }
    }

    /// Base directory for run folders.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run folder for `query`: `<output_dir>/<sanitized query> PDFs`.
    #[must_use]
    pub fn run_folder(&self, query: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{RUN_FOLDER_SUFFIX}", sanitize_folder_name(query)))
    }

    /// Creates the run folder, opens its logs, and applies the run mode.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the folder cannot be created or the logs
    /// cannot be opened or truncated.
    #[instrument(skip(self, options), fields(query = %options.query, mode = ?options.mode))]
    pub fn prepare_session(&self, options: &HarvestOptions) -> Result<HarvestSession, PipelineError> {
        let folder = self.run_folder(&options.query);
        std::fs::create_dir_all(&folder)
            .map_err(|e| PipelineError::create_folder(&folder, e))?;

        let file_log = FileLog::open(&folder)?;
        if options.mode == RunMode::Fresh {
            file_log.reset()?;
            info!(folder = %folder.display(), "logs reset for fresh run");
        }
        let log: Arc<dyn AcquisitionLog> = Arc::new(file_log);

        let direct = Downloader::new(self.http.clone(), Arc::clone(&log), Arc::clone(&self.delay))
            .with_signature_check(options.verify_signature);
        let fallback = FallbackAcquirer::new(
            Arc::clone(&self.tool),
            Arc::clone(&log),
            Arc::clone(&self.delay),
        )
        .with_signature_check(options.verify_signature);

        info!(folder = %folder.display(), "run folder ready");
        Ok(HarvestSession::new(folder, log, direct, fallback))
    }

    /// Fetches and parses `pages` result pages in order.
    ///
    /// A page whose fetch fails is logged, counted in `stats.pages_failed`,
    /// and skipped.
    #[instrument(skip(self, stats))]
    pub async fn collect(&self, query: &str, pages: u32, stats: &mut RunStats) -> Vec<ResultRecord> {
        let mut records = Vec::new();
        stats.pages_requested = pages;

        for page in 0..pages {
            info!(page = page + 1, total = pages, "processing page");
            self.delay.wait().await;

            match self.search.fetch_page(query, page).await {
                Ok(html) => {
                    let parsed = parse_results(&html);
                    info!(page = page + 1, records = parsed.len(), "page parsed");
                    records.extend(parsed);
                }
                Err(error) => {
                    warn!(page = page + 1, error = %error, "skipping results page");
                    stats.pages_failed += 1;
                }
            }
        }

        stats.records = records.len();
        records
    }

    /// Collects records and acquires each one through `session`.
    #[instrument(skip(self, session, options), fields(query = %options.query, pages = options.pages))]
    pub async fn run_session(&self, session: &HarvestSession, options: &HarvestOptions) -> RunStats {
        let mut stats = RunStats::default();
        let records = self.collect(&options.query, options.pages, &mut stats).await;

        let total = records.len();
        for (index, record) in records.iter().enumerate() {
            info!(record = index + 1, total, "processing file");
            let outcome = session.acquire(record).await;
            stats.record(&outcome);
        }

        info!(%stats, "run complete");
        stats
    }

    /// Runs a complete harvest.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] only for setup failures; page and record
    /// failures are counted in the returned stats.
    pub async fn run(&self, options: &HarvestOptions) -> Result<RunSummary, PipelineError> {
        let session = self.prepare_session(options)?;
        let stats = self.run_session(&session, options).await;
        Ok(RunSummary {
            folder: session.folder().to_path_buf(),
            stats,
        })
    }
}
