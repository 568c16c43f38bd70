//! CLI entry point for the scholar-harvest tool.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use harvest_core::config::{HarvestConfig, load_default_file_config, load_file_config};
use harvest_core::{
    CommandTool, DelayPolicy, Harvester, HarvestOptions, HttpClient, NoDelay, RandomDelay,
    RunMode, SearchClient,
};
use tracing::{debug, info, warn};

mod cli;
mod prompt;

use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    init_tracing(args.default_log_level());
    debug!(?args, "CLI arguments parsed");

    let config = resolve_config(&args)?;
    debug!(?config, "configuration resolved");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let query = match args.query.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => query.to_string(),
        _ => prompt::ask_query(&mut input, &mut output)?,
    };
    let pages = match args.pages {
        Some(pages) => pages,
        None => {
            let Some(pages) = prompt::ask_pages(&mut input, &mut output)? else {
                println!("{}", prompt::INVALID_PAGES_MESSAGE);
                return Ok(ExitCode::FAILURE);
            };
            pages
        }
    };

    let delay: Arc<dyn DelayPolicy> = if args.no_delay {
        Arc::new(NoDelay)
    } else {
        Arc::new(RandomDelay::new(config.min_delay, config.max_delay))
    };
    let search = SearchClient::with_endpoint(&config.search_url)
        .context("failed to set up search client")?;
    let http = HttpClient::with_timeout(config.download_timeout)
        .context("failed to set up download client")?;
    let tool = Arc::new(CommandTool::new(&config.tool_program, &config.tool_label));

    let harvester = Harvester::new(search, http, tool, delay, &config.output_dir);
    let options = HarvestOptions {
        query,
        pages,
        mode: if args.fresh {
            RunMode::Fresh
        } else {
            RunMode::Resume
        },
        verify_signature: config.verify_signature,
    };

    info!(query = %options.query, pages, mode = ?options.mode, "scholar-harvest starting");
    let session = harvester
        .prepare_session(&options)
        .context("failed to prepare run folder")?;

    if args.open {
        open_folder(session.folder());
    }

    let stats = harvester.run_session(&session, &options).await;

    println!("Done: {stats}");
    println!("PDFs saved in: {}", session.folder().display());
    let _ = output.flush();

    // Record-level failures are listed in the error log, not the exit code.
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(default_level: &str) {
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// Defaults, then the config file, then command-line flags.
fn resolve_config(args: &Args) -> Result<HarvestConfig> {
    let file = match &args.config {
        Some(path) => Some(load_file_config(path)?),
        None => {
            let loaded = load_default_file_config()?;
            if let (Some(path), Some(_)) = (&loaded.path, &loaded.config) {
                debug!(path = %path.display(), "using config file");
            }
            loaded.config
        }
    };

    let mut config = match &file {
        Some(file) => HarvestConfig::default().with_file(file),
        None => HarvestConfig::default(),
    };
    if let Some(output_dir) = &args.output_dir {
        config.output_dir.clone_from(output_dir);
    }
    if let Some(tool) = &args.tool {
        config.tool_program.clone_from(tool);
        config.tool_label.clone_from(tool);
    }
    Ok(config)
}

/// Opens `folder` with the platform's file opener; failures are only logged.
fn open_folder(folder: &Path) {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };
    match std::process::Command::new(opener).arg(folder).spawn() {
        Ok(_) => debug!(opener, folder = %folder.display(), "opened run folder"),
        Err(error) => warn!(opener, error = %error, "could not open run folder"),
    }
}
