//! # Health News Scraper
//!
//! Collects recent articles from a fixed list of English-language health news
//! outlets and saves each one as a plain-text file.
//!
//! ## Usage
//!
//! ```sh
//! health_news_scraper --max-articles 2
//! ```
//!
//! ## Architecture
//!
//! The application runs one sequential pipeline per invocation:
//! 1. **Startup**: resolve the output directory and prove it is writable (fatal otherwise)
//! 2. **Indexing**: fetch each source's listing page and classify its links
//! 3. **Extraction**: fetch each candidate article and pull out title and body
//! 4. **Output**: write one `.txt` file per usable article, log a run summary

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::time::Instant;
use tracing::{debug, error, info};

mod cli;
mod config;
mod fetch;
mod logging;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod sources;
mod text;
mod utils;

use cli::Cli;
use config::RunConfig;
use fetch::HttpFetcher;
use logging::init_logging;
use outputs::json;
use pipeline::run_job;
use sources::SOURCES;
use utils::{ensure_writable_dir, run_timestamp};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let start_time = Instant::now();

    let args = Cli::parse();
    let config = RunConfig::from_cli(&args)?;

    // The run log lives in the output directory, so probe before wiring it up.
    let probe = ensure_writable_dir(&config.output_dir).await;
    let _log_guard = init_logging(probe.is_ok().then_some(config.output_dir.as_path()))?;

    info!(
        output_dir = %config.output_dir.display(),
        log = %config.log_path().display(),
        "Starting health news fetch job"
    );
    debug!(?config, "Resolved run configuration");

    let timestamp = run_timestamp(Local::now());
    let result = run_job(&config, probe, timestamp, HttpFetcher::new, SOURCES).await?;

    if result.is_empty() {
        info!("No articles found.");
    } else {
        info!(
            files = result.files.len(),
            write_failures = result.write_failures,
            "Fetched and saved {} articles.",
            result.articles.len()
        );
    }

    if let Some(path) = &args.summary_json {
        if let Err(e) = json::write_summary(&result, path).await {
            error!(path = %path.display(), error = %e, "Failed to write run summary");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
