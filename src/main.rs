//! # NYT News Scraper
//!
//! Searches the New York Times for a phrase, optionally narrowed to one news
//! section, and exports what it finds.
//!
//! ## Features
//!
//! - Reads its run variables from a work-item file, flags or environment
//! - Extracts title, date and description for every search result
//! - Flags articles whose title or description mentions a dollar amount
//! - Writes `news_data.xlsx` and one image per article, named by spreadsheet row
//!
//! ## Usage
//!
//! ```sh
//! nyt_news_scraper --work-item devdata/work-items-in/input.json
//! nyt_news_scraper -s "interest rates" -c Business -o ./output
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: merge CLI values over the work item into a [`workitem::RunConfig`]
//! 2. **Search**: open the site and load the (filtered) result page
//! 3. **Extraction**: normalize and classify each result, then number the rows
//! 4. **Output**: write the spreadsheet, then the images; the session is closed either way

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod browser;
mod classify;
mod cli;
mod error;
mod extract;
mod models;
mod outputs;
mod runner;
mod utils;
mod workitem;

use browser::nyt::NytBrowser;
use cli::Cli;
use outputs::OutputPaths;
use utils::ensure_writable_dir;
use workitem::{RunConfig, WorkItem};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("nyt_news_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let item = match &args.work_item {
        Some(path) => WorkItem::load(path).await?,
        None => WorkItem::default(),
    };
    let config = RunConfig::resolve(&args, &item)?;
    info!(
        search_phrase = %config.search_phrase,
        category = ?config.category,
        number_of_months = ?config.number_of_months,
        "Resolved run configuration"
    );

    // Early check: fail before opening a session if results can't be written
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let outputs = OutputPaths::under(&args.output_dir);
    let mut browser = NytBrowser::new(&args.base_url)?;
    let summary = runner::run(&mut browser, &config, &outputs).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        records = summary.records,
        images = summary.images_written,
        spreadsheet = %summary.spreadsheet.display(),
        images_dir = %summary.images_dir.display(),
        "Execution complete"
    );

    Ok(())
}
