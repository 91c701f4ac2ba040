//! # News Search Report
//!
//! A one-shot batch tool that searches a news site through a WebDriver
//! browser session, keeps the results published inside a recency window, and
//! exports them to a spreadsheet and an output work item.
//!
//! ## Usage
//!
//! ```sh
//! news_search_report -a assets.json -o ./output
//! ```
//!
//! ## Architecture
//!
//! The application is a single sequential pipeline:
//! 1. **Configuration**: read `{search, range_news, web_site}` from the asset store
//! 2. **Search**: open the browser, dismiss overlays, search, filter and sort
//! 3. **Collect**: read each result, keep the recent ones, count keyword hits,
//!    detect dollar amounts and download thumbnails
//! 4. **Output**: save the work item and write `search_results.xlsx`
//! 5. **Teardown**: close the browser

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod browser;
mod cli;
mod config;
mod error;
mod filters;
mod images;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use browser::webdriver::WebDriverPage;
use cli::Cli;
use config::AssetStore;
use filters::MonthNames;
use images::HttpDownloader;
use models::SearchConfig;
use outputs::work_item::WorkItem;
use pipeline::RunPlan;
use utils::ensure_writable_dir;

#[tokio::main(flavor = "current_thread")]
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
    info!("news_search_report starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    // ---- Configuration & input work item ----
    let store = AssetStore::load(&args.assets).await?;
    let config = SearchConfig::from_store(&store)?;
    let window = config.window()?;
    info!(search = %config.search, range_news = config.range_news, web_site = %config.web_site, "Loaded configuration");

    let input_item = WorkItem::load(&args.input_work_item).await?;
    let months = MonthNames::for_date(Local::now().date_naive());
    debug!(?months, "Computed month names");
    let downloader = HttpDownloader::new()?;

    // ---- Search, collect, outputs, teardown ----
    let page = WebDriverPage::open(&args.webdriver_url, &config.web_site, !args.headed).await?;
    let output_work_item = args.output_work_item_path();
    let plan = RunPlan {
        keyword: &config.search,
        window,
        months: &months,
        output_dir: &args.output_dir,
        input_item: &input_item,
        output_work_item: &output_work_item,
    };
    let results = pipeline::run(page, &downloader, &plan).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        results = results.len(),
        "Task completed"
    );

    Ok(())
}
