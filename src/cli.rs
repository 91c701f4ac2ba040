//! Command-line interface definitions for News Search Report.
//!
//! Every option can also be supplied through the environment variable shown
//! in `--help`, so the binary runs unchanged under a task runner.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the News Search Report application.
///
/// # Examples
///
/// ```sh
/// # Defaults: ./assets.json, ./output, chromedriver on port 9515
/// news_search_report
///
/// # Explicit paths and a Selenium grid, with a visible browser
/// news_search_report -a vault.json -o /tmp/out \
///     --webdriver-url http://localhost:4444 --headed
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// JSON asset store holding the `Config_Data_Challenge` entry
    #[arg(short, long, env = "ASSETS_PATH", default_value = "assets.json")]
    pub assets: PathBuf,

    /// Directory for thumbnails and the spreadsheet
    #[arg(short, long, env = "ROBOT_ARTIFACTS", default_value = "output")]
    pub output_dir: PathBuf,

    /// Input work item (JSON); an empty item is used when the file is absent
    #[arg(long, env = "RPA_INPUT_WORKITEM_PATH", default_value = "work-items-in/input.json")]
    pub input_work_item: PathBuf,

    /// Output work item (JSON); defaults to `<output-dir>/work-items-out/output.json`
    #[arg(long, env = "RPA_OUTPUT_WORKITEM_PATH")]
    pub output_work_item: Option<PathBuf>,

    /// WebDriver server to drive the browser through
    #[arg(long, env = "WEBDRIVER_URL", default_value = "http://localhost:9515")]
    pub webdriver_url: String,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,
}

impl Cli {
    pub fn output_work_item_path(&self) -> PathBuf {
        self.output_work_item.clone().unwrap_or_else(|| {
            self.output_dir
                .join("work-items-out")
                .join("output.json")
        })
    }
}
