//! The search-to-report run once a browser session exists.
//!
//! Stages run in order: search, collect, outputs, teardown. A failing search
//! aborts the run after closing the browser. Output failures are logged with
//! `error!` and the run still reaches teardown.

use crate::browser::PageDriver;
use crate::error::Result;
use crate::filters::{MonthNames, RecencyWindow};
use crate::images::ImageDownloader;
use crate::models::ResultSet;
use crate::outputs::work_item::{WorkItem, RESULTS_VARIABLE};
use crate::outputs::xlsx;
use crate::scrapers::apnews::{self, CollectOptions};
use std::path::Path;
use tracing::{error, info, warn};

/// Everything a run needs besides the browser and the downloader.
#[derive(Debug)]
pub struct RunPlan<'a> {
    pub keyword: &'a str,
    pub window: RecencyWindow,
    pub months: &'a MonthNames,
    /// Directory for thumbnails and the spreadsheet.
    pub output_dir: &'a Path,
    pub input_item: &'a WorkItem,
    pub output_work_item: &'a Path,
}

/// Search, collect, write both outputs and close the browser.
///
/// # Arguments
///
/// * `page` - An open browser session on the target site; consumed and closed
/// * `downloader` - Used for result thumbnails
/// * `plan` - Keyword, recency window and output locations
///
/// # Returns
///
/// The collected results. They are returned even when writing the work item
/// or the spreadsheet failed, since those failures are only logged.
///
/// # Errors
///
/// Returns the search sequence's error. The browser is closed before the
/// error is returned.
pub async fn run<P: PageDriver, D: ImageDownloader>(
    page: P,
    downloader: &D,
    plan: &RunPlan<'_>,
) -> Result<ResultSet> {
    // ---- Search ----
    let found = match apnews::run_search(&page, plan.keyword).await {
        Ok(found) => found,
        Err(e) => {
            error!(error = %e, "Search sequence failed; aborting run");
            if let Err(close_err) = page.close().await {
                warn!(error = %close_err, "Failed to close browser after search failure");
            }
            return Err(e);
        }
    };

    // ---- Collect ----
    let options = CollectOptions {
        keyword: plan.keyword,
        window: plan.window,
        months: plan.months,
        output_dir: plan.output_dir,
    };
    let results = apnews::collect_results(&page, downloader, found, &options).await;
    if results.is_empty() {
        warn!(found, "No results fell inside the recency window");
    }

    // ---- Outputs ----
    let mut output_item = plan.input_item.derive_output();
    let saved = match output_item.set_variable(RESULTS_VARIABLE, &results) {
        Ok(()) => output_item.save(plan.output_work_item).await,
        Err(e) => Err(e),
    };
    if let Err(e) = saved {
        error!(path = %plan.output_work_item.display(), error = %e, "Error saving output work item");
    }

    info!("Saving results to Excel");
    if let Err(e) = xlsx::write_report(&results, plan.output_dir) {
        error!(error = %e, "Error saving results to Excel");
    }

    // ---- Teardown ----
    if let Err(e) = page.close().await {
        warn!(error = %e, "Failed to close browser");
    }
    info!(results = results.len(), found, "Browser closed");

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::FakePage;
    use crate::error::HarvestError;
    use crate::images::fake::FakeDownloader;
    use crate::scrapers::apnews::{
        result_date, result_description, result_title, CATEGORY_TOGGLE, RESULT_ITEMS,
        SEARCH_BUTTON, SEARCH_INPUT, STORIES_FILTER,
    };
    use chrono::NaiveDate;
    use std::rc::Rc;

    fn months() -> MonthNames {
        MonthNames::for_date(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    /// A page whose search succeeds with two results, one inside the window.
    fn page() -> FakePage {
        FakePage::default()
            .with_visible(SEARCH_BUTTON)
            .with_visible(SEARCH_INPUT)
            .with_visible(CATEGORY_TOGGLE)
            .with_visible(STORIES_FILTER)
            .with_visible(RESULT_ITEMS)
            .with_count(RESULT_ITEMS, 2)
            .with_text(result_title(1), "election night")
            .with_text(result_description(1), "An election story")
            .with_text(result_date(1), "Yesterday")
            .with_text(result_title(2), "old news")
            .with_text(result_description(2), "Old")
            .with_text(result_date(2), "March 1, 2026")
    }

    fn plan<'a>(
        months: &'a MonthNames,
        input_item: &'a WorkItem,
        output_dir: &'a Path,
        output_work_item: &'a Path,
    ) -> RunPlan<'a> {
        RunPlan {
            keyword: "election",
            window: RecencyWindow::CurrentMonth,
            months,
            output_dir,
            input_item,
            output_work_item,
        }
    }

    #[tokio::test]
    async fn test_run_writes_outputs_and_closes_browser() {
        let dir = tempfile::tempdir().unwrap();
        let item_path = dir.path().join("work-items-out/output.json");
        let months = months();
        let input = WorkItem::default();
        let page = page();
        let actions = Rc::clone(&page.actions);

        let results = run(
            page,
            &FakeDownloader::default(),
            &plan(&months, &input, dir.path(), &item_path),
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 1);
        assert!(dir.path().join(xlsx::REPORT_FILENAME).exists());
        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&item_path).unwrap()).unwrap();
        assert_eq!(
            saved["variables"][RESULTS_VARIABLE]["title"],
            serde_json::json!(["election night"])
        );
        assert_eq!(actions.borrow().last().map(String::as_str), Some("close"));
    }

    #[tokio::test]
    async fn test_run_closes_browser_when_search_fails() {
        let dir = tempfile::tempdir().unwrap();
        let item_path = dir.path().join("output.json");
        let months = months();
        let input = WorkItem::default();
        let mut page = page();
        page.visible.remove(SEARCH_BUTTON);
        let actions = Rc::clone(&page.actions);

        let result = run(
            page,
            &FakeDownloader::default(),
            &plan(&months, &input, dir.path(), &item_path),
        )
        .await;

        assert!(matches!(result, Err(HarvestError::ElementNotFound(_))));
        assert_eq!(*actions.borrow(), vec!["close".to_string()]);
        assert!(!item_path.exists());
        assert!(!dir.path().join(xlsx::REPORT_FILENAME).exists());
    }

    #[tokio::test]
    async fn test_run_continues_to_teardown_when_outputs_fail() {
        let dir = tempfile::tempdir().unwrap();
        // a regular file where the work item's parent directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let item_path = blocker.join("output.json");
        let missing_dir = dir.path().join("does/not/exist");
        let months = months();
        let input = WorkItem::default();
        let page = page();
        let actions = Rc::clone(&page.actions);

        let results = run(
            page,
            &FakeDownloader::default(),
            &plan(&months, &input, &missing_dir, &item_path),
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 1);
        assert!(!item_path.exists());
        assert!(!missing_dir.join(xlsx::REPORT_FILENAME).exists());
        assert_eq!(actions.borrow().last().map(String::as_str), Some("close"));
    }
}
