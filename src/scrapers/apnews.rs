//! AP News search scraper.
//!
//! Drives the site's search UI through a [`PageDriver`] and walks the result
//! list. All XPath locators for the site's markup live in this module.
//!
//! # Flow
//!
//! 1. [`run_search`]: dismiss the consent overlay, search for the keyword,
//!    restrict to stories, sort by newest, and count the result elements
//! 2. [`collect_results`]: read each result, keep the recent ones, and enrich
//!    them with keyword counts, money detection and a thumbnail

use crate::browser::PageDriver;
use crate::error::{HarvestError, Result};
use crate::filters::{contains_money, count_search_phrases, MonthNames, RecencyWindow};
use crate::images::{save_thumbnail, ImageDownloader};
use crate::models::{ResultSet, SearchResult, NO_PICTURE};
use crate::utils::truncate_for_log;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

pub const SEARCH_BUTTON: &str = "//div//bsp-search-overlay";
pub const SEARCH_INPUT: &str = "//input[@type='text' and @name='q']";
pub const CATEGORY_TOGGLE: &str = "//bsp-toggler[@data-toggle-in='search-filter']";
/// The "Stories" checkbox in the category filter.
pub const STORIES_FILTER: &str = "//input[@value='00000189-9323-dce2-ad8f-bbe74c770000']";
pub const SORT_SELECT: &str = "//select[@class='Select-input']";
pub const RESULT_ITEMS: &str =
    "//div[@class='SearchResultsModule-results']//div[@class='PageList-items-item']";
pub const CONSENT_CLOSE: &str = "//a[@title='Close']";

/// Sort option value for "Newest".
pub const SORT_NEWEST: &str = "3";
const IMPLICIT_WAIT: Duration = Duration::from_secs(10);

pub(crate) fn result_title(index: usize) -> String {
    format!("{RESULT_ITEMS}[{index}]//div[@class='PagePromo-title']/a/span")
}

pub(crate) fn result_description(index: usize) -> String {
    format!("{RESULT_ITEMS}[{index}]//div[@class='PagePromo-description']/a/span")
}

pub(crate) fn result_date(index: usize) -> String {
    format!("{RESULT_ITEMS}[{index}]//div[@class='PagePromo-date']//span")
}

pub(crate) fn result_picture(index: usize) -> String {
    format!("{RESULT_ITEMS}[{index}]//div/div/a/picture/source")
}

/// Close the cookie/consent overlay if it is showing.
///
/// Never fails: problems are logged and the overlay is left alone.
pub async fn dismiss_consent<P: PageDriver>(page: &P) -> bool {
    let attempt = async {
        if page.is_visible(CONSENT_CLOSE).await? {
            page.click_when_clickable(CONSENT_CLOSE).await?;
            return Ok::<bool, HarvestError>(true);
        }
        Ok(false)
    };
    match attempt.await {
        Ok(true) => {
            info!("Cookie notice dismissed");
            true
        }
        Ok(false) => false,
        Err(e) => {
            warn!(error = %e, "Failed to dismiss cookie notice");
            false
        }
    }
}

/// Run the search for `keyword` and return how many result elements the
/// page shows.
///
/// The consent overlay, the search button click and the stories filter are
/// best-effort. Every other step is required and its error is returned.
///
/// # Arguments
///
/// * `page` - Browser session already on the site's front page
/// * `keyword` - Text typed into the search box
///
/// # Returns
///
/// The number of result elements on the sorted results page.
#[instrument(level = "info", skip(page))]
pub async fn run_search<P: PageDriver>(page: &P, keyword: &str) -> Result<usize> {
    dismiss_consent(page).await;

    page.wait_until_visible(SEARCH_BUTTON).await?;
    if let Err(e) = page.click_when_clickable(SEARCH_BUTTON).await {
        warn!(error = %e, "Search button click failed; retrying after consent dismissal");
        dismiss_consent(page).await;
        if let Err(e) = page.click_when_clickable(SEARCH_BUTTON).await {
            warn!(error = %e, "Search button retry failed");
        }
    }

    page.wait_until_visible(SEARCH_INPUT).await?;
    page.input_text_and_submit(SEARCH_INPUT, keyword).await?;

    page.wait_until_visible(CATEGORY_TOGGLE).await?;
    page.click_when_clickable(CATEGORY_TOGGLE).await?;
    let stories = async {
        page.wait_until_visible(CATEGORY_TOGGLE).await?;
        page.click_when_clickable(STORIES_FILTER).await
    };
    if let Err(e) = stories.await {
        warn!(error = %e, "Stories filter could not be selected");
    }

    page.select_by_value(SORT_SELECT, SORT_NEWEST).await?;
    page.set_implicit_wait(IMPLICIT_WAIT).await?;
    dismiss_consent(page).await;

    page.wait_until_visible(RESULT_ITEMS).await?;
    let found = page.count_elements(RESULT_ITEMS).await?;
    info!(found, "Search results visible");
    Ok(found)
}

/// Text fields of one result element.
#[derive(Debug)]
struct ResultText {
    title: String,
    description: String,
    date: String,
}

async fn read_result<P: PageDriver>(page: &P, index: usize) -> Result<ResultText> {
    Ok(ResultText {
        title: page.text(&result_title(index)).await?,
        description: page.text(&result_description(index)).await?,
        date: page.text(&result_date(index)).await?,
    })
}

/// Thumbnail filename for result `index`, or [`NO_PICTURE`] on any failure.
async fn thumbnail<P: PageDriver, D: ImageDownloader>(
    page: &P,
    downloader: &D,
    index: usize,
    counter: u32,
    output_dir: &Path,
) -> String {
    let attempt = async {
        let locator = result_picture(index);
        let srcset = page
            .attribute(&locator, "srcset")
            .await?
            .ok_or_else(|| HarvestError::MissingAttribute {
                locator,
                attribute: "srcset".to_string(),
            })?;
        save_thumbnail(downloader, &srcset, counter, output_dir).await
    };
    match attempt.await {
        Ok(name) => name,
        Err(e) => {
            warn!(index, error = %e, "Image download failed");
            NO_PICTURE.to_string()
        }
    }
}

/// Settings shared by every result in one pass.
#[derive(Debug)]
pub struct CollectOptions<'a> {
    pub keyword: &'a str,
    pub window: RecencyWindow,
    pub months: &'a MonthNames,
    pub output_dir: &'a Path,
}

/// Walk the first `found` result elements and keep those inside the window.
///
/// A result whose text cannot be read is logged and skipped. Accepted
/// results are numbered from 1 for their thumbnail filenames.
///
/// # Arguments
///
/// * `page` - Browser session showing the results of [`run_search`]
/// * `downloader` - Fetches each accepted result's thumbnail
/// * `found` - How many result elements to visit, counted once beforehand
/// * `options` - Keyword, recency window, month names and image directory
///
/// # Returns
///
/// The accepted results in page order. Never fails; per-result problems are
/// logged.
#[instrument(level = "info", skip_all, fields(found = found, window = ?options.window))]
pub async fn collect_results<P: PageDriver, D: ImageDownloader>(
    page: &P,
    downloader: &D,
    found: usize,
    options: &CollectOptions<'_>,
) -> ResultSet {
    let mut results = ResultSet::new();
    let mut counter = 0u32;

    for index in 1..=found {
        let text = match read_result(page, index).await {
            Ok(text) => text,
            Err(e) => {
                error!(index, error = %e, "Error processing result");
                continue;
            }
        };
        debug!(index, title = %truncate_for_log(&text.title, 80), date = %text.date, "Read result");

        if options.window.includes(&text.date, options.months) {
            counter += 1;
            let picture = thumbnail(page, downloader, index, counter, options.output_dir).await;
            results.push(SearchResult {
                count_search_phrases: count_search_phrases(
                    &text.title,
                    &text.description,
                    options.keyword,
                ),
                description_contains_money: contains_money(&text.title, &text.description),
                title: text.title,
                date: text.date,
                description: text.description,
                picture,
            });
        }
        info!("Processed result {index}/{found}");
    }

    debug_assert!(results.column_lengths().iter().all(|&n| n == results.len()));
    info!(accepted = results.len(), found, "Collected search results");
    results
}
