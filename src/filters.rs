//! Result filtering and enrichment rules.
//!
//! Everything here is pure: the recency window test, keyword counting and the
//! currency detector take strings in and hand values back. The month names
//! used by the recency window are computed once per run from the run date.

use crate::error::HarvestError;
use chrono::{Datelike, Month, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Relative markers the site uses for very recent stories.
const RECENT_MARKERS: [&str; 2] = ["Yesterday", "ago"];

/// Anchored dollar amounts: `$1,234.56`, `$12.3`, `1,000 dollars`, `500 USD`.
static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\$(\d{1,3}(,\d{3})*\.\d{2}|\d{1,2}\.\d{1})$|^\d{1,3}(,\d{3})*\s+dollars$|^\d{1,3}(,\d{3})*\s+USD$",
    )
    .expect("money pattern is a valid regex")
});

/// English month names for the current month and the two before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthNames {
    pub current: &'static str,
    pub last: &'static str,
    pub before_last: &'static str,
}

impl MonthNames {
    /// Month names relative to `today`, wrapping across the year boundary.
    pub fn for_date(today: NaiveDate) -> Self {
        let current =
            Month::try_from(today.month() as u8).expect("chrono months are always 1..=12");
        let last = current.pred();
        let before_last = last.pred();
        Self {
            current: current.name(),
            last: last.name(),
            before_last: before_last.name(),
        }
    }
}

/// How far back a result's date may be and still be reported.
///
/// Levels 0 and 1 both map to [`RecencyWindow::CurrentMonth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RecencyWindow {
    CurrentMonth,
    LastMonth,
    BeforeLastMonth,
}

impl TryFrom<u8> for RecencyWindow {
    type Error = HarvestError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 | 1 => Ok(Self::CurrentMonth),
            2 => Ok(Self::LastMonth),
            3 => Ok(Self::BeforeLastMonth),
            other => Err(HarvestError::Config(format!(
                "range_news must be between 0 and 3, got {other}"
            ))),
        }
    }
}

impl RecencyWindow {
    /// Substrings any one of which admits a date text into this window.
    pub fn markers<'a>(&self, months: &'a MonthNames) -> Vec<&'a str> {
        let mut markers = RECENT_MARKERS.to_vec();
        markers.push(months.current);
        if *self >= Self::LastMonth {
            markers.push(months.last);
        }
        if *self >= Self::BeforeLastMonth {
            markers.push(months.before_last);
        }
        markers
    }

    /// Whether a result dated `date_text` falls inside the window.
    pub fn includes(&self, date_text: &str, months: &MonthNames) -> bool {
        self.markers(months)
            .into_iter()
            .any(|marker| date_text.contains(marker))
    }
}

/// Non-overlapping, case-sensitive occurrences of `keyword` in `text`.
pub fn count_occurrences(text: &str, keyword: &str) -> u32 {
    if keyword.is_empty() {
        return 0;
    }
    text.matches(keyword).count() as u32
}

/// Keyword occurrences in the title plus those in the description.
pub fn count_search_phrases(title: &str, description: &str, keyword: &str) -> u32 {
    count_occurrences(title, keyword) + count_occurrences(description, keyword)
}

/// True when the whole of `text` is a dollar amount.
pub fn is_money(text: &str) -> bool {
    MONEY_PATTERN.is_match(text)
}

/// True when either text, on its own, is a dollar amount.
pub fn contains_money(title: &str, description: &str) -> bool {
    is_money(title) || is_money(description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn october() -> MonthNames {
        MonthNames::for_date(date(2026, 10, 18))
    }

    #[test]
    fn test_month_names_mid_year() {
        let months = october();
        assert_eq!(months.current, "October");
        assert_eq!(months.last, "September");
        assert_eq!(months.before_last, "August");
    }

    #[test]
    fn test_month_names_wrap_year() {
        let months = MonthNames::for_date(date(2026, 2, 28));
        assert_eq!(months.current, "February");
        assert_eq!(months.last, "January");
        assert_eq!(months.before_last, "December");
    }

    #[test]
    fn test_month_names_first_of_month() {
        let months = MonthNames::for_date(date(2026, 8, 1));
        assert_eq!(months.last, "July");
        assert_eq!(months.before_last, "June");
    }

    #[test]
    fn test_window_levels() {
        assert_eq!(RecencyWindow::try_from(0u8).unwrap(), RecencyWindow::CurrentMonth);
        assert_eq!(RecencyWindow::try_from(1u8).unwrap(), RecencyWindow::CurrentMonth);
        assert_eq!(RecencyWindow::try_from(2u8).unwrap(), RecencyWindow::LastMonth);
        assert_eq!(RecencyWindow::try_from(3u8).unwrap(), RecencyWindow::BeforeLastMonth);
    }

    #[test]
    fn test_window_out_of_range_is_config_error() {
        for level in [4u8, 9, 255] {
            assert!(matches!(
                RecencyWindow::try_from(level),
                Err(HarvestError::Config(_))
            ));
        }
    }

    #[test]
    fn test_current_month_window() {
        let months = october();
        let window = RecencyWindow::CurrentMonth;
        assert!(window.includes("Yesterday", &months));
        assert!(window.includes("3 days ago", &months));
        assert!(window.includes("5 mins ago", &months));
        assert!(window.includes("October 12, 2026", &months));
        assert!(!window.includes("September 30, 2026", &months));
        assert!(!window.includes("", &months));
    }

    #[test]
    fn test_yesterday_is_substring_match() {
        let months = october();
        assert!(RecencyWindow::CurrentMonth.includes("Updated Yesterday", &months));
        assert!(!RecencyWindow::CurrentMonth.includes("yesterday", &months));
    }

    #[test]
    fn test_wider_windows() {
        let months = october();
        assert!(RecencyWindow::LastMonth.includes("September 30, 2026", &months));
        assert!(!RecencyWindow::LastMonth.includes("August 2, 2026", &months));
        assert!(RecencyWindow::BeforeLastMonth.includes("August 2, 2026", &months));
        assert!(!RecencyWindow::BeforeLastMonth.includes("July 2, 2026", &months));
    }

    #[test]
    fn test_inclusion_monotonic_in_level() {
        let months = october();
        let texts = [
            "Yesterday",
            "2 hours ago",
            "October 1, 2026",
            "September 14, 2026",
            "August 20, 2026",
            "July 4, 2026",
            "March 3, 2025",
            "",
        ];
        for text in texts {
            for lower in 0u8..=3 {
                let low = RecencyWindow::try_from(lower).unwrap();
                if !low.includes(text, &months) {
                    continue;
                }
                for higher in lower..=3 {
                    let high = RecencyWindow::try_from(higher).unwrap();
                    assert!(
                        high.includes(text, &months),
                        "{text:?} included at {lower} but not at {higher}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_count_occurrences() {
        assert_eq!(count_occurrences("election day election", "election"), 2);
        assert_eq!(count_occurrences("Election", "election"), 0);
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("nothing here", "election"), 0);
        assert_eq!(count_occurrences("anything", ""), 0);
    }

    #[test]
    fn test_count_search_phrases_sums_fields() {
        let n = count_search_phrases(
            "election results",
            "the election, the reelection, the election night",
            "election",
        );
        assert_eq!(n, 1 + 3);
    }

    #[test]
    fn test_is_money_accepts() {
        assert!(is_money("$1,234.56"));
        assert!(is_money("$12.3"));
        assert!(is_money("$999.00"));
        assert!(is_money("1,000 dollars"));
        assert!(is_money("500 USD"));
        assert!(is_money("12,345,678  USD"));
    }

    #[test]
    fn test_is_money_rejects() {
        assert!(!is_money("$12.345"));
        assert!(!is_money("abc"));
        assert!(!is_money("$123.4"));
        assert!(!is_money("It cost $1,234.56 today"));
        assert!(!is_money("1000,000 dollars"));
        assert!(!is_money("500 usd"));
        assert!(!is_money(""));
    }

    #[test]
    fn test_contains_money_either_field() {
        assert!(contains_money("$1,234.56", "no money here"));
        assert!(contains_money("no money here", "500 USD"));
        assert!(!contains_money("cost $5.00", "about 500 USD"));
    }
}
