//! Data models for the search configuration and the collected results.
//!
//! - [`SearchConfig`]: what to search for, how far back, and on which site
//! - [`SearchResult`]: one row of the report
//! - [`ResultSet`]: the report itself, kept as parallel columns

use serde::{Deserialize, Serialize};

/// Placeholder stored in the `picture` column when no thumbnail was saved.
pub const NO_PICTURE: &str = "No Picture Found";

/// Column names, in report order.
pub const FIELD_NAMES: [&str; 6] = [
    "title",
    "date",
    "description",
    "picture",
    "count_search_phrases",
    "description_contains_money",
];

/// Run configuration read from the asset store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Phrase typed into the site's search box and counted in results.
    pub search: String,
    /// Recency window level, 0 to 3.
    pub range_news: u8,
    /// Site to open.
    pub web_site: String,
}

/// A single accepted search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    /// Date text exactly as shown on the page.
    pub date: String,
    pub description: String,
    /// Saved thumbnail filename or [`NO_PICTURE`].
    pub picture: String,
    pub count_search_phrases: u32,
    pub description_contains_money: bool,
}

/// Accepted results stored column by column.
///
/// All columns always have the same length: [`ResultSet::push`] is the only
/// way in and it appends to every column at once.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    title: Vec<String>,
    date: Vec<String>,
    description: Vec<String>,
    picture: Vec<String>,
    count_search_phrases: Vec<u32>,
    description_contains_money: Vec<bool>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: SearchResult) {
        self.title.push(result.title);
        self.date.push(result.date);
        self.description.push(result.description);
        self.picture.push(result.picture);
        self.count_search_phrases.push(result.count_search_phrases);
        self.description_contains_money
            .push(result.description_contains_money);
    }

    pub fn len(&self) -> usize {
        self.title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
    }

    /// Lengths of every column, in [`FIELD_NAMES`] order.
    pub fn column_lengths(&self) -> [usize; 6] {
        [
            self.title.len(),
            self.date.len(),
            self.description.len(),
            self.picture.len(),
            self.count_search_phrases.len(),
            self.description_contains_money.len(),
        ]
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = SearchResult> + '_ {
        (0..self.len()).map(move |i| SearchResult {
            title: self.title[i].clone(),
            date: self.date[i].clone(),
            description: self.description[i].clone(),
            picture: self.picture[i].clone(),
            count_search_phrases: self.count_search_phrases[i],
            description_contains_money: self.description_contains_money[i],
        })
    }
}
