//! Error type shared by every step of the search pipeline.
//!
//! Each step returns `Result<_, HarvestError>` and the caller decides whether
//! the failure is ignorable (consent overlay, a single result, a thumbnail),
//! reportable (spreadsheet or work item export) or fatal (the search sequence).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    /// Invalid or missing configuration values.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("browser automation failed: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected http status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// The located element has no such attribute.
    #[error("attribute `{attribute}` not found at {locator}")]
    MissingAttribute { locator: String, attribute: String },

    #[error("no usable url in srcset `{0}`")]
    InvalidSrcset(String),

    /// No element matched the locator.
    #[error("element not found: {0}")]
    ElementNotFound(String),
}

pub type Result<T> = std::result::Result<T, HarvestError>;
