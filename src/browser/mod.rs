//! Browser automation behind a small capability interface.
//!
//! The search sequence and the result loop only need to locate elements by
//! XPath and read, click or type into them. [`PageDriver`] captures exactly
//! that so the scraping logic runs the same against a real WebDriver session
//! ([`webdriver::WebDriverPage`]) or an in-memory fake in tests.

pub mod webdriver;

use crate::error::Result;
use std::time::Duration;

#[allow(async_fn_in_trait)]
pub trait PageDriver {
    /// Whether an element matching `xpath` is currently displayed.
    async fn is_visible(&self, xpath: &str) -> Result<bool>;

    /// Block until an element matching `xpath` is displayed.
    async fn wait_until_visible(&self, xpath: &str) -> Result<()>;

    /// Wait for the element to become clickable, then click it.
    async fn click_when_clickable(&self, xpath: &str) -> Result<()>;

    /// Type `text` into the element and press Enter.
    async fn input_text_and_submit(&self, xpath: &str, text: &str) -> Result<()>;

    /// Choose the `<option>` with `value` in the `<select>` at `xpath`.
    async fn select_by_value(&self, xpath: &str, value: &str) -> Result<()>;

    async fn set_implicit_wait(&self, timeout: Duration) -> Result<()>;

    /// Number of elements currently matching `xpath`.
    async fn count_elements(&self, xpath: &str) -> Result<usize>;

    /// Visible text of the first element matching `xpath`.
    async fn text(&self, xpath: &str) -> Result<String>;

    /// Attribute value of the first element matching `xpath`, if present.
    async fn attribute(&self, xpath: &str, name: &str) -> Result<Option<String>>;

    /// End the browser session.
    async fn close(self) -> Result<()>;
}
