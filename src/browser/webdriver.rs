//! [`PageDriver`] over a WebDriver session (chromedriver or Selenium).

use super::PageDriver;
use crate::error::Result;
use std::time::Duration;
use thirtyfour::components::SelectElement;
use thirtyfour::prelude::ElementQueryable;
use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, Key, WebDriver};
use tracing::{debug, info, instrument};

/// How long explicit waits poll before giving up.
const WAIT_TIMEOUT: Duration = Duration::from_secs(10);
const WAIT_INTERVAL: Duration = Duration::from_millis(250);

/// A Chrome session opened on a single site.
pub struct WebDriverPage {
    driver: WebDriver,
}

impl std::fmt::Debug for WebDriverPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDriverPage").finish_non_exhaustive()
    }
}

impl WebDriverPage {
    /// Start Chrome through the WebDriver server at `server_url` and load `site`.
    #[instrument(level = "info", skip_all, fields(%server_url, %site, headless))]
    pub async fn open(server_url: &str, site: &str, headless: bool) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if headless {
            caps.set_headless()?;
        }
        caps.add_arg("--window-size=1920,1080")?;
        caps.add_arg("--disable-notifications")?;

        let driver = WebDriver::new(server_url, caps).await?;
        driver.goto(site).await?;
        info!("Browser session opened");
        Ok(Self { driver })
    }
}

impl PageDriver for WebDriverPage {
    async fn is_visible(&self, xpath: &str) -> Result<bool> {
        let elements = self.driver.find_all(By::XPath(xpath)).await?;
        match elements.first() {
            Some(element) => Ok(element.is_displayed().await?),
            None => Ok(false),
        }
    }

    async fn wait_until_visible(&self, xpath: &str) -> Result<()> {
        self.driver
            .query(By::XPath(xpath))
            .wait(WAIT_TIMEOUT, WAIT_INTERVAL)
            .and_displayed()
            .first()
            .await?;
        Ok(())
    }

    async fn click_when_clickable(&self, xpath: &str) -> Result<()> {
        let element = self
            .driver
            .query(By::XPath(xpath))
            .wait(WAIT_TIMEOUT, WAIT_INTERVAL)
            .and_clickable()
            .first()
            .await?;
        element.click().await?;
        debug!(%xpath, "Clicked element");
        Ok(())
    }

    async fn input_text_and_submit(&self, xpath: &str, text: &str) -> Result<()> {
        let element = self.driver.find(By::XPath(xpath)).await?;
        element.send_keys(text).await?;
        element.send_keys(Key::Enter).await?;
        Ok(())
    }

    async fn select_by_value(&self, xpath: &str, value: &str) -> Result<()> {
        let element = self.driver.find(By::XPath(xpath)).await?;
        SelectElement::new(&element).await?.select_by_value(value).await?;
        Ok(())
    }

    async fn set_implicit_wait(&self, timeout: Duration) -> Result<()> {
        self.driver.set_implicit_wait_timeout(timeout).await?;
        Ok(())
    }

    async fn count_elements(&self, xpath: &str) -> Result<usize> {
        Ok(self.driver.find_all(By::XPath(xpath)).await?.len())
    }

    async fn text(&self, xpath: &str) -> Result<String> {
        let element = self.driver.find(By::XPath(xpath)).await?;
        Ok(element.text().await?)
    }

    async fn attribute(&self, xpath: &str, name: &str) -> Result<Option<String>> {
        let element = self.driver.find(By::XPath(xpath)).await?;
        Ok(element.attr(name).await?)
    }

    async fn close(self) -> Result<()> {
        self.driver.quit().await?;
        info!("Browser session closed");
        Ok(())
    }
}
