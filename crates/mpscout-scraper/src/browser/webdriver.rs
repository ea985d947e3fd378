//! [`BrowserLauncher`] backed by a WebDriver server via `thirtyfour`.

use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver, WebElement};

use super::{BrowserConfig, BrowserLauncher, BrowserSession};
use crate::error::ScraperError;

/// Launches Chrome sessions through the configured WebDriver endpoint.
#[derive(Debug, Clone)]
pub struct WebDriverLauncher {
    config: BrowserConfig,
}

impl WebDriverLauncher {
    #[must_use]
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }
}

impl BrowserLauncher for WebDriverLauncher {
    type Session = WebDriverSession;

    async fn launch(&self) -> Result<WebDriverSession, ScraperError> {
        let launch_error = |reason: String| ScraperError::Launch {
            webdriver_url: self.config.webdriver_url.clone(),
            reason,
        };

        let mut caps = DesiredCapabilities::chrome();
        for arg in self.config.chrome_args() {
            caps.add_arg(&arg)?;
        }
        if let Some(binary) = &self.config.binary {
            caps.set_binary(&binary.to_string_lossy())?;
        }

        tracing::debug!(webdriver_url = %self.config.webdriver_url, "starting browser session");
        let driver = WebDriver::new(self.config.webdriver_url.as_str(), caps)
            .await
            .map_err(|e| launch_error(e.to_string()))?;

        Ok(WebDriverSession { driver })
    }
}

/// A live WebDriver session. Released by [`BrowserSession::close`].
pub struct WebDriverSession {
    driver: WebDriver,
}

impl BrowserSession for WebDriverSession {
    type Element = WebElement;

    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn execute_script(&mut self, script: &str) -> Result<serde_json::Value, ScraperError> {
        let ret = self.driver.execute(script, Vec::new()).await?;
        Ok(ret.json().clone())
    }

    async fn find_by_accessible_name(
        &mut self,
        name: &str,
    ) -> Result<Option<WebElement>, ScraperError> {
        // `find_all` returns an empty list instead of a NoSuchElement error.
        let xpath = accessible_button_xpath(name);
        let found = self.driver.find_all(By::XPath(xpath.as_str())).await?;
        Ok(found.into_iter().next())
    }

    async fn click(&mut self, element: &WebElement) -> Result<(), ScraperError> {
        element.click().await?;
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, ScraperError> {
        Ok(self.driver.source().await?)
    }

    async fn close(self) -> Result<(), ScraperError> {
        self.driver.quit().await?;
        Ok(())
    }
}

/// XPath for a `div[role=button]` whose `aria-label` equals `name`.
fn accessible_button_xpath(name: &str) -> String {
    format!(
        "//div[@aria-label={} and @role=\"button\"]",
        xpath_literal(name)
    )
}

/// Quotes `value` as an XPath 1.0 string literal. XPath has no escape
/// sequences, so values containing both quote kinds are built with `concat()`.
fn xpath_literal(value: &str) -> String {
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    let parts: Vec<String> = value
        .split('"')
        .map(|part| format!("\"{part}\""))
        .collect();
    format!("concat({})", parts.join(", '\"', "))
}
