//! Browser automation capability used by the page acquirer.
//!
//! The acquirer only talks to [`BrowserLauncher`] and [`BrowserSession`], so
//! tests can drive it with a scripted in-memory session and the real run can
//! use the WebDriver backend in [`webdriver`].

mod webdriver;

use std::future::Future;
use std::path::PathBuf;

use mpscout_core::AppConfig;

use crate::error::ScraperError;

pub use webdriver::{WebDriverLauncher, WebDriverSession};

/// Starts browser sessions. One session per pipeline run; sessions are not pooled.
pub trait BrowserLauncher: Send + Sync {
    type Session: BrowserSession;

    /// Starts a fresh session.
    fn launch(&self) -> impl Future<Output = Result<Self::Session, ScraperError>> + Send;
}

/// An exclusively owned browser session.
///
/// [`close`](Self::close) consumes the session; callers must invoke it on
/// every exit path so the browser process is released.
pub trait BrowserSession: Send {
    type Element: Send + Sync;

    fn navigate(&mut self, url: &str) -> impl Future<Output = Result<(), ScraperError>> + Send;

    /// Runs `script` in the page and returns its JSON-converted result.
    fn execute_script(
        &mut self,
        script: &str,
    ) -> impl Future<Output = Result<serde_json::Value, ScraperError>> + Send;

    /// Looks up a button-like element by its accessible name (`aria-label`).
    /// `Ok(None)` means the element is simply not on the page.
    fn find_by_accessible_name(
        &mut self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Self::Element>, ScraperError>> + Send;

    fn click(
        &mut self,
        element: &Self::Element,
    ) -> impl Future<Output = Result<(), ScraperError>> + Send;

    /// Returns the current rendered DOM as HTML.
    fn page_source(&mut self) -> impl Future<Output = Result<String, ScraperError>> + Send;

    fn close(self) -> impl Future<Output = Result<(), ScraperError>> + Send;
}

/// How the WebDriver-backed browser is started.
///
/// Driver provisioning is out of scope: `webdriver_url` must point at a
/// running chromedriver or Selenium endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    pub headless: bool,
    pub binary: Option<PathBuf>,
    pub window_size: (u32, u32),
    /// Appended after the built-in Chrome arguments.
    pub extra_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            binary: None,
            window_size: (1920, 1080),
            extra_args: Vec::new(),
        }
    }
}

impl BrowserConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            headless: config.headless,
            binary: config.browser_binary.clone(),
            window_size: config.window_size,
            extra_args: Vec::new(),
        }
    }

    /// Command-line arguments passed to Chrome.
    ///
    /// The sandbox and `/dev/shm` flags keep Chrome usable inside containers.
    #[must_use]
    pub fn chrome_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(5 + self.extra_args.len());
        if self.headless {
            args.push("--headless".to_string());
            args.push("--disable-gpu".to_string());
        }
        args.push("--no-sandbox".to_string());
        args.push("--disable-dev-shm-usage".to_string());
        let (width, height) = self.window_size;
        args.push(format!("--window-size={width},{height}"));
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_headless_args() {
        let args = BrowserConfig::default().chrome_args();
        assert_eq!(
            args,
            vec![
                "--headless",
                "--disable-gpu",
                "--no-sandbox",
                "--disable-dev-shm-usage",
                "--window-size=1920,1080",
            ]
        );
    }

    #[test]
    fn headed_browser_skips_headless_flags() {
        let config = BrowserConfig {
            headless: false,
            window_size: (1280, 720),
            extra_args: vec!["--lang=en-US".to_string()],
            ..BrowserConfig::default()
        };
        let args = config.chrome_args();
        assert!(!args.iter().any(|a| a == "--headless"));
        assert!(!args.iter().any(|a| a == "--disable-gpu"));
        assert_eq!(args.last().map(String::as_str), Some("--lang=en-US"));
        assert!(args.contains(&"--window-size=1280,720".to_string()));
    }
}
