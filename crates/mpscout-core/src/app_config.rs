use std::path::PathBuf;

/// Process-wide settings for a scrape run, read from `MPSCOUT_*` variables.
///
/// CLI flags override the per-query values (`scroll_delay_ms`,
/// `fuzzy_threshold`, `export_dir`); the browser fields feed
/// `BrowserConfig::from_app_config` in the scraper crate.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub webdriver_url: String,
    pub marketplace_origin: String,
    pub listing_base_url: String,
    pub browser_binary: Option<PathBuf>,
    pub headless: bool,
    pub window_size: (u32, u32),
    pub scroll_delay_ms: u64,
    pub max_scrolls: u32,
    pub acquire_timeout_secs: u64,
    pub fuzzy_threshold: u8,
    pub export_dir: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The WebDriver URL may embed grid credentials.
        let webdriver_url = if self.webdriver_url.contains('@') {
            "[redacted]"
        } else {
            self.webdriver_url.as_str()
        };
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("webdriver_url", &webdriver_url)
            .field("marketplace_origin", &self.marketplace_origin)
            .field("listing_base_url", &self.listing_base_url)
            .field("browser_binary", &self.browser_binary)
            .field("headless", &self.headless)
            .field("window_size", &self.window_size)
            .field("scroll_delay_ms", &self.scroll_delay_ms)
            .field("max_scrolls", &self.max_scrolls)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("fuzzy_threshold", &self.fuzzy_threshold)
            .field("export_dir", &self.export_dir)
            .finish()
    }
}
