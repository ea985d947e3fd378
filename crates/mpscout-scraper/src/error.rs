use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("failed to start browser session at {webdriver_url}: {reason}")]
    Launch {
        webdriver_url: String,
        reason: String,
    },

    #[error("invalid URL \"{url}\": {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("script `{script}` returned {value}, expected a number")]
    UnexpectedScriptValue {
        script: String,
        value: serde_json::Value,
    },
}
