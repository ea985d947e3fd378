//! Scroll-to-load page acquisition.
//!
//! Infinite-scroll result pages fetch more listings as the viewport nears
//! the bottom. The acquirer keeps scrolling until the document height stops
//! growing, then returns the rendered markup. Iterations and wall-clock time
//! are both capped; hitting either cap yields a partial page, not an error.

use std::time::{Duration, Instant};

use url::Url;

use crate::browser::{BrowserLauncher, BrowserSession};
use crate::error::ScraperError;

pub(crate) const HEIGHT_SCRIPT: &str = "return document.body.scrollHeight";
pub(crate) const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Accessible names of interstitials dismissed after navigation, in order.
pub const DISMISSABLE_DIALOGS: [&str; 2] = ["Decline optional cookies", "Close"];

pub const DEFAULT_MAX_SCROLLS: u32 = 100;
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(600);

/// Rendered markup of one search results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredPage {
    pub markup: String,
    /// Scroll steps performed.
    pub scrolls: u32,
    /// `false` when a cap stopped scrolling before the height settled.
    pub complete: bool,
}

/// Drives a browser session to a search URL and scrolls until no more
/// content loads.
#[derive(Debug, Clone)]
pub struct PageAcquirer {
    scroll_delay: Duration,
    max_scrolls: u32,
    deadline: Duration,
}

impl PageAcquirer {
    #[must_use]
    pub fn new(scroll_delay: Duration) -> Self {
        Self {
            scroll_delay,
            max_scrolls: DEFAULT_MAX_SCROLLS,
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Caps the number of scroll steps. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_scrolls(mut self, max_scrolls: u32) -> Self {
        self.max_scrolls = max_scrolls.max(1);
        self
    }

    /// Caps the total time spent in the scroll loop.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    #[must_use]
    pub fn scroll_delay(&self) -> Duration {
        self.scroll_delay
    }

    /// Launches a session, loads `url`, scrolls to the end and returns the
    /// rendered markup.
    ///
    /// The session is closed on every path out of this function. A failure
    /// to close is logged and does not mask the acquisition result.
    ///
    /// # Errors
    ///
    /// Returns the launcher's error if no session could be started, or the
    /// first [`ScraperError`] raised while navigating, scrolling or reading
    /// the page source.
    pub async fn acquire<L>(&self, launcher: &L, url: &Url) -> Result<AcquiredPage, ScraperError>
    where
        L: BrowserLauncher,
    {
        let mut session = launcher.launch().await?;
        let result = self.drive(&mut session, url).await;

        if let Err(e) = session.close().await {
            tracing::warn!(error = %e, "failed to close browser session");
        }

        result
    }

    async fn drive<S>(&self, session: &mut S, url: &Url) -> Result<AcquiredPage, ScraperError>
    where
        S: BrowserSession,
    {
        tracing::info!(%url, "loading search results");
        session.navigate(url.as_str()).await?;

        dismiss_dialogs(session).await;

        let (scrolls, complete) = self.scroll_to_end(session).await?;
        let markup = session.page_source().await?;

        tracing::info!(scrolls, complete, bytes = markup.len(), "page acquired");
        Ok(AcquiredPage {
            markup,
            scrolls,
            complete,
        })
    }

    /// Returns `(scroll steps, settled)`.
    async fn scroll_to_end<S>(&self, session: &mut S) -> Result<(u32, bool), ScraperError>
    where
        S: BrowserSession,
    {
        let started = Instant::now();
        let mut last_height = document_height(session).await?;
        let mut scrolls = 0u32;

        while scrolls < self.max_scrolls {
            session.execute_script(SCROLL_SCRIPT).await?;
            scrolls += 1;
            tokio::time::sleep(self.scroll_delay).await;

            let new_height = document_height(session).await?;
            tracing::debug!(scrolls, last_height, new_height, "scrolled");
            if new_height <= last_height {
                return Ok((scrolls, true));
            }
            last_height = new_height;

            if started.elapsed() >= self.deadline {
                tracing::warn!(
                    scrolls,
                    deadline_secs = self.deadline.as_secs(),
                    "scroll deadline reached; returning partial page"
                );
                return Ok((scrolls, false));
            }
        }

        tracing::warn!(
            max_scrolls = self.max_scrolls,
            "scroll limit reached; returning partial page"
        );
        Ok((scrolls, false))
    }
}

/// Best-effort dismissal of the cookie banner and generic modal. Missing
/// dialogs and click failures are expected and only logged at debug.
async fn dismiss_dialogs<S>(session: &mut S)
where
    S: BrowserSession,
{
    for name in DISMISSABLE_DIALOGS {
        match session.find_by_accessible_name(name).await {
            Ok(Some(element)) => match session.click(&element).await {
                Ok(()) => tracing::debug!(dialog = name, "dismissed dialog"),
                Err(e) => tracing::debug!(dialog = name, error = %e, "dialog click failed"),
            },
            Ok(None) => tracing::debug!(dialog = name, "dialog not present"),
            Err(e) => tracing::debug!(dialog = name, error = %e, "dialog lookup failed"),
        }
    }
}

async fn document_height<S>(session: &mut S) -> Result<f64, ScraperError>
where
    S: BrowserSession,
{
    let value = session.execute_script(HEIGHT_SCRIPT).await?;
    value
        .as_f64()
        .ok_or_else(|| ScraperError::UnexpectedScriptValue {
            script: HEIGHT_SCRIPT.to_string(),
            value,
        })
}

#[cfg(test)]
#[path = "acquire_test.rs"]
mod tests;
