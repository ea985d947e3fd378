//! Search pipeline orchestration.

use mpscout_core::{ResultSet, SearchQuery};
use url::Url;

use crate::acquire::PageAcquirer;
use crate::browser::BrowserLauncher;
use crate::error::ScraperError;
use crate::extract::{decompose, extract_candidates, Extraction};
use crate::filter::filter_candidates;
use crate::search_url::build_search_url;

/// Acquire → extract → filter → decompose, for one query at a time.
pub struct ListingPipeline<L> {
    launcher: L,
    acquirer: PageAcquirer,
    marketplace_origin: String,
    listing_base: Url,
}

impl<L: BrowserLauncher> ListingPipeline<L> {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if `listing_base` is not an
    /// absolute URL.
    pub fn new(
        launcher: L,
        acquirer: PageAcquirer,
        marketplace_origin: impl Into<String>,
        listing_base: &str,
    ) -> Result<Self, ScraperError> {
        let listing_base = Url::parse(listing_base).map_err(|e| ScraperError::InvalidUrl {
            url: listing_base.to_owned(),
            source: e,
        })?;
        Ok(Self {
            launcher,
            acquirer,
            marketplace_origin: marketplace_origin.into(),
            listing_base,
        })
    }

    #[must_use]
    pub fn listing_base(&self) -> &Url {
        &self.listing_base
    }

    /// Runs one search end to end.
    ///
    /// Never fails: any acquisition error is logged and produces
    /// [`ResultSet::empty`], so callers only need to branch on emptiness.
    /// Note that this makes "nothing matched" and "page could not be
    /// loaded" look the same apart from [`ResultSet::complete`].
    pub async fn run(&self, query: &SearchQuery) -> ResultSet {
        let search_url = match build_search_url(&self.marketplace_origin, query) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, "could not build search URL; returning empty result set");
                return ResultSet::empty();
            }
        };

        tracing::info!(
            product = %query.product,
            city = %query.city,
            mode = %query.match_mode,
            "starting marketplace search"
        );

        let page = match self.acquirer.acquire(&self.launcher, &search_url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(error = %e, "page acquisition failed; returning empty result set");
                return ResultSet::empty();
            }
        };

        let mut results = process_markup(&page.markup, query, &self.listing_base);
        results.complete = page.complete;

        tracing::info!(
            matches = results.len(),
            total_candidates = results.total_candidates,
            complete = results.complete,
            "search finished"
        );
        results
    }
}

/// Extracts, filters and decomposes already-rendered markup.
///
/// Field decomposition runs only on candidates that pass the filter.
#[must_use]
pub fn process_markup(markup: &str, query: &SearchQuery, listing_base: &Url) -> ResultSet {
    let Extraction {
        candidates,
        total_links,
    } = extract_candidates(markup);

    let records = filter_candidates(candidates, query)
        .iter()
        .map(|candidate| decompose(candidate, listing_base))
        .collect();

    ResultSet {
        records,
        total_candidates: total_links,
        complete: true,
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
