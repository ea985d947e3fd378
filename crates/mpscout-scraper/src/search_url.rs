//! Marketplace search URL construction.

use mpscout_core::SearchQuery;
use url::Url;

use crate::error::ScraperError;

/// Only listings posted within this many days are requested.
const DAYS_SINCE_LISTED: &str = "1";

/// Builds the marketplace search URL for `query` under `origin`.
///
/// Given origin `"https://www.facebook.com"` and region `"123"`, produces
/// `https://www.facebook.com/marketplace/123/search?query=...&minPrice=...&maxPrice=...&daysSinceListed=1&exact=true`.
///
/// The `exact` parameter mirrors [`SearchQuery::match_mode`] even though
/// the local filter is applied independently of what the site does with it.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `origin` does not parse or cannot
/// carry a path (e.g. `mailto:`).
pub fn build_search_url(origin: &str, query: &SearchQuery) -> Result<Url, ScraperError> {
    let invalid = |source| ScraperError::InvalidUrl {
        url: origin.to_owned(),
        source,
    };

    let mut search_url = Url::parse(origin).map_err(invalid)?;
    search_url
        .path_segments_mut()
        .map_err(|()| invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(["marketplace", query.region_code.as_str(), "search"]);

    search_url
        .query_pairs_mut()
        .append_pair("query", &query.product)
        .append_pair("minPrice", &query.min_price.to_string())
        .append_pair("maxPrice", &query.max_price.to_string())
        .append_pair("daysSinceListed", DAYS_SINCE_LISTED)
        .append_pair("exact", query.match_mode.exact_param());

    Ok(search_url)
}
