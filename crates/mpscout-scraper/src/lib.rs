pub mod acquire;
pub mod browser;
pub mod error;
pub mod extract;
pub mod filter;
pub mod fuzzy;
pub mod parse;
pub mod pipeline;
pub mod search_url;

#[cfg(test)]
pub(crate) mod testing;

pub use acquire::{AcquiredPage, PageAcquirer};
pub use browser::{BrowserConfig, BrowserLauncher, BrowserSession, WebDriverLauncher};
pub use error::ScraperError;
pub use extract::{decompose, extract_candidates, resolve_listing_url, Extraction, RawCandidate};
pub use filter::{filter_candidates, matches_query};
pub use fuzzy::{partial_ratio, ratio};
pub use parse::parse_price;
pub use pipeline::{process_markup, ListingPipeline};
pub use search_url::build_search_url;
