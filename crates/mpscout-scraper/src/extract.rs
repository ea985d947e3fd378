//! Anchor extraction and field decomposition.
//!
//! Every `<a>` on the results page is a candidate. A candidate's text lines
//! follow the marketplace card layout: price near the top, then the title,
//! then the location as the last line.

use mpscout_core::ListingRecord;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::parse::parse_price;

/// One anchor element before any field parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    /// Trimmed, non-empty text lines in document order.
    pub lines: Vec<String>,
    /// All descendant text concatenated without separators.
    pub text: String,
    /// Raw `href` attribute, if any.
    pub href: Option<String>,
}

impl RawCandidate {
    fn from_anchor(anchor: ElementRef<'_>) -> Self {
        Self {
            lines: text_lines(anchor),
            text: anchor.text().collect(),
            href: anchor.value().attr("href").map(str::to_owned),
        }
    }
}

/// Anchors found in a page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    pub candidates: Vec<RawCandidate>,
    /// Count of every anchor in the markup; kept for diagnostics.
    pub total_links: usize,
}

/// Parses `markup` and returns one candidate per anchor, in document order.
///
/// Pure: no I/O, and identical markup always yields identical output.
#[must_use]
pub fn extract_candidates(markup: &str) -> Extraction {
    let document = Html::parse_document(markup);
    let anchors = Selector::parse("a").expect("valid anchor selector");

    let candidates: Vec<RawCandidate> = document
        .select(&anchors)
        .map(RawCandidate::from_anchor)
        .collect();

    Extraction {
        total_links: candidates.len(),
        candidates,
    }
}

/// Decomposes a candidate into a [`ListingRecord`].
///
/// - `price`: first numeric run (see [`parse_price`]).
/// - `title`: second-to-last line, or `""` with fewer than two lines.
/// - `location`: last line, or `""` with no lines.
/// - `url`: `href` resolved against `listing_base`.
#[must_use]
pub fn decompose(candidate: &RawCandidate, listing_base: &Url) -> ListingRecord {
    let lines = &candidate.lines;
    let title = lines
        .len()
        .checked_sub(2)
        .and_then(|i| lines.get(i))
        .cloned()
        .unwrap_or_default();
    let location = lines.last().cloned().unwrap_or_default();

    ListingRecord {
        title,
        price: parse_price(lines),
        location,
        url: resolve_listing_url(listing_base, candidate.href.as_deref()),
    }
}

/// Resolves a listing `href` to an absolute URL.
///
/// Relative and root-relative hrefs are joined onto `listing_base`;
/// already-absolute hrefs are kept unchanged instead of being prefixed
/// a second time. A missing href resolves to the base itself.
#[must_use]
pub fn resolve_listing_url(listing_base: &Url, href: Option<&str>) -> String {
    let Some(href) = href else {
        return listing_base.to_string();
    };

    listing_base.join(href.trim()).map_or_else(
        |e| {
            tracing::warn!(href, error = %e, "could not resolve listing href; concatenating");
            format!(
                "{}/{}",
                listing_base.as_str().trim_end_matches('/'),
                href.trim_start_matches('/')
            )
        },
        |u| u.to_string(),
    )
}

/// Text lines of an element: each text node is trimmed, split on newlines,
/// and blank pieces are dropped.
fn text_lines(element: ElementRef<'_>) -> Vec<String> {
    element
        .text()
        .flat_map(|node| node.split('\n'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
