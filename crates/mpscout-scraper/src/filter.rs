//! Relevance filtering of extracted candidates.

use mpscout_core::{MatchMode, SearchQuery};

use crate::extract::RawCandidate;
use crate::fuzzy::partial_ratio;

/// Returns `true` if `text` is relevant to `query`.
///
/// The city must appear in `text` as a case-insensitive substring in both
/// modes. The product must then either appear the same way
/// ([`MatchMode::Exact`]) or reach a [`partial_ratio`] strictly above
/// `query.fuzzy_threshold` ([`MatchMode::Fuzzy`]).
#[must_use]
pub fn matches_query(text: &str, query: &SearchQuery) -> bool {
    let text = text.to_lowercase();
    if !text.contains(&query.city.to_lowercase()) {
        return false;
    }

    let product = query.product.to_lowercase();
    match query.match_mode {
        MatchMode::Exact => text.contains(&product),
        MatchMode::Fuzzy => partial_ratio(&product, &text) > query.fuzzy_threshold,
    }
}

/// Keeps the candidates whose text matches `query`, preserving order.
/// Scores are not used for ranking.
#[must_use]
pub fn filter_candidates(candidates: Vec<RawCandidate>, query: &SearchQuery) -> Vec<RawCandidate> {
    candidates
        .into_iter()
        .filter(|c| matches_query(&c.text, query))
        .collect()
}
