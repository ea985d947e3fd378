//! Search query supplied by the UI layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fuzzy threshold used when the caller does not pick one (0–100 scale).
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 70;

/// How extracted candidates are matched against the query terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive substring containment of the product term.
    #[default]
    Exact,
    /// Partial-ratio similarity of the product term above a threshold.
    Fuzzy,
}

impl MatchMode {
    /// Value of the marketplace's `exact` query parameter for this mode.
    #[must_use]
    pub fn exact_param(self) -> &'static str {
        match self {
            MatchMode::Exact => "true",
            MatchMode::Fuzzy => "false",
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Exact => write!(f, "exact"),
            MatchMode::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("city must not be empty")]
    EmptyCity,

    #[error("product must not be empty")]
    EmptyProduct,

    #[error("minimum price {min} is greater than maximum price {max}")]
    PriceRange { min: u64, max: u64 },

    #[error("fuzzy threshold {0} is outside 0..=100")]
    Threshold(u8),
}

/// One marketplace search. Built once per invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub city: String,
    pub product: String,
    pub min_price: u64,
    pub max_price: u64,
    /// Marketplace location identifier embedded in the search path.
    pub region_code: String,
    pub match_mode: MatchMode,
    pub fuzzy_threshold: u8,
}

impl SearchQuery {
    /// Creates a query with the default fuzzy threshold.
    #[must_use]
    pub fn new(
        city: impl Into<String>,
        product: impl Into<String>,
        min_price: u64,
        max_price: u64,
        region_code: impl Into<String>,
        match_mode: MatchMode,
    ) -> Self {
        Self {
            city: city.into(),
            product: product.into(),
            min_price,
            max_price,
            region_code: region_code.into(),
            match_mode,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_fuzzy_threshold(mut self, threshold: u8) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    /// Checks the form-level rules the UI enforces before running a search.
    ///
    /// The pipeline itself never calls this; it trusts its caller.
    ///
    /// # Errors
    ///
    /// Returns the first [`QueryError`] found: blank city, blank product,
    /// `min_price > max_price`, or a threshold above 100.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.city.trim().is_empty() {
            return Err(QueryError::EmptyCity);
        }
        if self.product.trim().is_empty() {
            return Err(QueryError::EmptyProduct);
        }
        if self.min_price > self.max_price {
            return Err(QueryError::PriceRange {
                min: self.min_price,
                max: self.max_price,
            });
        }
        if self.fuzzy_threshold > 100 {
            return Err(QueryError::Threshold(self.fuzzy_threshold));
        }
        Ok(())
    }
}
