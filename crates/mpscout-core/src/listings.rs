use serde::{Deserialize, Serialize};

/// A listing pulled out of one anchor on the results page.
///
/// Field order matches the CSV export columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Second-to-last text line of the anchor, or `""` when it has fewer than two.
    pub title: String,
    /// First numeric run found in the anchor's lines; `None` for "Free" and the like.
    pub price: Option<f64>,
    /// Last text line of the anchor, or `""` when it has none.
    pub location: String,
    /// Absolute URL of the listing.
    pub url: String,
}

/// Records that survived filtering, in page order, plus diagnostics.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResultSet {
    pub records: Vec<ListingRecord>,
    /// Number of anchors seen on the page before filtering.
    pub total_candidates: usize,
    /// `false` when the page could not be fully loaded (scroll cap hit or
    /// acquisition failed).
    pub complete: bool,
}

impl ResultSet {
    /// The result of a run that produced nothing usable.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            total_candidates: 0,
            complete: false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_set_has_no_records() {
        let set = ResultSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.total_candidates, 0);
        assert!(!set.complete);
    }

    #[test]
    fn listing_record_serializes_missing_price_as_null() {
        let record = ListingRecord {
            title: "Desk Lamp".into(),
            price: None,
            location: "Shelbyville".into(),
            url: "https://web.facebook.com/item/2".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["price"].is_null());
        assert_eq!(json["title"], "Desk Lamp");
    }
}
