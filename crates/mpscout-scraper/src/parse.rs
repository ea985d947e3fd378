//! Price parsing for listing text lines.

use regex::Regex;

/// Scans `lines` top to bottom and returns the price from the first line
/// containing a numeric run.
///
/// A numeric run is a digit followed by digits, commas, spaces and
/// interpuncts (`•`), e.g. `"1,234 • 56"` in `"$1,234 • 56 km"`. The run is
/// cut at the first interpunct and the remaining separators are dropped,
/// so that example yields `1234.0`.
///
/// Lines without digits (`"Free"`) are skipped; `None` means no line matched.
#[must_use]
pub fn parse_price<S: AsRef<str>>(lines: &[S]) -> Option<f64> {
    let re = Regex::new(r"[0-9][0-9, •]*").expect("valid price regex");
    lines
        .iter()
        .find_map(|line| re.find(line.as_ref()))
        .and_then(|m| price_from_run(m.as_str()))
}

/// Converts a matched numeric run into a value.
fn price_from_run(run: &str) -> Option<f64> {
    let head = run.split('•').next().unwrap_or(run);
    let digits: String = head.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_dollar_price() {
        assert_eq!(parse_price(&["$45"]), Some(45.0));
    }

    #[test]
    fn thousands_separator_and_interpunct_noise() {
        assert_eq!(parse_price(&["1,234 • 56"]), Some(1234.0));
    }

    #[test]
    fn thousands_separator_only() {
        assert_eq!(parse_price(&["CA$12,500"]), Some(12500.0));
    }

    #[test]
    fn free_has_no_price() {
        assert_eq!(parse_price(&["Free"]), None);
    }

    #[test]
    fn empty_lines_have_no_price() {
        let lines: [&str; 0] = [];
        assert_eq!(parse_price(&lines), None);
    }

    #[test]
    fn first_numeric_line_wins() {
        assert_eq!(
            parse_price(&["Free", "$300", "2 bedrooms", "Springfield"]),
            Some(300.0)
        );
    }

    #[test]
    fn decimal_point_ends_the_run() {
        assert_eq!(parse_price(&["$12.99"]), Some(12.0));
    }

    #[test]
    fn trailing_space_is_ignored() {
        assert_eq!(parse_price(&["45 USD"]), Some(45.0));
    }

    #[test]
    fn digits_inside_title_count_when_no_earlier_match() {
        assert_eq!(parse_price(&["Free", "iPhone 13 Pro"]), Some(13.0));
    }

    #[test]
    fn accepts_owned_strings() {
        let lines = vec!["$2,000".to_string(), "Sofa".to_string()];
        assert_eq!(parse_price(&lines), Some(2000.0));
    }
}
