//! Character-level similarity scores on a 0–100 scale.
//!
//! [`ratio`] is the indel similarity `2·LCS / (|a| + |b|)`, where LCS is the
//! longest common subsequence of the two strings' `char`s. [`partial_ratio`]
//! slides the shorter string across the longer one and keeps the best
//! window, so a short query scores high against a long listing text that
//! contains something close to it.
//!
//! Callers are responsible for case folding.

/// Similarity of `a` and `b` in `0.0..=100.0`. Empty input scores `0.0`.
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    char_ratio(&a, &b)
}

/// Best [`ratio`] between the shorter string and any equal-length
/// contiguous window of the longer string, rounded half-to-even.
///
/// Empty input scores `0`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    let best = if shorter.len() == longer.len() {
        char_ratio(shorter, longer)
    } else {
        let mut best_common = 0usize;
        for window in longer.windows(shorter.len()) {
            best_common = best_common.max(lcs_len(shorter, window));
            if best_common == shorter.len() {
                break;
            }
        }
        // Window and shorter string have the same length, so the indel
        // ratio reduces to LCS / len.
        percent(best_common, shorter.len())
    };

    best.round_ties_even().clamp(0.0, 100.0) as u8
}

fn char_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    percent(2 * lcs_len(a, b), total)
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> f64 {
    100.0 * part as f64 / whole as f64
}

/// Length of the longest common subsequence, using two rolling DP rows.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
