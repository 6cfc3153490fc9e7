//! Levenshtein edit distance and percent similarity.

use crate::text::normalize;

/// Minimum number of single-character insertions, deletions, and
/// substitutions that turn `a` into `b`.
///
/// Operates on Unicode scalar values, not bytes. Inputs are compared
/// as given; use [`similarity`] for case-insensitive scoring.
#[must_use]
pub fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two-row dynamic programming: prev is row i, curr is row i+1.
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, &ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let substitution = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Percent similarity between two strings in `[0.0, 100.0]`.
///
/// Inputs are case-folded first, then scored as
/// `(1 - distance / max_len) * 100`. If either string is empty after
/// normalization the score is 0.0, including when both are empty.
/// The score is symmetric, and identical strings score exactly 100.0.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let dist = distance(&a, &b);

    ((1.0 - dist as f64 / max_len as f64) * 100.0).clamp(0.0, 100.0)
}
