//! Unweighted Damerau-Levenshtein distance.
//!
//! Optimal string alignment variant: every substring is edited at most once,
//! so "ca" to "abc" costs 3 rather than 2.

use std::cmp::min;

use super::{EXCEEDED, StringDistance, trim_common};

/// Damerau-Levenshtein distance with unit cost for every operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DamerauLevenshtein;

impl DamerauLevenshtein {
    /// Distance in edits, or `None` once it provably exceeds `max`.
    #[allow(clippy::needless_range_loop)]
    pub fn edits(source: &str, target: &str, max: usize) -> Option<usize> {
        let source: Vec<char> = source.chars().collect();
        let target: Vec<char> = target.chars().collect();
        let (s, t) = trim_common(&source, &target);

        if s.len().abs_diff(t.len()) > max {
            return None;
        }
        if s.is_empty() || t.is_empty() {
            return Some(s.len().max(t.len()));
        }

        // d[i][j]: distance between t[..i] and s[..j]
        let mut d = vec![vec![0usize; s.len() + 1]; t.len() + 1];
        for i in 0..=t.len() {
            d[i][0] = i;
        }
        for j in 0..=s.len() {
            d[0][j] = j;
        }

        let mut prev_row_min = 0;
        for i in 1..=t.len() {
            let mut row_min = d[i][0];
            for j in 1..=s.len() {
                let cost = if t[i - 1] == s[j - 1] { 0 } else { 1 };
                let mut value = min(
                    min(
                        d[i - 1][j] + 1, // insertion
                        d[i][j - 1] + 1, // deletion
                    ),
                    d[i - 1][j - 1] + cost, // substitution
                );
                if i > 1 && j > 1 && s[j - 2] == t[i - 1] && t[i - 2] == s[j - 1] {
                    value = min(value, d[i - 2][j - 2] + 1); // transposition
                }
                d[i][j] = value;
                row_min = min(row_min, value);
            }

            // A cell only looks back two rows, so two rows over the bound end it.
            if row_min > max && prev_row_min > max {
                return None;
            }
            prev_row_min = row_min;
        }

        let distance = d[t.len()][s.len()];
        (distance <= max).then_some(distance)
    }
}

impl StringDistance for DamerauLevenshtein {
    fn distance(&self, source: &str, target: &str) -> f64 {
        Self::edits(source, target, usize::MAX).map_or(EXCEEDED, |d| d as f64)
    }

    fn distance_bounded(&self, source: &str, target: &str, max_distance: f64) -> f64 {
        if max_distance < 0.0 || max_distance.is_nan() {
            return EXCEEDED;
        }
        let max = max_distance.floor().min(usize::MAX as f64) as usize;
        Self::edits(source, target, max).map_or(EXCEEDED, |d| d as f64)
    }

    fn is_unit_cost(&self) -> bool {
        true
    }
}
