//! Plain Levenshtein distance (no transpositions).

use std::cmp::min;
use std::mem;

use super::{EXCEEDED, StringDistance, trim_common};

/// Levenshtein distance computed with two rolling rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl Levenshtein {
    /// Distance in edits, or `None` once every cell of a row exceeds `max`.
    #[allow(clippy::needless_range_loop)]
    pub fn edits(source: &str, target: &str, max: usize) -> Option<usize> {
        let source: Vec<char> = source.chars().collect();
        let target: Vec<char> = target.chars().collect();
        let (mut s, mut t) = trim_common(&source, &target);

        // Keep the row over the shorter string.
        if s.len() > t.len() {
            mem::swap(&mut s, &mut t);
        }

        if t.len() - s.len() > max {
            return None;
        }
        if s.is_empty() {
            return Some(t.len());
        }

        let mut prev_row: Vec<usize> = (0..=s.len()).collect();
        let mut curr_row = vec![0; s.len() + 1];

        for i in 1..=t.len() {
            curr_row[0] = i;
            let mut min_in_row = i;

            for j in 1..=s.len() {
                let cost = if t[i - 1] == s[j - 1] { 0 } else { 1 };

                curr_row[j] = min(
                    min(
                        prev_row[j] + 1,     // deletion
                        curr_row[j - 1] + 1, // insertion
                    ),
                    prev_row[j - 1] + cost, // substitution
                );

                min_in_row = min(min_in_row, curr_row[j]);
            }

            if min_in_row > max {
                return None;
            }

            mem::swap(&mut prev_row, &mut curr_row);
        }

        let distance = prev_row[s.len()];
        (distance <= max).then_some(distance)
    }
}

impl StringDistance for Levenshtein {
    fn distance(&self, source: &str, target: &str) -> f64 {
        // usize::MAX disables the row cutoff, so this is always Some.
        Self::edits(source, target, usize::MAX).map_or(EXCEEDED, |d| d as f64)
    }

    fn distance_bounded(&self, source: &str, target: &str, max_distance: f64) -> f64 {
        if max_distance < 0.0 || max_distance.is_nan() {
            return EXCEEDED;
        }
        let max = max_distance.floor().min(usize::MAX as f64) as usize;
        Self::edits(source, target, max).map_or(EXCEEDED, |d| d as f64)
    }
}
