//! Weighted Damerau-Levenshtein distance.

use std::sync::Arc;

use super::{CharDistance, StringDistance, bound};

/// Damerau-Levenshtein distance with a separate weight per operation.
///
/// When a [`CharDistance`] is configured and both strings have the same
/// length, substitutions cost `replace_weight * char_distance(a, b)`, so a
/// typo on a neighbouring key is cheaper than an arbitrary substitution.
///
/// Weights need not be symmetric, so neither is the distance.
#[derive(Debug, Clone)]
pub struct WeightedDamerauLevenshtein {
    deletion_weight: f64,
    insertion_weight: f64,
    replace_weight: f64,
    transposition_weight: f64,
    char_distance: Option<Arc<dyn CharDistance>>,
}

impl WeightedDamerauLevenshtein {
    pub fn new(
        deletion_weight: f64,
        insertion_weight: f64,
        replace_weight: f64,
        transposition_weight: f64,
    ) -> Self {
        WeightedDamerauLevenshtein {
            deletion_weight,
            insertion_weight,
            replace_weight,
            transposition_weight,
            char_distance: None,
        }
    }

    pub fn with_char_distance<C: CharDistance + 'static>(
        deletion_weight: f64,
        insertion_weight: f64,
        replace_weight: f64,
        transposition_weight: f64,
        char_distance: C,
    ) -> Self {
        Self::new(
            deletion_weight,
            insertion_weight,
            replace_weight,
            transposition_weight,
        )
        .char_distance(Arc::new(char_distance))
    }

    /// Replace the substitution cost table.
    pub fn char_distance(mut self, char_distance: Arc<dyn CharDistance>) -> Self {
        self.char_distance = Some(char_distance);
        self
    }

    fn replace_cost(&self, a: char, b: char, use_char_distance: bool) -> f64 {
        if a == b {
            return 0.0;
        }
        match &self.char_distance {
            Some(table) if use_char_distance => self.replace_weight * table.distance(a, b),
            _ => self.replace_weight,
        }
    }
}

impl Default for WeightedDamerauLevenshtein {
    fn default() -> Self {
        Self::new(0.8, 1.01, 0.9, 0.7)
    }
}

impl StringDistance for WeightedDamerauLevenshtein {
    #[allow(clippy::needless_range_loop)]
    fn distance(&self, source: &str, target: &str) -> f64 {
        if source == target {
            return 0.0;
        }

        let s: Vec<char> = source.chars().collect();
        let t: Vec<char> = target.chars().collect();

        // Turning source into target: each extra target char is an insertion,
        // each extra source char a deletion.
        if s.is_empty() {
            return t.len() as f64 * self.insertion_weight;
        }
        if t.is_empty() {
            return s.len() as f64 * self.deletion_weight;
        }

        let use_char_distance = self.char_distance.is_some() && s.len() == t.len();

        // d[i][j]: cost between t[..i] and s[..j]
        let mut d = vec![vec![0.0f64; s.len() + 1]; t.len() + 1];
        for i in 0..=t.len() {
            d[i][0] = i as f64 * self.insertion_weight;
        }
        for j in 0..=s.len() {
            d[0][j] = j as f64 * self.deletion_weight;
        }

        for i in 1..=t.len() {
            for j in 1..=s.len() {
                let cost = self.replace_cost(t[i - 1], s[j - 1], use_char_distance);
                let mut value = (d[i - 1][j] + self.insertion_weight)
                    .min(d[i][j - 1] + self.deletion_weight)
                    .min(d[i - 1][j - 1] + cost);
                if i > 1 && j > 1 && s[j - 2] == t[i - 1] && t[i - 2] == s[j - 1] {
                    value = value.min(d[i - 2][j - 2] + self.transposition_weight);
                }
                d[i][j] = value;
            }
        }

        d[t.len()][s.len()]
    }

    fn distance_bounded(&self, source: &str, target: &str, max_distance: f64) -> f64 {
        bound(self.distance(source, target), max_distance)
    }
}
