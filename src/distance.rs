//! Edit distance strategies.
//!
//! The engine scores every candidate through a [`StringDistance`] trait
//! object, so any of the strategies below can be plugged in:
//!
//! - [`Levenshtein`]: insertions, deletions and substitutions.
//! - [`DamerauLevenshtein`]: adds adjacent transpositions, all at unit cost.
//! - [`WeightedDamerauLevenshtein`]: per-operation weights and an optional
//!   [`CharDistance`] table that discounts substitutions between related
//!   characters (for example neighbouring keys, see [`KeyboardDistance`]).
//!
//! All strategies operate on Unicode scalar values, not bytes.

pub mod damerau;
pub mod keyboard;
pub mod levenshtein;
pub mod weighted;

use std::fmt::Debug;

pub use damerau::DamerauLevenshtein;
pub use keyboard::KeyboardDistance;
pub use levenshtein::Levenshtein;
pub use weighted::WeightedDamerauLevenshtein;

/// Returned by [`StringDistance::distance_bounded`] when the bound is exceeded.
pub const EXCEEDED: f64 = -1.0;

/// An edit distance between two strings.
pub trait StringDistance: Send + Sync + Debug {
    /// Full distance between `source` and `target`.
    fn distance(&self, source: &str, target: &str) -> f64;

    /// Distance between `source` and `target`, or [`EXCEEDED`] when it is
    /// larger than `max_distance`.
    fn distance_bounded(&self, source: &str, target: &str, max_distance: f64) -> f64 {
        bound(self.distance(source, target), max_distance)
    }

    /// Whether every edit costs exactly 1.
    ///
    /// Only unit-cost strategies may take the engine's quick-distance path.
    fn is_unit_cost(&self) -> bool {
        false
    }
}

/// Cost in `0.0..=1.0` of substituting one character for another.
pub trait CharDistance: Send + Sync + Debug {
    fn distance(&self, a: char, b: char) -> f64;
}

#[inline]
pub(crate) fn bound(distance: f64, max_distance: f64) -> f64 {
    if distance > max_distance {
        EXCEEDED
    } else {
        distance
    }
}

/// Strip the common prefix and suffix of two char slices.
///
/// Both Levenshtein and the optimal string alignment Damerau variant are
/// unchanged by this, and most candidate pairs share a long prefix.
pub(crate) fn trim_common<'a>(a: &'a [char], b: &'a [char]) -> (&'a [char], &'a [char]) {
    let prefix = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    (&a[..a.len() - suffix], &b[..b.len() - suffix])
}
