//! Suggestion records and ranking.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Two distances closer than this are considered equal.
pub const DISTANCE_EPSILON: f64 = 0.011;

#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < DISTANCE_EPSILON
}

#[inline]
pub fn approx_lt(a: f64, b: f64) -> bool {
    !approx_eq(a, b) && a < b
}

#[inline]
pub fn approx_le(a: f64, b: f64) -> bool {
    approx_eq(a, b) || a < b
}

/// A spelling suggestion for a looked up term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionItem {
    /// The suggested correctly spelled term.
    pub term: String,
    /// Edit distance between the query and the suggestion.
    pub distance: f64,
    /// Frequency of the suggestion in the dictionary.
    pub frequency: f64,
}

impl SuggestionItem {
    pub fn new<S: Into<String>>(term: S, distance: f64, frequency: f64) -> Self {
        SuggestionItem {
            term: term.into(),
            distance,
            frequency,
        }
    }

    /// Copy of this item with a different distance.
    pub fn with_distance(&self, distance: f64) -> Self {
        SuggestionItem {
            distance,
            ..self.clone()
        }
    }
}

impl SuggestionItem {
    /// Ranking used for suggestion lists: smaller distance first, and among
    /// distances within [`DISTANCE_EPSILON`], higher frequency first.
    ///
    /// This is a tolerance order, not a total order. `Equal` does not imply
    /// `==`, and the epsilon is not transitive: `(1.0, 1)`, `(1.008, 10)` and
    /// `(1.016, 100)` rank in a cycle. Do not hand it to a sort.
    pub fn compare(&self, other: &Self) -> Ordering {
        if approx_eq(self.distance, other.distance) {
            other
                .frequency
                .partial_cmp(&self.frequency)
                .unwrap_or(Ordering::Equal)
        } else {
            self.distance
                .partial_cmp(&other.distance)
                .unwrap_or(Ordering::Equal)
        }
    }

    /// Whether this item ranks strictly before `other`.
    pub fn ranks_before(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Less
    }
}

/// Insert `item` into the ranked list `items`, keeping at most `max_size`
/// entries.
///
/// The item goes before the first entry it ranks strictly before, or
/// last. When the list is full it is only accepted if it ranks strictly
/// before the current last entry, which is then evicted.
pub fn add_item_sorted(items: &mut Vec<SuggestionItem>, item: SuggestionItem, max_size: usize) {
    if max_size == 0 {
        return;
    }
    if items.len() >= max_size {
        if !item.ranks_before(&items[max_size - 1]) {
            return;
        }
        items.truncate(max_size - 1);
    }
    // Not a binary search: ranks need not be monotone along the list.
    let index = items
        .iter()
        .position(|existing| item.ranks_before(existing))
        .unwrap_or(items.len());
    items.insert(index, item);
}

/// A segmentation of a phrase into words, with its correction.
///
/// The default value is the identity of the segmentation recurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    /// Input phrase with spaces inserted.
    pub segmented_string: String,
    /// Segmented phrase with every word spelling-corrected.
    pub corrected_string: String,
    /// Sum of edit distances, including inserted spaces.
    pub distance_sum: f64,
    /// Sum of log10 word probabilities.
    pub log_prob_sum: f64,
}

impl Composition {
    pub fn new<S: Into<String>, T: Into<String>>(segmented: S, corrected: T) -> Self {
        Composition {
            segmented_string: segmented.into(),
            corrected_string: corrected.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(items: &[SuggestionItem]) -> Vec<&str> {
        items.iter().map(|item| item.term.as_str()).collect()
    }

    #[test]
    fn test_ordering() {
        let a = SuggestionItem::new("a", 1.0, 10.0);
        let b = SuggestionItem::new("b", 1.0, 50.0);
        let c = SuggestionItem::new("c", 0.0, 1.0);
        let d = SuggestionItem::new("d", 1.005, 100.0);

        assert!(c.ranks_before(&a));
        assert!(b.ranks_before(&a));
        // Within epsilon the frequency decides.
        assert!(d.ranks_before(&a));
        assert!(d.ranks_before(&b));

        let mut items = Vec::new();
        for item in [a, b, c, d] {
            add_item_sorted(&mut items, item, 10);
        }
        assert_eq!(terms(&items), vec!["c", "d", "b", "a"]);
    }

    #[test]
    fn test_tolerance_order_is_not_equality() {
        let a = SuggestionItem::new("a", 1.0, 5.0);
        let b = SuggestionItem::new("b", 1.005, 5.0);

        assert_eq!(a.compare(&b), Ordering::Equal);
        assert_ne!(a, b);
        assert!(!a.ranks_before(&b) && !b.ranks_before(&a));
    }

    #[test]
    fn test_add_item_sorted_with_cyclic_ranks() {
        let a = SuggestionItem::new("a", 1.0, 1.0);
        let b = SuggestionItem::new("b", 1.008, 10.0);
        let c = SuggestionItem::new("c", 1.016, 100.0);
        assert!(b.ranks_before(&a));
        assert!(c.ranks_before(&b));
        assert!(a.ranks_before(&c));

        let orders = [
            [&a, &b, &c],
            [&a, &c, &b],
            [&b, &a, &c],
            [&b, &c, &a],
            [&c, &a, &b],
            [&c, &b, &a],
        ];
        for order in orders {
            let mut items = Vec::new();
            for item in order {
                add_item_sorted(&mut items, item.clone(), 10);
            }
            let mut kept = terms(&items);
            kept.sort_unstable();
            assert_eq!(kept, vec!["a", "b", "c"]);

            let mut bounded = Vec::new();
            for item in order {
                add_item_sorted(&mut bounded, item.clone(), 2);
            }
            assert_eq!(bounded.len(), 2);
        }
    }

    #[test]
    fn test_epsilon_helpers() {
        assert!(approx_eq(1.0, 1.01));
        assert!(!approx_eq(1.0, 1.02));
        assert!(approx_lt(1.0, 2.0));
        assert!(!approx_lt(1.0, 1.005));
        assert!(approx_le(1.005, 1.0));
        assert!(!approx_le(1.5, 1.0));
    }

    #[test]
    fn test_add_item_sorted_keeps_order() {
        let mut items = Vec::new();
        add_item_sorted(&mut items, SuggestionItem::new("far", 2.0, 5.0), 10);
        add_item_sorted(&mut items, SuggestionItem::new("near", 1.0, 1.0), 10);
        add_item_sorted(&mut items, SuggestionItem::new("common", 1.0, 9.0), 10);
        add_item_sorted(&mut items, SuggestionItem::new("exact", 0.0, 1.0), 10);

        assert_eq!(terms(&items), vec!["exact", "common", "near", "far"]);
    }

    #[test]
    fn test_add_item_sorted_bound() {
        let mut items = Vec::new();
        for i in 0..5 {
            add_item_sorted(&mut items, SuggestionItem::new(format!("w{i}"), 1.0, i as f64), 3);
        }

        assert_eq!(items.len(), 3);
        assert_eq!(terms(&items), vec!["w4", "w3", "w2"]);

        // Not strictly better than the worst kept item.
        add_item_sorted(&mut items, SuggestionItem::new("tie", 1.0, 2.0), 3);
        assert_eq!(terms(&items), vec!["w4", "w3", "w2"]);

        add_item_sorted(&mut items, SuggestionItem::new("best", 0.0, 0.0), 3);
        assert_eq!(terms(&items), vec!["best", "w4", "w3"]);

        add_item_sorted(&mut items, SuggestionItem::new("never", 0.0, 0.0), 0);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_composition_default_is_identity() {
        let composition = Composition::default();
        assert!(composition.segmented_string.is_empty());
        assert!(composition.corrected_string.is_empty());
        assert_eq!(composition.distance_sum, 0.0);
        assert_eq!(composition.log_prob_sum, 0.0);

        let composition = Composition::new("abc", "xyz");
        assert_eq!(composition.corrected_string, "xyz");
        assert_eq!(composition.distance_sum, 0.0);
    }
}
