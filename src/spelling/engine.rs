//! The SymSpell engine and single-word lookup.
//!
//! Lookup is a breadth-first walk over deletes of the query prefix. Each
//! delete is looked up in the index; the terms found there are verified with
//! the configured [`StringDistance`] before they become suggestions. Under
//! [`Verbosity::Top`] and [`Verbosity::Closest`] the working edit distance
//! shrinks to the best distance found so far, which prunes the later rings.

use std::cmp::min;
use std::collections::VecDeque;

use ahash::AHashSet;
use log::{debug, trace};

use crate::distance::StringDistance;
use crate::error::{Result, SymSpellError};
use crate::spelling::dictionary::{DictionaryIndex, DictionaryItem, IndexStats};
use crate::spelling::settings::{SpellCheckSettings, Verbosity};
use crate::spelling::suggestion::{
    SuggestionItem, add_item_sorted, approx_eq, approx_le, approx_lt,
};
use crate::util::hash::{AHashFunction, HashFunction};

/// Spelling correction engine over a [`DictionaryIndex`].
///
/// Build the index with [`create_dictionary_entry`](Self::create_dictionary_entry)
/// (or the loaders), then query it. Queries take `&self` and keep all of their
/// working state local, so a built engine can be shared between threads.
#[derive(Debug)]
pub struct SymSpell {
    index: DictionaryIndex,
    distance: Box<dyn StringDistance>,
}

impl SymSpell {
    /// Engine with the distance strategy named in `settings` and the default
    /// 64-bit hash.
    pub fn new(settings: SpellCheckSettings) -> Result<Self> {
        let distance = settings.build_distance();
        Self::with_components(settings, distance, Box::new(AHashFunction::new()))
    }

    pub fn with_components(
        settings: SpellCheckSettings,
        distance: Box<dyn StringDistance>,
        hasher: Box<dyn HashFunction>,
    ) -> Result<Self> {
        let index = DictionaryIndex::new(settings, hasher)?;
        debug!(
            "created engine: max_edit_distance={}, prefix_length={}, distance={:?}",
            index.settings().max_edit_distance,
            index.settings().prefix_length,
            distance
        );
        Ok(SymSpell { index, distance })
    }

    pub fn settings(&self) -> &SpellCheckSettings {
        self.index.settings()
    }

    pub fn index(&self) -> &DictionaryIndex {
        &self.index
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn string_distance(&self) -> &dyn StringDistance {
        self.distance.as_ref()
    }

    /// Add a term or accumulate its frequency. See [`DictionaryIndex::add_item`].
    pub fn create_dictionary_entry<S: Into<String>>(&mut self, term: S, frequency: f64) -> bool {
        self.index.add_item(DictionaryItem::new(term, frequency))
    }

    pub fn add_item(&mut self, item: DictionaryItem) -> bool {
        self.index.add_item(item)
    }

    pub fn add_unigram(&mut self, term: &str, frequency: f64) -> bool {
        self.create_dictionary_entry(term, frequency)
    }

    /// Add a two-word term such as `"high way"`. Routed to the bigram
    /// dictionary by the key split rule.
    pub fn add_bigram(&mut self, term: &str, frequency: f64) -> bool {
        self.create_dictionary_entry(term, frequency)
    }

    /// Force `key` to be corrected to `value`, bypassing the index.
    pub fn add_exclusion_item<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.index.add_exclusion_item(key, value);
    }

    pub fn add_exclusion_items<I, K, V>(&mut self, items: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.index.add_exclusion_items(items);
    }

    pub fn clear(&mut self) {
        self.index.clear();
    }

    /// Whether `word` is a live unigram.
    pub fn is_correct(&self, word: &str) -> bool {
        let word = self.normalize(word);
        self.index.get_item_frequency(&word).is_some()
    }

    /// Lookup with the configured verbosity and maximum edit distance.
    pub fn lookup_default(&self, word: &str) -> Result<Vec<SuggestionItem>> {
        let settings = self.settings();
        self.lookup(word, settings.verbosity, settings.max_edit_distance)
    }

    /// Find suggestions for `word` within `edit_distance`.
    ///
    /// Suggestions are ordered by distance, then by descending frequency, and
    /// there are never more than `top_k` of them. When nothing is found the
    /// result is empty, or holds `word` itself at `edit_distance + 1` when
    /// `ignore_unknown` is off.
    pub fn lookup(
        &self,
        word: &str,
        verbosity: Verbosity,
        edit_distance: f64,
    ) -> Result<Vec<SuggestionItem>> {
        self.validate_edit_distance(edit_distance)?;
        let include_unknown = !self.settings().ignore_unknown;
        Ok(self.lookup_unchecked(word, verbosity, edit_distance, include_unknown))
    }

    pub(crate) fn validate_edit_distance(&self, edit_distance: f64) -> Result<()> {
        if edit_distance.is_nan() || edit_distance < 0.0 {
            return Err(SymSpellError::validation(format!(
                "edit distance must be a non-negative number, got {edit_distance}"
            )));
        }
        let max = self.settings().max_edit_distance;
        if edit_distance > max {
            return Err(SymSpellError::validation(format!(
                "edit distance {edit_distance} exceeds the configured maximum {max}"
            )));
        }
        Ok(())
    }

    pub(crate) fn normalize(&self, word: &str) -> String {
        if self.settings().lower_case_terms {
            word.to_lowercase()
        } else {
            word.to_string()
        }
    }

    /// Suggestion for an exclusion hit, if `phrase` has one.
    pub(crate) fn exclusion_suggestion(&self, phrase: &str) -> Option<SuggestionItem> {
        let replacement = self.index.get_exclusion_item(phrase)?;
        if replacement.is_empty() {
            return None;
        }
        Some(SuggestionItem::new(
            replacement,
            self.distance.distance(phrase, replacement),
            self.index.get_item_frequency(replacement).unwrap_or(0.0),
        ))
    }

    /// Lookup without parameter validation. `include_unknown` controls the
    /// identity fallback when nothing is found.
    pub(crate) fn lookup_unchecked(
        &self,
        word: &str,
        verbosity: Verbosity,
        max_edit_distance: f64,
        include_unknown: bool,
    ) -> Vec<SuggestionItem> {
        let settings = self.settings();
        let prefix_length = settings.prefix_length;
        let top_k = settings.top_k;

        let phrase = self.normalize(word);
        let fallback = |mut suggestions: Vec<SuggestionItem>| {
            if suggestions.is_empty() && include_unknown {
                suggestions.push(SuggestionItem::new(
                    phrase.as_str(),
                    max_edit_distance + 1.0,
                    0.0,
                ));
            }
            suggestions
        };

        if let Some(item) = self.exclusion_suggestion(&phrase) {
            return vec![item];
        }

        let phrase_chars: Vec<char> = phrase.chars().collect();
        let phrase_len = phrase_chars.len();

        // Longer than any indexed term by more than the edit budget.
        if phrase_len as f64 - max_edit_distance > self.index.stats().max_length as f64 {
            return fallback(Vec::new());
        }

        let mut suggestions = Vec::new();
        if let Some(frequency) = self.index.get_item_frequency(&phrase) {
            add_item_sorted(
                &mut suggestions,
                SuggestionItem::new(phrase.as_str(), 0.0, frequency),
                top_k,
            );
            if verbosity != Verbosity::All {
                return suggestions;
            }
        }

        if max_edit_distance <= 0.0 {
            return fallback(suggestions);
        }

        let mut considered_deletes: AHashSet<String> = AHashSet::new();
        let mut considered_suggestions: AHashSet<String> = AHashSet::new();
        considered_suggestions.insert(phrase.clone());

        let mut max_edit_distance2 = max_edit_distance;
        let phrase_prefix_len = min(phrase_len, prefix_length);
        let seed: String = phrase_chars[..phrase_prefix_len].iter().collect();
        let mut candidates: VecDeque<(String, usize)> = VecDeque::from([(seed, phrase_prefix_len)]);

        while let Some((candidate, candidate_len)) = candidates.pop_front() {
            let len_diff = (phrase_prefix_len - candidate_len) as f64;

            // Every later candidate is at least this short.
            if len_diff > max_edit_distance2 {
                if verbosity == Verbosity::All {
                    continue;
                }
                break;
            }

            let candidate_chars: Vec<char> = candidate.chars().collect();

            if let Some(bucket) = self.index.get_deletes(&candidate) {
                for suggestion in bucket {
                    if suggestion == phrase {
                        continue;
                    }
                    let suggestion_len = suggestion.chars().count();
                    if (suggestion_len as f64 - phrase_len as f64).abs() > max_edit_distance2
                        || suggestion_len < candidate_len
                        || (suggestion_len == candidate_len && suggestion != candidate)
                    {
                        continue;
                    }
                    let suggestion_prefix_len = min(suggestion_len, prefix_length);
                    if suggestion_prefix_len > phrase_prefix_len
                        && (suggestion_prefix_len - candidate_len) as f64 > max_edit_distance2
                    {
                        continue;
                    }

                    let distance;
                    if candidate_len == 0 {
                        // No chars in common with the phrase.
                        distance = phrase_len.max(suggestion_len) as f64;
                        if distance > max_edit_distance2
                            || !considered_suggestions.insert(suggestion.to_string())
                        {
                            continue;
                        }
                    } else if suggestion_len == 1 {
                        let single = suggestion.chars().next();
                        distance = if single.is_some_and(|c| phrase_chars.contains(&c)) {
                            phrase_len - 1
                        } else {
                            phrase_len
                        } as f64;
                        if distance > max_edit_distance2
                            || !considered_suggestions.insert(suggestion.to_string())
                        {
                            continue;
                        }
                    } else {
                        let suggestion_chars: Vec<char> = suggestion.chars().collect();
                        if self.has_different_suffix(
                            &phrase_chars,
                            &suggestion_chars,
                            candidate_len,
                            max_edit_distance,
                        ) {
                            continue;
                        }
                        if verbosity != Verbosity::All
                            && !delete_in_suggestion_prefix(
                                &candidate_chars,
                                &suggestion_chars,
                                prefix_length,
                            )
                        {
                            continue;
                        }
                        if !considered_suggestions.insert(suggestion.to_string()) {
                            continue;
                        }
                        distance = self.candidate_distance(
                            &phrase,
                            &phrase_chars,
                            suggestion,
                            &suggestion_chars,
                            max_edit_distance2,
                        );
                        if distance < 0.0 {
                            continue;
                        }
                    }

                    if !approx_le(distance, max_edit_distance2) {
                        continue;
                    }
                    let Some(frequency) = self.index.get_item_frequency(suggestion) else {
                        continue;
                    };
                    let item = SuggestionItem::new(suggestion, distance, frequency);

                    if let Some(best) = suggestions.first() {
                        match verbosity {
                            Verbosity::Closest if approx_lt(distance, max_edit_distance2) => {
                                suggestions.clear();
                            }
                            Verbosity::Top => {
                                if approx_lt(distance, best.distance)
                                    || (approx_eq(distance, best.distance)
                                        && frequency > best.frequency)
                                {
                                    max_edit_distance2 = distance;
                                    suggestions[0] = item;
                                }
                                continue;
                            }
                            _ => {}
                        }
                    }

                    if verbosity != Verbosity::All {
                        max_edit_distance2 = distance;
                    }
                    add_item_sorted(&mut suggestions, item, top_k);
                }
            }

            // Queue the next ring of deletes.
            if len_diff < max_edit_distance && candidate_len <= prefix_length {
                if verbosity != Verbosity::All && len_diff >= max_edit_distance2 {
                    continue;
                }
                for i in 0..candidate_len {
                    let delete: String = candidate_chars
                        .iter()
                        .enumerate()
                        .filter_map(|(k, &c)| (k != i).then_some(c))
                        .collect();
                    if considered_deletes.insert(delete.clone()) {
                        candidates.push_back((delete, candidate_len - 1));
                    }
                }
            }
        }

        trace!(
            "lookup {phrase:?} ({verbosity:?}, {max_edit_distance}): {} suggestions",
            suggestions.len()
        );
        fallback(suggestions)
    }

    /// Rejects suggestions whose tail cannot align with the phrase tail.
    ///
    /// Only applies to candidates that lost the full edit budget inside the
    /// prefix; the part after the prefix must then match almost exactly.
    fn has_different_suffix(
        &self,
        phrase: &[char],
        suggestion: &[char],
        candidate_len: usize,
        max_edit_distance: f64,
    ) -> bool {
        let prefix_length = self.settings().prefix_length;
        if prefix_length as f64 - max_edit_distance != candidate_len as f64 {
            return false;
        }
        let (plen, slen) = (phrase.len(), suggestion.len());
        let Some(min_distance) = min(plen, slen).checked_sub(prefix_length) else {
            return false;
        };

        (min_distance > 1 && phrase[plen + 1 - min_distance..] != suggestion[slen + 1 - min_distance..])
            || (min_distance > 0
                && phrase[plen - min_distance] != suggestion[slen - min_distance]
                && (phrase[plen - min_distance - 1] != suggestion[slen - min_distance]
                    || phrase[plen - min_distance] != suggestion[slen - min_distance - 1]))
    }

    fn candidate_distance(
        &self,
        phrase: &str,
        phrase_chars: &[char],
        suggestion: &str,
        suggestion_chars: &[char],
        max_edit_distance: f64,
    ) -> f64 {
        if self.settings().quick_distance
            && max_edit_distance <= 2.0
            && self.distance.is_unit_cost()
            && let Some(distance) = quick_distance(phrase_chars, suggestion_chars)
        {
            return distance;
        }
        self.distance
            .distance_bounded(phrase, suggestion, max_edit_distance)
    }
}

/// Exact unit-cost distance for pairs that differ by a single substitution or
/// a single adjacent transposition. `None` for everything else.
pub(crate) fn quick_distance(a: &[char], b: &[char]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }
    let mut mismatches = a.iter().zip(b).enumerate().filter(|(_, (x, y))| x != y);
    let first = mismatches.next()?.0;
    match mismatches.next() {
        None => Some(1.0),
        Some((second, _)) => {
            let swapped = second == first + 1 && a[first] == b[second] && a[second] == b[first];
            (swapped && mismatches.next().is_none()).then_some(1.0)
        }
    }
}

/// Whether the chars of `delete` occur in the prefix of `suggestion` in
/// order. A bucket entry failing this is a hash collision.
fn delete_in_suggestion_prefix(delete: &[char], suggestion: &[char], prefix_length: usize) -> bool {
    if delete.is_empty() {
        return true;
    }
    let suggestion_len = min(suggestion.len(), prefix_length);
    let mut j = 0;
    for &c in delete {
        while j < suggestion_len && c != suggestion[j] {
            j += 1;
        }
        if j == suggestion_len {
            return false;
        }
    }
    true
}
