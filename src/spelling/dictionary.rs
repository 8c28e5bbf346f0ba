//! Delete-variant dictionary index.
//!
//! Every live unigram is expanded into the set of strings reachable by
//! deleting up to `max_edit_distance` characters from its prefix. Each delete
//! variant is hashed and the term is appended to that hash bucket. At query
//! time the engine generates deletes of the input and reads the buckets; a
//! bucket entry is only a candidate, since unrelated terms may share a hash.

use std::collections::VecDeque;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SymSpellError};
use crate::spelling::settings::SpellCheckSettings;
use crate::util::hash::HashFunction;

/// Index of a term in the term arena.
pub type TermId = u32;

/// A term and its frequency, as fed to [`DictionaryIndex::add_item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryItem {
    pub term: String,
    pub frequency: f64,
    /// Carried for compatibility with dictionary sources; unused by the index.
    pub distance: f64,
}

impl DictionaryItem {
    pub fn new<S: Into<String>>(term: S, frequency: f64) -> Self {
        DictionaryItem {
            term: term.into(),
            frequency,
            distance: -1.0,
        }
    }
}

/// Statistics that change while the index is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Length in chars of the longest live unigram.
    pub max_length: usize,
    /// Smallest bigram frequency seen.
    pub bigram_count_min: f64,
}

impl Default for IndexStats {
    fn default() -> Self {
        IndexStats {
            max_length: 0,
            bigram_count_min: f64::MAX,
        }
    }
}

/// Adds frequencies, clamping at `f64::MAX`.
#[inline]
pub fn saturating_add(a: f64, b: f64) -> f64 {
    if f64::MAX - a > b { a + b } else { f64::MAX }
}

/// Unigram, bigram and exclusion dictionaries plus the deletion index.
#[derive(Debug)]
pub struct DictionaryIndex {
    settings: SpellCheckSettings,
    key_split: Regex,
    hasher: Box<dyn HashFunction>,
    /// Interned unigram terms; delete buckets refer to them by position.
    terms: Vec<Arc<str>>,
    words: AHashMap<Arc<str>, f64>,
    bigrams: AHashMap<String, f64>,
    exclusions: AHashMap<String, String>,
    below_threshold: AHashMap<String, f64>,
    deletes: AHashMap<u64, Vec<TermId>>,
    stats: IndexStats,
}

impl DictionaryIndex {
    pub fn new(settings: SpellCheckSettings, hasher: Box<dyn HashFunction>) -> Result<Self> {
        settings.validate()?;
        let key_split = Regex::new(&settings.key_split_regex).map_err(|e| {
            SymSpellError::invalid_config(format!(
                "key_split_regex {:?}: {e}",
                settings.key_split_regex
            ))
        })?;

        Ok(DictionaryIndex {
            settings,
            key_split,
            hasher,
            terms: Vec::new(),
            words: AHashMap::new(),
            bigrams: AHashMap::new(),
            exclusions: AHashMap::new(),
            below_threshold: AHashMap::new(),
            deletes: AHashMap::new(),
            stats: IndexStats::default(),
        })
    }

    pub fn settings(&self) -> &SpellCheckSettings {
        &self.settings
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Add a term or accumulate its frequency.
    ///
    /// Returns true only when the call created a new live unigram (and so
    /// generated its deletes). Accumulations, below-threshold staging, bigram
    /// inserts and rejected items all return false.
    pub fn add_item(&mut self, item: DictionaryItem) -> bool {
        let threshold = self.settings.count_threshold;
        if item.frequency <= 0.0 && threshold > 0 {
            return false;
        }
        if item.frequency.is_nan() {
            return false;
        }

        let key = if self.settings.lower_case_terms {
            item.term.to_lowercase()
        } else {
            item.term
        };
        let mut frequency = item.frequency.max(0.0);

        if threshold > 1
            && let Some(&staged) = self.below_threshold.get(&key)
        {
            frequency = saturating_add(staged, frequency);
            if frequency > threshold as f64 {
                self.below_threshold.remove(&key);
            } else {
                self.below_threshold.insert(key, frequency);
                return false;
            }
        } else if let Some(existing) = self.words.get_mut(key.as_str()) {
            *existing = saturating_add(*existing, frequency);
            return false;
        } else if let Some(existing) = self.bigrams.get_mut(&key) {
            *existing = saturating_add(*existing, frequency);
            return false;
        } else if frequency < threshold as f64 {
            self.below_threshold.insert(key, frequency);
            return false;
        }

        if self.settings.do_key_split && self.key_split.is_match(&key) {
            if frequency < self.stats.bigram_count_min {
                self.stats.bigram_count_min = frequency;
            }
            self.bigrams.insert(key, frequency);
            return false;
        }

        self.insert_unigram(key, frequency)
    }

    fn insert_unigram(&mut self, key: String, frequency: f64) -> bool {
        let Ok(id) = TermId::try_from(self.terms.len()) else {
            warn!("term arena is full, dropping {key:?}");
            return false;
        };

        let length = key.chars().count();
        if length > self.stats.max_length {
            self.stats.max_length = length;
        }

        let edit_deletes = get_edit_deletes(
            &key,
            self.settings.max_edit_distance,
            self.settings.prefix_length,
            self.settings.edit_factor,
        );
        for delete in &edit_deletes {
            let bucket = self.deletes.entry(self.hasher.hash_str(delete)).or_default();
            // Two deletes of the same term may collide.
            if bucket.last() != Some(&id) {
                bucket.push(id);
            }
        }

        let term: Arc<str> = Arc::from(key);
        self.terms.push(Arc::clone(&term));
        self.words.insert(term, frequency);
        true
    }

    /// Terms whose delete set contains a string hashing like `key`.
    pub fn get_deletes(&self, key: &str) -> Option<impl Iterator<Item = &str> + '_> {
        self.deletes
            .get(&self.hasher.hash_str(key))
            .map(move |ids| ids.iter().map(move |&id| &*self.terms[id as usize]))
    }

    pub fn get_item_frequency(&self, term: &str) -> Option<f64> {
        self.words.get(term).copied()
    }

    pub fn get_item_frequency_bigram(&self, term: &str) -> Option<f64> {
        self.bigrams.get(term).copied()
    }

    /// Frequency accumulated so far for a term that has not reached the threshold.
    pub fn get_below_threshold_frequency(&self, term: &str) -> Option<f64> {
        self.below_threshold.get(term).copied()
    }

    pub fn add_exclusion_item<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let key = if self.settings.lower_case_terms {
            key.to_lowercase()
        } else {
            key
        };
        self.exclusions.insert(key, value.into());
    }

    pub fn add_exclusion_items<I, K, V>(&mut self, items: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in items {
            self.add_exclusion_item(key, value);
        }
    }

    pub fn get_exclusion_item(&self, key: &str) -> Option<&str> {
        self.exclusions.get(key).map(String::as_str)
    }

    /// Live unigrams and their frequencies, in insertion order.
    pub fn unigrams(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.terms
            .iter()
            .filter_map(move |term| self.words.get(term).map(|&f| (&**term, f)))
    }

    pub fn bigrams(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.bigrams.iter().map(|(term, &f)| (term.as_str(), f))
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn bigram_count(&self) -> usize {
        self.bigrams.len()
    }

    pub fn below_threshold_count(&self) -> usize {
        self.below_threshold.len()
    }

    pub fn delete_bucket_count(&self) -> usize {
        self.deletes.len()
    }

    /// Drop every term, staged term and delete bucket, and reset the
    /// statistics. Exclusions are kept.
    pub fn clear(&mut self) {
        debug!(
            "clearing index: {} unigrams, {} bigrams, {} delete buckets",
            self.words.len(),
            self.bigrams.len(),
            self.deletes.len()
        );
        self.terms.clear();
        self.words.clear();
        self.bigrams.clear();
        self.below_threshold.clear();
        self.deletes.clear();
        self.stats = IndexStats::default();
    }
}

/// All strings obtained by deleting characters from the prefix of `key`.
///
/// Keys longer than `max_edit_distance` are first cut to `prefix_length`
/// chars. The number of deletes applied is bounded by
/// `round(edit_factor * len)`, clipped to `max_edit_distance`, but at least
/// one level is generated for non-empty keys. The (truncated) key itself is
/// always included, and so is the empty string when the key is no longer than
/// `max_edit_distance`.
pub fn get_edit_deletes(
    key: &str,
    max_edit_distance: f64,
    prefix_length: usize,
    edit_factor: f64,
) -> AHashSet<String> {
    let mut deletes = AHashSet::new();
    let key_len = key.chars().count();

    if key_len as f64 <= max_edit_distance {
        deletes.insert(String::new());
    }

    let truncated: Vec<char> = if key_len as f64 > max_edit_distance {
        key.chars().take(prefix_length).collect()
    } else {
        key.chars().collect()
    };

    let effective = (edit_factor * truncated.len() as f64)
        .round()
        .min(max_edit_distance);
    let depth_limit = if max_edit_distance <= 0.0 {
        0
    } else {
        (effective.ceil() as usize).max(1)
    };

    deletes.insert(truncated.iter().collect());

    // Level by level, so every variant is expanded from its shallowest depth.
    let mut queue = VecDeque::from([(truncated, 0usize)]);
    while let Some((word, depth)) = queue.pop_front() {
        if depth >= depth_limit {
            continue;
        }
        for i in 0..word.len() {
            let mut delete = word.clone();
            delete.remove(i);
            if deletes.insert(delete.iter().collect()) {
                queue.push_back((delete, depth + 1));
            }
        }
    }

    deletes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::hash::{AHashFunction, ModuloHashFunction};

    fn index_with(settings: SpellCheckSettings) -> DictionaryIndex {
        DictionaryIndex::new(settings, Box::new(AHashFunction::new())).unwrap()
    }

    fn bucket(index: &DictionaryIndex, key: &str) -> Vec<String> {
        index
            .get_deletes(key)
            .map(|terms| terms.map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_edit_deletes_short_key() {
        let deletes = get_edit_deletes("ab", 2.0, 7, 1.0);
        let mut deletes: Vec<_> = deletes.into_iter().collect();
        deletes.sort();

        assert_eq!(deletes, vec!["", "a", "ab", "b"]);
    }

    #[test]
    fn test_edit_deletes_depth_limit() {
        // round(0.3 * 5) = 2
        let deletes = get_edit_deletes("abcde", 2.0, 7, 0.3);
        assert!(deletes.contains("abcde"));
        assert!(deletes.contains("bcde"));
        assert!(deletes.contains("ace"));
        assert!(!deletes.contains("ab"));
        assert!(!deletes.contains(""));
        assert_eq!(deletes.len(), 1 + 5 + 10);

        // round(0.3 * 3) = 1
        let deletes = get_edit_deletes("abc", 2.0, 7, 0.3);
        assert_eq!(deletes.len(), 1 + 3);
    }

    #[test]
    fn test_edit_deletes_truncates_to_prefix() {
        let deletes = get_edit_deletes("abcdefghij", 1.0, 4, 1.0);
        assert!(deletes.contains("abcd"));
        assert!(deletes.contains("bcd"));
        assert!(!deletes.contains("abcdefghij"));
        assert!(deletes.iter().all(|d| d.chars().count() >= 3));
    }

    #[test]
    fn test_edit_deletes_unicode() {
        let deletes = get_edit_deletes("äöü", 1.0, 7, 1.0);
        assert!(deletes.contains("öü"));
        assert!(deletes.contains("äü"));
        assert!(deletes.contains("äö"));
    }

    #[test]
    fn test_add_and_lookup_buckets() {
        let mut index = index_with(SpellCheckSettings::default());

        assert!(index.add_item(DictionaryItem::new("players", 100.0)));
        assert!(index.add_item(DictionaryItem::new("payers", 50.0)));

        assert_eq!(index.word_count(), 2);
        assert_eq!(index.get_item_frequency("players"), Some(100.0));
        assert_eq!(index.get_item_frequency("player"), None);
        assert_eq!(index.stats().max_length, 7);

        assert!(bucket(&index, "playrs").contains(&"players".to_string()));
        assert!(bucket(&index, "payers").contains(&"payers".to_string()));
        assert!(index.get_deletes("zzzzzz").is_none());
    }

    #[test]
    fn test_frequency_accumulates_without_new_deletes() {
        let mut index = index_with(SpellCheckSettings::default());

        assert!(index.add_item(DictionaryItem::new("Hello", 10.0)));
        let buckets = index.delete_bucket_count();

        assert!(!index.add_item(DictionaryItem::new("hello", 5.0)));
        assert_eq!(index.get_item_frequency("hello"), Some(15.0));
        assert_eq!(index.delete_bucket_count(), buckets);
    }

    #[test]
    fn test_frequency_saturates() {
        let mut index = index_with(SpellCheckSettings::default());

        index.add_item(DictionaryItem::new("big", f64::MAX));
        index.add_item(DictionaryItem::new("big", f64::MAX));
        assert_eq!(index.get_item_frequency("big"), Some(f64::MAX));
        assert_eq!(saturating_add(1.0, 2.0), 3.0);
    }

    #[test]
    fn test_rejects_non_positive_frequency() {
        let mut index = index_with(SpellCheckSettings::default());

        assert!(!index.add_item(DictionaryItem::new("zero", 0.0)));
        assert!(!index.add_item(DictionaryItem::new("negative", -5.0)));
        assert_eq!(index.word_count(), 0);
    }

    #[test]
    fn test_count_threshold_promotion() {
        let settings = SpellCheckSettings {
            count_threshold: 4,
            ..Default::default()
        };
        let mut index = index_with(settings);

        assert!(!index.add_item(DictionaryItem::new("staged", 3.0)));
        assert_eq!(index.get_item_frequency("staged"), None);
        assert_eq!(index.get_below_threshold_frequency("staged"), Some(3.0));

        assert!(index.add_item(DictionaryItem::new("staged", 3.0)));
        assert_eq!(index.get_item_frequency("staged"), Some(6.0));
        assert_eq!(index.get_below_threshold_frequency("staged"), None);

        assert!(!index.add_item(DictionaryItem::new("rare", 1.0)));
        assert!(!index.add_item(DictionaryItem::new("rare", 1.0)));
        assert_eq!(index.get_item_frequency("rare"), None);
        assert_eq!(index.below_threshold_count(), 1);

        // Reaching a threshold at once skips staging.
        assert!(index.add_item(DictionaryItem::new("common", 4.0)));
    }

    #[test]
    fn test_bigram_routing() {
        let mut index = index_with(SpellCheckSettings::default());

        assert!(!index.add_item(DictionaryItem::new("high way", 40.0)));
        assert!(!index.add_item(DictionaryItem::new("the  end", 25.0)));

        assert_eq!(index.get_item_frequency("high way"), None);
        assert_eq!(index.get_item_frequency_bigram("high way"), Some(40.0));
        assert_eq!(index.bigram_count(), 2);
        assert_eq!(index.word_count(), 0);
        assert_eq!(index.stats().bigram_count_min, 25.0);

        index.add_item(DictionaryItem::new("high way", 10.0));
        assert_eq!(index.get_item_frequency_bigram("high way"), Some(50.0));
    }

    #[test]
    fn test_key_split_disabled() {
        let settings = SpellCheckSettings {
            do_key_split: false,
            ..Default::default()
        };
        let mut index = index_with(settings);

        assert!(index.add_item(DictionaryItem::new("high way", 40.0)));
        assert_eq!(index.get_item_frequency("high way"), Some(40.0));
        assert_eq!(index.get_item_frequency_bigram("high way"), None);
    }

    #[test]
    fn test_invalid_split_regex() {
        let settings = SpellCheckSettings {
            key_split_regex: "(".to_string(),
            ..Default::default()
        };
        let err = DictionaryIndex::new(settings, Box::new(AHashFunction::new())).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_collisions_share_buckets() {
        let mut index = DictionaryIndex::new(
            SpellCheckSettings::default(),
            Box::new(ModuloHashFunction::new(2)),
        )
        .unwrap();

        index.add_item(DictionaryItem::new("apple", 10.0));
        index.add_item(DictionaryItem::new("zebra", 10.0));

        assert!(index.delete_bucket_count() <= 2);
        let both: AHashSet<String> = bucket(&index, "anything").into_iter().collect();
        assert!(!both.is_empty());
    }

    #[test]
    fn test_exclusions() {
        let mut index = index_with(SpellCheckSettings::default());
        index.add_exclusion_item("Teh", "the");
        index.add_exclusion_items([("adn", "and"), ("wiht", "with")]);

        assert_eq!(index.get_exclusion_item("teh"), Some("the"));
        assert_eq!(index.get_exclusion_item("wiht"), Some("with"));
        assert_eq!(index.get_exclusion_item("with"), None);
    }

    #[test]
    fn test_clear() {
        let settings = SpellCheckSettings {
            count_threshold: 10,
            ..Default::default()
        };
        let mut index = index_with(settings);
        index.add_item(DictionaryItem::new("word", 20.0));
        index.add_item(DictionaryItem::new("rare", 2.0));
        index.add_item(DictionaryItem::new("two words", 20.0));
        index.add_exclusion_item("teh", "the");

        index.clear();

        assert_eq!(index.word_count(), 0);
        assert_eq!(index.bigram_count(), 0);
        assert_eq!(index.below_threshold_count(), 0);
        assert_eq!(index.delete_bucket_count(), 0);
        assert_eq!(index.stats(), IndexStats::default());
        assert_eq!(index.get_exclusion_item("teh"), Some("the"));

        assert!(index.add_item(DictionaryItem::new("word", 20.0)));
        assert_eq!(index.unigrams().collect::<Vec<_>>(), vec![("word", 20.0)]);
    }
}
