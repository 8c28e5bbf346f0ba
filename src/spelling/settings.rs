//! Spell checker configuration.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::distance::{
    DamerauLevenshtein, KeyboardDistance, Levenshtein, StringDistance,
    WeightedDamerauLevenshtein,
};
use crate::error::{Result, SymSpellError};

/// Number of words in the corpus the reference frequency dictionaries were
/// built from. Used to turn counts into probabilities.
pub const DEFAULT_CORPUS_WORD_COUNT: f64 = 1_024_908_267_229.0;

/// Controls the closeness and quantity of returned suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// The single suggestion with the highest frequency among those of
    /// smallest edit distance found.
    Top,
    /// All suggestions of smallest edit distance found, ordered by frequency.
    Closest,
    /// All suggestions within the edit distance, ordered by distance then
    /// frequency. No early termination.
    All,
}

/// Edit distance strategy built by [`SpellCheckSettings::build_distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceAlgorithm {
    Levenshtein,
    DamerauLevenshtein,
    Weighted,
}

/// Keyboard layout used to weight substitutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardLayout {
    Qwerty,
    Qwertz,
}

/// Operation weights for [`DistanceAlgorithm::Weighted`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditWeights {
    pub deletion: f64,
    pub insertion: f64,
    pub replace: f64,
    pub transposition: f64,
}

impl Default for EditWeights {
    fn default() -> Self {
        EditWeights {
            deletion: 1.0,
            insertion: 1.0,
            replace: 1.0,
            transposition: 1.0,
        }
    }
}

/// Configuration shared by the dictionary index and the engine.
///
/// Fixed for the lifetime of an engine. Statistics that change while the
/// index is built live in [`IndexStats`](crate::spelling::dictionary::IndexStats).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellCheckSettings {
    /// Default verbosity for [`SymSpell::lookup_default`](crate::spelling::SymSpell::lookup_default).
    pub verbosity: Verbosity,
    /// Maximum number of suggestions returned by a lookup.
    pub top_k: usize,
    /// Lowercase indexed terms and queries.
    pub lower_case_terms: bool,
    /// Ceiling for every per-call edit distance.
    pub max_edit_distance: f64,
    /// Length of the prefix used for delete generation and candidate expansion.
    pub prefix_length: usize,
    /// Accumulated frequency a term needs before it becomes a live term.
    pub count_threshold: u64,
    /// Scales the index-side edit distance by term length.
    pub edit_factor: f64,
    /// Route terms matching `key_split_regex` to the bigram dictionary.
    pub do_key_split: bool,
    pub key_split_regex: String,
    /// When a lookup finds nothing, return nothing instead of the input word.
    pub ignore_unknown: bool,
    /// Normalizer turning frequencies into probabilities.
    pub corpus_word_count: f64,
    /// Score simple one-edit candidates without running the distance matrix.
    pub quick_distance: bool,
    pub distance_algorithm: DistanceAlgorithm,
    pub edit_weights: EditWeights,
    pub keyboard_layout: Option<KeyboardLayout>,
}

impl Default for SpellCheckSettings {
    fn default() -> Self {
        SpellCheckSettings {
            verbosity: Verbosity::Closest,
            top_k: 10,
            lower_case_terms: true,
            max_edit_distance: 2.0,
            prefix_length: 7,
            count_threshold: 1,
            edit_factor: 0.3,
            do_key_split: true,
            key_split_regex: r"\s+".to_string(),
            ignore_unknown: true,
            corpus_word_count: DEFAULT_CORPUS_WORD_COUNT,
            quick_distance: true,
            distance_algorithm: DistanceAlgorithm::DamerauLevenshtein,
            edit_weights: EditWeights::default(),
            keyboard_layout: None,
        }
    }
}

impl SpellCheckSettings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: SpellCheckSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize settings to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_edit_distance.is_nan() || self.max_edit_distance < 0.0 {
            return Err(SymSpellError::invalid_config(
                "max_edit_distance must be a non-negative number",
            ));
        }
        if self.top_k == 0 {
            return Err(SymSpellError::invalid_config("top_k must be at least 1"));
        }
        if self.prefix_length == 0 || self.prefix_length as f64 <= self.max_edit_distance {
            return Err(SymSpellError::invalid_config(
                "prefix_length must be greater than max_edit_distance",
            ));
        }
        if !self.edit_factor.is_finite() || self.edit_factor < 0.0 {
            return Err(SymSpellError::invalid_config(
                "edit_factor must be a non-negative number",
            ));
        }
        if !(self.corpus_word_count.is_finite() && self.corpus_word_count > 0.0) {
            return Err(SymSpellError::invalid_config(
                "corpus_word_count must be positive",
            ));
        }
        Ok(())
    }

    /// Build the configured string distance.
    pub fn build_distance(&self) -> Box<dyn StringDistance> {
        match self.distance_algorithm {
            DistanceAlgorithm::Levenshtein => Box::new(Levenshtein),
            DistanceAlgorithm::DamerauLevenshtein => Box::new(DamerauLevenshtein),
            DistanceAlgorithm::Weighted => {
                let w = self.edit_weights;
                let distance = WeightedDamerauLevenshtein::new(
                    w.deletion,
                    w.insertion,
                    w.replace,
                    w.transposition,
                );
                let distance = match self.keyboard_layout {
                    Some(KeyboardLayout::Qwerty) => {
                        distance.char_distance(Arc::new(KeyboardDistance::qwerty()))
                    }
                    Some(KeyboardLayout::Qwertz) => {
                        distance.char_distance(Arc::new(KeyboardDistance::qwertz()))
                    }
                    None => distance,
                };
                Box::new(distance)
            }
        }
    }
}
