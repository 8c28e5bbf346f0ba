//! Compact binary frequency dictionaries (`.fdic`).
//!
//! An `.fdic` file holds the same data as a plain-text `term count` list:
//! a small uncompressed header identifies the file, and the terms follow in a
//! gzip stream with varint counts. See [`io`] for the exact layout.

pub mod dictionary;
pub mod io;

pub use dictionary::{FORMAT_VERSION, FrequencyDictionary, MAGIC_WORD};
pub use io::{
    default_output_path, is_fdic, is_fdic_file, read_fdic, read_fdic_bytes, read_fdic_file,
    write_fdic, write_fdic_file,
};

use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::spelling::engine::SymSpell;
use crate::spelling::loader::LoadReport;

impl SymSpell {
    /// Feed every term of `dictionary` to the index.
    ///
    /// Unigram and bigram dictionaries go through the same entry point; bigram
    /// terms contain a space and are routed by the key split rule.
    pub fn load_fdic(&mut self, dictionary: &FrequencyDictionary) -> LoadReport {
        for (term, frequency) in &dictionary.terms {
            self.create_dictionary_entry(term.as_str(), *frequency as f64);
        }
        debug!(
            "loaded {} {} terms ({})",
            dictionary.term_count(),
            dictionary.ngram_name(),
            dictionary.locale
        );
        LoadReport {
            loaded: dictionary.term_count(),
            skipped: 0,
        }
    }

    pub fn load_fdic_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        let dictionary = read_fdic_file(path)?;
        Ok(self.load_fdic(&dictionary))
    }

    /// Live unigrams as a frequency dictionary, in insertion order.
    /// Frequencies are rounded to whole counts.
    pub fn unigram_dictionary<S: Into<String>>(&self, locale: S) -> FrequencyDictionary {
        let mut dictionary = FrequencyDictionary::new(1, locale);
        for (term, frequency) in self.index().unigrams() {
            dictionary.push(term, frequency.round() as u64);
        }
        dictionary
    }

    /// Bigrams as a frequency dictionary. Order is unspecified.
    pub fn bigram_dictionary<S: Into<String>>(&self, locale: S) -> FrequencyDictionary {
        let mut dictionary = FrequencyDictionary::new(2, locale);
        for (term, frequency) in self.index().bigrams() {
            dictionary.push(term, frequency.round() as u64);
        }
        dictionary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::settings::{SpellCheckSettings, Verbosity};

    #[test]
    fn test_load_fdic_into_engine() {
        let mut unigrams = FrequencyDictionary::new(1, "en");
        unigrams.push("players", 100);
        unigrams.push("high", 50);
        unigrams.push("way", 40);
        let mut bigrams = FrequencyDictionary::new(2, "en");
        bigrams.push("high way", 30);

        let mut engine = SymSpell::new(SpellCheckSettings::default()).unwrap();
        assert_eq!(engine.load_fdic(&unigrams).loaded, 3);
        engine.load_fdic(&bigrams);

        let suggestions = engine.lookup("playrs", Verbosity::Top, 2.0).unwrap();
        assert_eq!(suggestions[0].term, "players");
        assert_eq!(engine.index().get_item_frequency_bigram("high way"), Some(30.0));
    }

    #[test]
    fn test_export_dictionaries() {
        let mut engine = SymSpell::new(SpellCheckSettings::default()).unwrap();
        engine.create_dictionary_entry("one", 1.4);
        engine.create_dictionary_entry("two", 2.0);
        engine.create_dictionary_entry("one two", 3.0);

        let unigrams = engine.unigram_dictionary("en");
        assert_eq!(
            unigrams.terms,
            vec![("one".to_string(), 1), ("two".to_string(), 2)]
        );
        assert_eq!(
            engine.bigram_dictionary("en").terms,
            vec![("one two".to_string(), 3)]
        );
    }
}
