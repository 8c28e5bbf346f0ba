//! # symspell
//!
//! Spelling correction with the symmetric delete algorithm.
//!
//! ## Features
//!
//! - Single-word lookup with three verbosity levels
//! - Compound correction of phrases with misplaced or missing spaces
//! - Word segmentation of text without spaces
//! - Pluggable edit distances, including keyboard-weighted Damerau-Levenshtein
//! - Plain-text and compact `.fdic` frequency dictionaries
//!
//! ## Example
//!
//! ```
//! use symspell::prelude::*;
//!
//! let mut engine = SymSpell::new(SpellCheckSettings::default()).unwrap();
//! engine.create_dictionary_entry("players", 100.0);
//!
//! let suggestions = engine.lookup("playrs", Verbosity::Top, 2.0).unwrap();
//! assert_eq!(suggestions[0].term, "players");
//! ```

pub mod cli;
pub mod distance;
pub mod error;
pub mod fdic;
pub mod spelling;
pub mod util;

pub mod prelude {
    pub use crate::distance::{
        CharDistance, DamerauLevenshtein, KeyboardDistance, Levenshtein, StringDistance,
        WeightedDamerauLevenshtein,
    };
    pub use crate::error::{Result, SymSpellError};
    pub use crate::fdic::FrequencyDictionary;
    pub use crate::spelling::{
        Composition, DictionaryItem, LoadReport, SpellCheckSettings, SuggestionItem, SymSpell,
        Verbosity,
    };
    pub use crate::util::hash::{AHashFunction, Crc32HashFunction, HashFunction};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
