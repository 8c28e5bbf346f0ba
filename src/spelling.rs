//! Spelling correction built on the symmetric delete algorithm.
//!
//! [`SymSpell`] owns a [`DictionaryIndex`] and a string distance and offers
//! three kinds of queries:
//!
//! - [`SymSpell::lookup`] corrects a single word.
//! - [`SymSpell::lookup_compound`] corrects a phrase, including misplaced
//!   or missing spaces.
//! - [`SymSpell::word_break_segmentation`] inserts spaces into text that has
//!   none, correcting each word on the way.

pub mod compound;
pub mod dictionary;
pub mod engine;
pub mod loader;
pub mod segmentation;
pub mod settings;
pub mod suggestion;

pub use dictionary::{DictionaryIndex, DictionaryItem, IndexStats};
pub use engine::SymSpell;
pub use loader::LoadReport;
pub use settings::{DistanceAlgorithm, EditWeights, KeyboardLayout, SpellCheckSettings, Verbosity};
pub use suggestion::{Composition, SuggestionItem};
