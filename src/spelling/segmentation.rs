//! Word segmentation of text with missing spaces.
//!
//! A dynamic program over end positions: for every start position `j` and
//! part length `i`, the best composition ending at `j` is extended by the
//! corrected part `j..j + i`. Only the last `max_segmentation_word_length`
//! compositions can still be extended, so they are kept in a circular buffer.

use std::cmp::min;

use log::trace;

use crate::error::{Result, SymSpellError};
use crate::spelling::engine::SymSpell;
use crate::spelling::settings::Verbosity;
use crate::spelling::suggestion::{Composition, approx_eq, approx_lt};

impl SymSpell {
    /// Insert spaces into `phrase` and correct each resulting word.
    ///
    /// Compositions are compared by total edit distance, where each inserted
    /// space counts as one edit, and then by the summed log10 probability of
    /// their words. Unknown parts are penalized by their length.
    pub fn word_break_segmentation(
        &self,
        phrase: &str,
        max_segmentation_word_length: usize,
        max_edit_distance: f64,
    ) -> Result<Composition> {
        if max_segmentation_word_length == 0 {
            return Err(SymSpellError::validation(
                "max_segmentation_word_length must be at least 1",
            ));
        }
        self.validate_edit_distance(max_edit_distance)?;
        if phrase.is_empty() {
            return Ok(Composition::default());
        }

        let phrase = self.normalize(phrase);
        if let Some(replacement) = self.index().get_exclusion_item(&phrase) {
            return Ok(Composition::new(phrase.as_str(), replacement));
        }

        let chars: Vec<char> = phrase.chars().collect();
        let corpus = self.settings().corpus_word_count;
        let array_size = min(max_segmentation_word_length, chars.len());
        let mut compositions = vec![Composition::default(); array_size];
        // Slot of the composition ending before position j. Starts one
        // behind slot 0.
        let mut circular_index = array_size - 1;

        for j in 0..chars.len() {
            let imax = min(chars.len() - j, max_segmentation_word_length);
            for i in 1..=imax {
                let mut part: String = chars[j..j + i].iter().collect();
                let mut separator_length = 0.0;
                let mut top_ed = 0.0;

                // A space already present in the input is not an inserted one.
                if part.starts_with(char::is_whitespace) {
                    part.remove(0);
                } else {
                    separator_length = 1.0;
                }

                let part_len = part.chars().count();
                part.retain(|c| c != ' ');
                let stripped_len = part.chars().count();
                top_ed += (part_len - stripped_len) as f64;

                let (top_result, top_log_prob) = if part.is_empty() {
                    (String::new(), 0.0)
                } else {
                    let results = self.lookup_unchecked(
                        &part,
                        Verbosity::Top,
                        max_edit_distance,
                        false,
                    );
                    match results.into_iter().next() {
                        Some(best) => {
                            top_ed += best.distance;
                            (best.term, (best.frequency / corpus).log10())
                        }
                        None => {
                            top_ed += stripped_len as f64;
                            let penalty = (10.0 / (corpus * 10f64.powi(stripped_len as i32))).log10();
                            (part.clone(), penalty)
                        }
                    }
                };

                let destination = (i + circular_index) % array_size;

                if j == 0 {
                    compositions[destination] = Composition {
                        segmented_string: part,
                        corrected_string: top_result,
                        distance_sum: top_ed,
                        log_prob_sum: top_log_prob,
                    };
                    continue;
                }

                let previous = &compositions[circular_index];
                let current = &compositions[destination];
                let distance = previous.distance_sum + separator_length + top_ed;
                let log_prob = previous.log_prob_sum + top_log_prob;

                let replace = i == max_segmentation_word_length
                    || ((approx_eq(previous.distance_sum + top_ed, current.distance_sum)
                        || approx_eq(distance, current.distance_sum))
                        && current.log_prob_sum < log_prob)
                    || approx_lt(distance, current.distance_sum);

                if replace {
                    let extended = Composition {
                        segmented_string: join_words(&previous.segmented_string, &part),
                        corrected_string: join_words(&previous.corrected_string, &top_result),
                        distance_sum: distance,
                        log_prob_sum: log_prob,
                    };
                    compositions[destination] = extended;
                }
            }
            circular_index = (circular_index + 1) % array_size;
        }

        let composition = std::mem::take(&mut compositions[circular_index]);
        trace!(
            "segmented {phrase:?} -> {:?} ({})",
            composition.corrected_string, composition.distance_sum
        );
        Ok(composition)
    }
}

fn join_words(prefix: &str, word: &str) -> String {
    match (prefix.is_empty(), word.is_empty()) {
        (_, true) => prefix.to_string(),
        (true, false) => word.to_string(),
        (false, false) => format!("{prefix} {word}"),
    }
}
