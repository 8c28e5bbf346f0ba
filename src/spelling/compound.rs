//! Multi-word correction.
//!
//! Each token of the phrase is corrected on its own, but a token may also be
//! merged with its predecessor (fixing a wrongly inserted space) or split in
//! two (fixing a missing space). The variant that best explains the input
//! wins, with bigram frequencies deciding between comparable splits.

use log::trace;

use crate::error::{Result, SymSpellError};
use crate::spelling::engine::SymSpell;
use crate::spelling::settings::Verbosity;
use crate::spelling::suggestion::{SuggestionItem, approx_eq};

impl SymSpell {
    /// Correct a whole phrase.
    ///
    /// With `tokenize` the phrase is split on whitespace, otherwise it is
    /// treated as one token. Returns exactly one suggestion holding the
    /// corrected phrase, its distance to the input and the lowest frequency of
    /// its parts.
    pub fn lookup_compound(
        &self,
        phrase: &str,
        edit_distance: f64,
        tokenize: bool,
    ) -> Result<Vec<SuggestionItem>> {
        self.validate_edit_distance(edit_distance)?;
        if phrase.trim().is_empty() {
            return Err(SymSpellError::validation("phrase must not be empty"));
        }

        let phrase = self.normalize(phrase);
        if let Some(item) = self.exclusion_suggestion(&phrase) {
            return Ok(vec![item]);
        }

        let tokens: Vec<&str> = if tokenize {
            phrase.split_whitespace().collect()
        } else {
            vec![phrase.as_str()]
        };

        let mut parts: Vec<SuggestionItem> = Vec::with_capacity(tokens.len());
        let mut last_combined = false;

        for (i, &token) in tokens.iter().enumerate() {
            let suggestions = self.lookup_unchecked(token, Verbosity::Top, edit_distance, false);

            if i > 0
                && !last_combined
                && self.try_merge(tokens[i - 1], token, &suggestions, &mut parts, edit_distance)
            {
                last_combined = true;
                continue;
            }
            last_combined = false;

            match suggestions.first() {
                Some(best) if approx_eq(best.distance, 0.0) || token.chars().count() == 1 => {
                    parts.push(best.clone());
                }
                _ => parts.push(self.best_split(token, &suggestions, edit_distance)),
            }
        }

        let joined = parts
            .iter()
            .map(|part| part.term.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let frequency = parts
            .iter()
            .map(|part| part.frequency)
            .fold(f64::MAX, f64::min);
        let distance = self.string_distance().distance(&joined, &phrase);

        trace!("compound {phrase:?} -> {joined:?} ({distance})");
        Ok(vec![SuggestionItem::new(joined, distance, frequency)])
    }

    /// Replace the last part with the correction of `previous + token` when
    /// that explains the two tokens better than correcting them apart.
    fn try_merge(
        &self,
        previous: &str,
        token: &str,
        suggestions: &[SuggestionItem],
        parts: &mut [SuggestionItem],
        edit_distance: f64,
    ) -> bool {
        let combined = format!("{previous}{token}");
        let combined_suggestions =
            self.lookup_unchecked(&combined, Verbosity::Top, edit_distance, false);
        let (Some(best_combined), Some(last)) = (combined_suggestions.first(), parts.last_mut())
        else {
            return false;
        };

        let best_token = suggestions
            .first()
            .cloned()
            .unwrap_or_else(|| SuggestionItem::new(token, edit_distance + 1.0, 0.0));
        let separate = self.string_distance().distance_bounded(
            &format!("{} {}", last.term, best_token.term),
            &format!("{previous} {token}"),
            edit_distance,
        );

        if separate >= 0.0 && best_combined.distance < separate {
            *last = best_combined.with_distance(best_combined.distance + 1.0);
            return true;
        }
        false
    }

    /// Best of the token's own correction and every two-way split of it.
    fn best_split(
        &self,
        token: &str,
        suggestions: &[SuggestionItem],
        edit_distance: f64,
    ) -> SuggestionItem {
        let unknown = || SuggestionItem::new(token, edit_distance + 1.0, 0.0);
        let chars: Vec<char> = token.chars().collect();
        if chars.len() <= 1 {
            return suggestions.first().cloned().unwrap_or_else(unknown);
        }

        let corpus = self.settings().corpus_word_count;
        let bigram_count_min = self.stats().bigram_count_min;
        let mut best: Option<SuggestionItem> = suggestions.first().cloned();

        for j in 1..chars.len() {
            let head: String = chars[..j].iter().collect();
            let tail: String = chars[j..].iter().collect();

            let head_suggestions = self.lookup_unchecked(&head, Verbosity::Top, edit_distance, false);
            if same_head(suggestions, &head_suggestions) {
                continue;
            }
            let tail_suggestions = self.lookup_unchecked(&tail, Verbosity::Top, edit_distance, false);
            if same_head(suggestions, &tail_suggestions) {
                continue;
            }
            let (first, second) = (&head_suggestions[0], &tail_suggestions[0]);

            let split = format!("{} {}", first.term, second.term);
            let mut distance = self
                .string_distance()
                .distance_bounded(token, &split, edit_distance);
            if distance < 0.0 {
                distance = edit_distance + 1.0;
            }

            if let Some(current) = &best {
                if distance > current.distance {
                    continue;
                }
                if distance < current.distance {
                    best = None;
                }
            }

            let glued = format!("{}{}", first.term, second.term);
            let frequency = match self.index().get_item_frequency_bigram(&split) {
                Some(bigram) => match suggestions.first() {
                    // The token was a correct word missing only a space.
                    Some(top) if glued == token => bigram.max(top.frequency + 2.0),
                    Some(top) if first.term == top.term || second.term == top.term => {
                        bigram.max(top.frequency + 1.0)
                    }
                    None if glued == token => bigram.max(first.frequency.max(second.frequency)),
                    _ => bigram,
                },
                // Naive Bayes estimate, never above the rarest known bigram.
                None => bigram_count_min.min(first.frequency / corpus * second.frequency),
            };

            let candidate = SuggestionItem::new(split, distance, frequency);
            if best
                .as_ref()
                .is_none_or(|current| candidate.frequency > current.frequency)
            {
                best = Some(candidate);
            }
        }

        best.unwrap_or_else(unknown)
    }
}

/// True when `other` is empty or starts with the same suggestion as
/// `suggestions`. Such a split adds nothing over the unsplit token.
fn same_head(suggestions: &[SuggestionItem], other: &[SuggestionItem]) -> bool {
    match (suggestions.first(), other.first()) {
        (_, None) => true,
        (Some(a), Some(b)) => a.term == b.term && a.distance == b.distance,
        (None, Some(_)) => false,
    }
}
