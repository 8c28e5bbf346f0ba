//! In-memory form of an `.fdic` frequency dictionary.

use std::io::{BufRead, BufReader, Read};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SymSpellError};

/// First four bytes of every `.fdic` file, stored big-endian.
pub const MAGIC_WORD: u32 = 0x0F0D_010C;
/// The only format version this crate reads and writes.
pub const FORMAT_VERSION: u8 = 0x01;
/// Longest accepted locale tag, in chars.
pub const MAX_LOCALE_LENGTH: usize = 32;

/// A list of n-gram terms with their corpus counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyDictionary {
    pub format_version: u8,
    /// 1 for unigrams, 2 for bigrams.
    pub ngrams: u8,
    /// Locale tag such as `en` or `de-CH`.
    pub locale: String,
    /// Terms in file order. Bigram terms hold their words separated by one
    /// space.
    pub terms: Vec<(String, u64)>,
}

impl FrequencyDictionary {
    pub fn new<S: Into<String>>(ngrams: u8, locale: S) -> Self {
        FrequencyDictionary {
            format_version: FORMAT_VERSION,
            ngrams,
            locale: locale.into(),
            terms: Vec::new(),
        }
    }

    pub fn push<S: Into<String>>(&mut self, term: S, frequency: u64) {
        self.terms.push((term.into(), frequency));
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn ngram_name(&self) -> &'static str {
        match self.ngrams {
            1 => "unigram",
            2 => "bigram",
            _ => "invalid",
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.ngrams != 1 && self.ngrams != 2 {
            return Err(SymSpellError::validation(format!(
                "invalid ngram size: {}",
                self.ngrams
            )));
        }
        let locale_length = self.locale.chars().count();
        if self.locale.trim().is_empty() || locale_length > MAX_LOCALE_LENGTH {
            return Err(SymSpellError::validation(format!(
                "invalid locale: {:?}",
                self.locale
            )));
        }
        if self.terms.is_empty() {
            return Err(SymSpellError::validation("dictionary has no terms"));
        }
        Ok(())
    }

    /// Build a dictionary from a plain-text frequency list: `term count`
    /// lines for unigrams, `word1 word2 count` lines for bigrams.
    ///
    /// Lines without enough fields or with a count that is not an unsigned
    /// integer are skipped and logged.
    pub fn from_text<R: Read, S: Into<String>>(reader: R, ngrams: u8, locale: S) -> Result<Self> {
        let mut dictionary = FrequencyDictionary::new(ngrams, locale);
        let mut skipped = 0usize;

        for (number, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            match parse_entry(&line, ngrams) {
                Some((term, frequency)) => dictionary.terms.push((term, frequency)),
                None if line.trim().is_empty() => {}
                None => {
                    skipped += 1;
                    warn!("skipping malformed dictionary line {}: {line:?}", number + 1);
                }
            }
        }

        if skipped > 0 {
            warn!("skipped {skipped} malformed lines");
        }
        dictionary.validate()?;
        Ok(dictionary)
    }
}

fn parse_entry(line: &str, ngrams: u8) -> Option<(String, u64)> {
    let mut fields = line.split_whitespace();
    let term = match ngrams {
        1 => fields.next()?.to_string(),
        2 => {
            let first = fields.next()?;
            let second = fields.next()?;
            format!("{first} {second}")
        }
        _ => return None,
    };
    let frequency = fields.next()?.parse().ok()?;
    Some((term, frequency))
}
