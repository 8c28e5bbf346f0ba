//! Loading frequency dictionaries from text.
//!
//! Unigram lines hold `term count`, bigram lines `word1 word2 count`, with
//! fields separated by whitespace. Extra fields are ignored. Lines that do not
//! parse are skipped and counted, never fatal.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::spelling::engine::SymSpell;

/// Outcome of loading a dictionary source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Lines that were parsed and fed to the index.
    pub loaded: usize,
    /// Blank or malformed lines.
    pub skipped: usize,
}

impl LoadReport {
    fn record(&mut self, parsed: bool) {
        if parsed {
            self.loaded += 1;
        } else {
            self.skipped += 1;
        }
    }
}

/// Parse a unigram line into a term and its count.
pub fn parse_unigram_line(line: &str) -> Option<(String, f64)> {
    let mut fields = line.split_whitespace();
    let term = fields.next()?;
    let count = parse_count(fields.next()?)?;
    Some((term.to_string(), count))
}

/// Parse a bigram line into `"word1 word2"` and its count.
pub fn parse_bigram_line(line: &str) -> Option<(String, f64)> {
    let mut fields = line.split_whitespace();
    let first = fields.next()?;
    let second = fields.next()?;
    let count = parse_count(fields.next()?)?;
    Some((format!("{first} {second}"), count))
}

fn parse_count(field: &str) -> Option<f64> {
    field
        .parse::<f64>()
        .ok()
        .filter(|count| count.is_finite())
}

impl SymSpell {
    /// Load one unigram line. Returns false when the line does not parse.
    pub fn load_unigram_line(&mut self, line: &str) -> bool {
        match parse_unigram_line(line) {
            Some((term, count)) => {
                self.create_dictionary_entry(term, count);
                true
            }
            None => false,
        }
    }

    /// Load one bigram line. Returns false when the line does not parse.
    pub fn load_bigram_line(&mut self, line: &str) -> bool {
        match parse_bigram_line(line) {
            Some((term, count)) => {
                self.add_bigram(&term, count);
                true
            }
            None => false,
        }
    }

    pub fn load_unigrams_from_reader<R: Read>(&mut self, reader: R) -> Result<LoadReport> {
        self.load_lines(reader, Self::load_unigram_line)
    }

    pub fn load_bigrams_from_reader<R: Read>(&mut self, reader: R) -> Result<LoadReport> {
        self.load_lines(reader, Self::load_bigram_line)
    }

    pub fn load_unigrams_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        let path = path.as_ref();
        let report = self.load_unigrams_from_reader(File::open(path)?)?;
        debug!(
            "loaded {} unigram lines from {} ({} skipped)",
            report.loaded,
            path.display(),
            report.skipped
        );
        Ok(report)
    }

    pub fn load_bigrams_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        let path = path.as_ref();
        let report = self.load_bigrams_from_reader(File::open(path)?)?;
        debug!(
            "loaded {} bigram lines from {} ({} skipped)",
            report.loaded,
            path.display(),
            report.skipped
        );
        Ok(report)
    }

    fn load_lines<R: Read>(
        &mut self,
        reader: R,
        load: fn(&mut Self, &str) -> bool,
    ) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        for (number, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let parsed = load(self, &line);
            if !parsed && !line.trim().is_empty() {
                warn!("skipping malformed dictionary line {}: {line:?}", number + 1);
            }
            report.record(parsed);
        }
        Ok(report)
    }

    /// Load a whole unigram dictionary held in memory.
    ///
    /// Lines are parsed on the rayon pool; terms are then inserted in input
    /// order, so the result is identical to [`load_unigrams_from_reader`](Self::load_unigrams_from_reader).
    pub fn load_unigrams_parallel(&mut self, text: &str) -> LoadReport {
        self.load_parsed(text, parse_unigram_line)
    }

    pub fn load_bigrams_parallel(&mut self, text: &str) -> LoadReport {
        self.load_parsed(text, parse_bigram_line)
    }

    fn load_parsed(&mut self, text: &str, parse: fn(&str) -> Option<(String, f64)>) -> LoadReport {
        let parsed: Vec<Option<(String, f64)>> = text.par_lines().map(parse).collect();

        let mut report = LoadReport::default();
        for entry in parsed {
            report.record(entry.is_some());
            if let Some((term, count)) = entry {
                self.create_dictionary_entry(term, count);
            }
        }
        debug!(
            "loaded {} lines in parallel ({} skipped)",
            report.loaded, report.skipped
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::settings::SpellCheckSettings;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn engine() -> SymSpell {
        SymSpell::new(SpellCheckSettings::default()).unwrap()
    }

    #[test]
    fn test_parse_lines() {
        assert_eq!(
            parse_unigram_line("the 23135851162"),
            Some(("the".to_string(), 23135851162.0))
        );
        assert_eq!(
            parse_unigram_line("  word\t12  extra"),
            Some(("word".to_string(), 12.0))
        );
        assert_eq!(parse_unigram_line("lonely"), None);
        assert_eq!(parse_unigram_line("word many"), None);
        assert_eq!(parse_unigram_line(""), None);

        assert_eq!(
            parse_bigram_line("abcs of 10956800"),
            Some(("abcs of".to_string(), 10956800.0))
        );
        assert_eq!(parse_bigram_line("abcs 10956800"), None);
    }

    #[test]
    fn test_load_line() {
        let mut engine = engine();

        assert!(engine.load_unigram_line("hello 10"));
        assert!(engine.load_bigram_line("hello world 5"));
        assert!(!engine.load_unigram_line("broken"));

        assert_eq!(engine.index().get_item_frequency("hello"), Some(10.0));
        assert_eq!(engine.index().get_item_frequency_bigram("hello world"), Some(5.0));
    }

    #[test]
    fn test_load_reader_counts_skips() {
        let mut engine = engine();
        let text = "the 100\nquick 50\n\nbroken\nfox x\nbrown 20\n";

        let report = engine.load_unigrams_from_reader(text.as_bytes()).unwrap();
        assert_eq!(report, LoadReport { loaded: 3, skipped: 3 });
        assert_eq!(engine.index().word_count(), 3);
    }

    #[test]
    fn test_load_files() {
        let mut unigrams = NamedTempFile::new().unwrap();
        writeln!(unigrams, "high 100").unwrap();
        writeln!(unigrams, "way 80").unwrap();
        let mut bigrams = NamedTempFile::new().unwrap();
        writeln!(bigrams, "high way 40").unwrap();

        let mut engine = engine();
        assert_eq!(engine.load_unigrams_from_file(unigrams.path()).unwrap().loaded, 2);
        assert_eq!(engine.load_bigrams_from_file(bigrams.path()).unwrap().loaded, 1);
        assert_eq!(engine.index().get_item_frequency_bigram("high way"), Some(40.0));

        assert!(engine.load_unigrams_from_file("/nonexistent/dictionary.txt").is_err());
    }

    #[test]
    fn test_parallel_matches_serial() {
        let text: String = (0..500)
            .map(|i| format!("word{i} {}\n", i + 1))
            .chain(["bad line here\n".to_string()])
            .collect();

        let mut serial = engine();
        let serial_report = serial.load_unigrams_from_reader(text.as_bytes()).unwrap();
        let mut parallel = engine();
        let parallel_report = parallel.load_unigrams_parallel(&text);

        assert_eq!(serial_report, parallel_report);
        assert_eq!(
            serial.index().unigrams().collect::<Vec<_>>(),
            parallel.index().unigrams().collect::<Vec<_>>()
        );
    }
}
