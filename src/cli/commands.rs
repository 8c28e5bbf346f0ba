//! Command implementations for the symspell CLI.

use std::fs::{self, File};
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, SymSpellError};
use crate::fdic::{self, FrequencyDictionary};
use crate::spelling::loader::LoadReport;
use crate::spelling::settings::SpellCheckSettings;
use crate::spelling::{SuggestionItem, SymSpell};

/// Execute a CLI command.
pub fn execute_command(args: SymSpellArgs) -> Result<()> {
    match &args.command {
        Command::Lookup(lookup_args) => lookup_words(lookup_args.clone(), &args),
        Command::Compound(compound_args) => correct_compound(compound_args.clone(), &args),
        Command::Segment(segment_args) => segment_text(segment_args.clone(), &args),
        Command::Convert(convert_args) => convert_dictionary(convert_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
    }
}

/// Suggest corrections for each word.
fn lookup_words(args: LookupArgs, cli_args: &SymSpellArgs) -> Result<()> {
    let (engine, _) = build_engine(&args.dictionary, cli_args, |settings| {
        if args.include_unknown {
            settings.ignore_unknown = false;
        }
    })?;
    let edit_distance = args
        .edit_distance
        .unwrap_or(engine.settings().max_edit_distance);

    let start_time = Instant::now();
    let results = args
        .words
        .iter()
        .map(|word| {
            let suggestions = engine.lookup(word, args.verbosity.into(), edit_distance)?;
            Ok(WordSuggestions {
                word: word.clone(),
                suggestions,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let duration = start_time.elapsed();

    output_result(
        "Lookup completed",
        &LookupResults {
            results,
            duration_us: duration.as_micros() as u64,
        },
        cli_args,
    )
}

/// Correct a phrase.
fn correct_compound(args: CompoundArgs, cli_args: &SymSpellArgs) -> Result<()> {
    let (engine, _) = build_engine(&args.dictionary, cli_args, |_| {})?;
    let edit_distance = args
        .edit_distance
        .unwrap_or(engine.settings().max_edit_distance);

    let start_time = Instant::now();
    let suggestion = engine
        .lookup_compound(&args.phrase, edit_distance, !args.no_tokenize)?
        .into_iter()
        .next()
        .unwrap_or_else(|| SuggestionItem::new(args.phrase.as_str(), edit_distance + 1.0, 0.0));
    let duration = start_time.elapsed();

    output_result(
        "Compound correction completed",
        &CompoundResult {
            input: args.phrase,
            suggestion,
            duration_us: duration.as_micros() as u64,
        },
        cli_args,
    )
}

/// Segment text that lacks spaces.
fn segment_text(args: SegmentArgs, cli_args: &SymSpellArgs) -> Result<()> {
    let (engine, _) = build_engine(&args.dictionary, cli_args, |_| {})?;

    let start_time = Instant::now();
    let composition =
        engine.word_break_segmentation(&args.text, args.max_word_length, args.edit_distance)?;
    let duration = start_time.elapsed();

    output_result(
        "Segmentation completed",
        &SegmentationResult {
            input: args.text,
            composition,
            duration_us: duration.as_micros() as u64,
        },
        cli_args,
    )
}

/// Convert a plain-text frequency list to `.fdic`.
fn convert_dictionary(args: ConvertArgs, cli_args: &SymSpellArgs) -> Result<()> {
    if !args.input.is_file() {
        return Err(SymSpellError::invalid_argument(format!(
            "input file does not exist: {}",
            args.input.display()
        )));
    }
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| fdic::default_output_path(&args.input));
    if output == args.input {
        return Err(SymSpellError::invalid_argument(
            "output path must differ from the input path",
        ));
    }

    info!(
        "converting {} to {} ({}-gram, {})",
        args.input.display(),
        output.display(),
        args.ngrams,
        args.locale
    );
    let dictionary =
        FrequencyDictionary::from_text(File::open(&args.input)?, args.ngrams, args.locale.as_str())?;
    fdic::write_fdic_file(&dictionary, &output)?;

    let verified = if args.verify {
        let decoded = fdic::read_fdic_file(&output)?;
        if decoded != dictionary {
            return Err(SymSpellError::format(format!(
                "verification failed: {} does not decode to its input",
                output.display()
            )));
        }
        true
    } else {
        false
    };

    let input_bytes = fs::metadata(&args.input)?.len();
    let output_bytes = fs::metadata(&output)?.len();
    if cli_args.verbosity() > 1 {
        println!(
            "{} -> {}",
            format_bytes(input_bytes),
            format_bytes(output_bytes)
        );
    }

    output_result(
        "Dictionary converted successfully",
        &ConversionResult {
            input: args.input.to_string_lossy().to_string(),
            output: output.to_string_lossy().to_string(),
            ngrams: dictionary.ngrams,
            locale: dictionary.locale.clone(),
            terms: dictionary.term_count(),
            input_bytes,
            output_bytes,
            verified,
        },
        cli_args,
    )
}

/// Show statistics of a loaded dictionary.
fn show_stats(args: StatsArgs, cli_args: &SymSpellArgs) -> Result<()> {
    let start_time = Instant::now();
    let (engine, report) = build_engine(&args.dictionary, cli_args, |_| {})?;
    let duration = start_time.elapsed();
    let index = engine.index();

    output_result(
        "Dictionary statistics",
        &DictionaryStats {
            unigrams: index.word_count(),
            bigrams: index.bigram_count(),
            below_threshold: index.below_threshold_count(),
            delete_buckets: index.delete_bucket_count(),
            max_word_length: index.stats().max_length,
            lines_skipped: report.skipped,
            load_duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Load settings, apply overrides and fill an engine from the dictionary
/// sources.
fn build_engine<F>(
    args: &DictionaryArgs,
    cli_args: &SymSpellArgs,
    customize: F,
) -> Result<(SymSpell, LoadReport)>
where
    F: FnOnce(&mut SpellCheckSettings),
{
    let mut settings = match &cli_args.settings {
        Some(path) => {
            debug!("loading settings from {}", path.display());
            SpellCheckSettings::from_json_file(path)?
        }
        None => SpellCheckSettings::default(),
    };
    if let Some(max_edit_distance) = args.max_edit_distance {
        settings.max_edit_distance = max_edit_distance;
    }
    if let Some(prefix_length) = args.prefix_length {
        settings.prefix_length = prefix_length;
    }
    if let Some(count_threshold) = args.count_threshold {
        settings.count_threshold = count_threshold;
    }
    customize(&mut settings);

    let mut engine = SymSpell::new(settings)?;
    let mut report = load_source(&mut engine, &args.dictionary, 1, args.parallel)?;
    if let Some(bigrams) = &args.bigrams {
        let bigram_report = load_source(&mut engine, bigrams, 2, args.parallel)?;
        report.loaded += bigram_report.loaded;
        report.skipped += bigram_report.skipped;
    }

    info!(
        "dictionary ready: {} unigrams, {} bigrams",
        engine.index().word_count(),
        engine.index().bigram_count()
    );
    Ok((engine, report))
}

/// Load a text or `.fdic` dictionary, telling them apart by their first bytes.
fn load_source(engine: &mut SymSpell, path: &Path, ngrams: u8, parallel: bool) -> Result<LoadReport> {
    if fdic::is_fdic_file(path)? {
        debug!("reading {} as fdic", path.display());
        return engine.load_fdic_file(path);
    }

    debug!("reading {} as text", path.display());
    match (ngrams, parallel) {
        (1, true) => Ok(engine.load_unigrams_parallel(&fs::read_to_string(path)?)),
        (_, true) => Ok(engine.load_bigrams_parallel(&fs::read_to_string(path)?)),
        (1, false) => engine.load_unigrams_from_file(path),
        (_, false) => engine.load_bigrams_from_file(path),
    }
}
