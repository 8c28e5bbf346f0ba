//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SymSpellArgs};
use crate::error::Result;
use crate::spelling::suggestion::{Composition, SuggestionItem};

/// Suggestions for one looked up word.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordSuggestions {
    pub word: String,
    pub suggestions: Vec<SuggestionItem>,
}

/// Result structure for lookups.
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResults {
    pub results: Vec<WordSuggestions>,
    pub duration_us: u64,
}

/// Result structure for compound correction.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompoundResult {
    pub input: String,
    pub suggestion: SuggestionItem,
    pub duration_us: u64,
}

/// Result structure for word segmentation.
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentationResult {
    pub input: String,
    pub composition: Composition,
    pub duration_us: u64,
}

/// Result structure for dictionary conversion.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversionResult {
    pub input: String,
    pub output: String,
    pub ngrams: u8,
    pub locale: String,
    pub terms: usize,
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub verified: bool,
}

/// Dictionary statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct DictionaryStats {
    pub unigrams: usize,
    pub bigrams: usize,
    pub below_threshold: usize,
    pub delete_buckets: usize,
    pub max_word_length: usize,
    pub lines_skipped: usize,
    pub load_duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &SymSpellArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SymSpellArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("LookupResults") => {
            output_lookup_results_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("CompoundResult") => {
            output_compound_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("SegmentationResult") => {
            output_segmentation_human(&value, args)
        }
        _ => output_generic_human(&value, args),
    }
}

/// Output lookup results in human format.
fn output_lookup_results_human(value: &serde_json::Value, args: &SymSpellArgs) -> Result<()> {
    let Some(results) = value.get("results").and_then(|r| r.as_array()) else {
        return Ok(());
    };

    for result in results {
        let word = result.get("word").and_then(|w| w.as_str()).unwrap_or("");
        let suggestions = result
            .get("suggestions")
            .and_then(|s| s.as_array())
            .map(Vec::as_slice)
            .unwrap_or_default();

        if suggestions.is_empty() {
            println!("{word}: no suggestions");
            continue;
        }

        println!("{word}:");
        for suggestion in suggestions {
            println!("  {}", format_suggestion(suggestion));
        }
    }

    if args.verbosity() > 1
        && let Some(duration) = value.get("duration_us").and_then(|d| d.as_u64())
    {
        println!();
        println!("Lookup time: {duration}µs");
    }
    Ok(())
}

/// Output a compound correction in human format.
fn output_compound_human(value: &serde_json::Value, args: &SymSpellArgs) -> Result<()> {
    if let Some(suggestion) = value.get("suggestion") {
        println!("{}", format_suggestion(suggestion));
    }
    if args.verbosity() > 1
        && let Some(duration) = value.get("duration_us").and_then(|d| d.as_u64())
    {
        println!("Correction time: {duration}µs");
    }
    Ok(())
}

/// Output a segmentation in human format.
fn output_segmentation_human(value: &serde_json::Value, args: &SymSpellArgs) -> Result<()> {
    let Some(composition) = value.get("composition") else {
        return Ok(());
    };
    let field = |name: &str| composition.get(name).and_then(|v| v.as_str()).unwrap_or("");

    println!("{}", field("corrected_string"));
    if args.verbosity() > 1 {
        println!("Segmented: {}", field("segmented_string"));
        if let Some(distance) = composition.get("distance_sum").and_then(|d| d.as_f64()) {
            println!("Distance sum: {distance}");
        }
        if let Some(log_prob) = composition.get("log_prob_sum").and_then(|p| p.as_f64()) {
            println!("Log probability: {log_prob:.4}");
        }
    }
    Ok(())
}

/// Output in generic human format.
fn output_generic_human(value: &serde_json::Value, _args: &SymSpellArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SymSpellArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn format_suggestion(suggestion: &serde_json::Value) -> String {
    let term = suggestion.get("term").and_then(|t| t.as_str()).unwrap_or("");
    let distance = suggestion
        .get("distance")
        .and_then(|d| d.as_f64())
        .unwrap_or(0.0);
    let frequency = suggestion
        .get("frequency")
        .and_then(|f| f.as_f64())
        .unwrap_or(0.0);
    format!("{term} (distance: {distance}, frequency: {frequency})")
}

/// Format a JSON value for human display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "null".to_string(),
        _ => value.to_string(),
    }
}

/// Format a byte count for human display.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
