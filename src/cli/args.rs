//! Command line argument parsing for the symspell CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::spelling::settings::Verbosity;

/// symspell - fast spelling correction with the symmetric delete algorithm
#[derive(Parser, Debug, Clone)]
#[command(name = "symspell")]
#[command(about = "Spelling correction, compound correction and word segmentation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SymSpellArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Spell checker settings file (JSON)
    #[arg(long, value_name = "SETTINGS_FILE", env = "SYMSPELL_SETTINGS", global = true)]
    pub settings: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SymSpellArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Suggest corrections for single words
    Lookup(LookupArgs),

    /// Correct whole phrases, including misplaced spaces
    Compound(CompoundArgs),

    /// Insert missing spaces and correct the resulting words
    Segment(SegmentArgs),

    /// Convert a plain-text frequency list to an .fdic file
    Convert(ConvertArgs),

    /// Show dictionary statistics
    Stats(StatsArgs),
}

/// Dictionary sources shared by every command that builds an engine.
#[derive(Args, Debug, Clone)]
pub struct DictionaryArgs {
    /// Unigram dictionary, plain text or .fdic
    #[arg(short, long, value_name = "DICTIONARY", env = "SYMSPELL_DICTIONARY")]
    pub dictionary: PathBuf,

    /// Bigram dictionary, plain text or .fdic
    #[arg(short, long, value_name = "BIGRAMS")]
    pub bigrams: Option<PathBuf>,

    /// Override the maximum edit distance
    #[arg(long)]
    pub max_edit_distance: Option<f64>,

    /// Override the prefix length
    #[arg(long)]
    pub prefix_length: Option<usize>,

    /// Override the count threshold
    #[arg(long)]
    pub count_threshold: Option<u64>,

    /// Parse text dictionaries on all cores
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for single-word lookup
#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    #[command(flatten)]
    pub dictionary: DictionaryArgs,

    /// Words to correct
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    /// Which suggestions to return
    #[arg(short = 'm', long, default_value = "closest")]
    pub verbosity: VerbosityArg,

    /// Edit distance for this query (default: the maximum)
    #[arg(short, long)]
    pub edit_distance: Option<f64>,

    /// Return the word itself when nothing is found
    #[arg(long)]
    pub include_unknown: bool,
}

/// Arguments for compound correction
#[derive(Args, Debug, Clone)]
pub struct CompoundArgs {
    #[command(flatten)]
    pub dictionary: DictionaryArgs,

    /// Phrase to correct
    #[arg(value_name = "PHRASE")]
    pub phrase: String,

    /// Edit distance for each word (default: the maximum)
    #[arg(short, long)]
    pub edit_distance: Option<f64>,

    /// Treat the phrase as a single token
    #[arg(long)]
    pub no_tokenize: bool,
}

/// Arguments for word segmentation
#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    #[command(flatten)]
    pub dictionary: DictionaryArgs,

    /// Text to segment
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Longest word considered, in chars
    #[arg(short = 'w', long, default_value = "20")]
    pub max_word_length: usize,

    /// Edit distance for each word (default: 0)
    #[arg(short, long, default_value = "0")]
    pub edit_distance: f64,
}

/// Arguments for dictionary conversion
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Plain-text frequency list
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output path (default: INPUT with an .fdic extension)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Words per entry: 1 for unigrams, 2 for bigrams
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=2))]
    pub ngrams: u8,

    /// Locale tag of the dictionary
    #[arg(short, long, default_value = "en")]
    pub locale: String,

    /// Read the file back after writing and compare
    #[arg(long)]
    pub verify: bool,
}

/// Arguments for dictionary statistics
#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub dictionary: DictionaryArgs,
}

/// Verbosity as a CLI value
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbosityArg {
    /// Single best suggestion
    Top,
    /// All suggestions at the smallest distance
    Closest,
    /// Every suggestion within the edit distance
    All,
}

impl From<VerbosityArg> for Verbosity {
    fn from(value: VerbosityArg) -> Self {
        match value {
            VerbosityArg::Top => Verbosity::Top,
            VerbosityArg::Closest => Verbosity::Closest,
            VerbosityArg::All => Verbosity::All,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
