//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "demog-classify",
    version,
    about = "Classify column metadata as demographic using fuzzy keyword matching",
    long_about = "Classify column metadata records as demographic.\n\n\
                  Each record's description is compared against a keyword vocabulary\n\
                  with one of four fuzzy similarity measures (ratio, partial_ratio,\n\
                  token_sort_ratio, token_set_ratio) and a percentage threshold."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify every record of a metadata CSV file.
    Classify(ClassifyArgs),

    /// List the keyword vocabulary grouped by category.
    Keywords(VocabularyArgs),

    /// Show every keyword score for a single text.
    Explain(ExplainArgs),
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// Metadata CSV with a header row.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    #[command(flatten)]
    pub matching: MatchArgs,

    #[command(flatten)]
    pub vocabulary: VocabularyArgs,

    /// Write annotated rows to this CSV file.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write every row to --output, not only matched ones.
    #[arg(long = "all", requires = "output")]
    pub all: bool,

    /// Print statistics as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Score records on all cores.
    #[arg(long = "parallel")]
    pub parallel: bool,
}

#[derive(Args)]
pub struct ExplainArgs {
    /// Text to score, e.g. an attribute description.
    #[arg(value_name = "TEXT")]
    pub text: String,

    #[command(flatten)]
    pub matching: MatchArgs,

    #[command(flatten)]
    pub vocabulary: VocabularyArgs,
}

#[derive(Args)]
pub struct MatchArgs {
    /// JSON file with algorithm, threshold, text_field and group_field.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Similarity measure: ratio, partial_ratio, token_sort_ratio or token_set_ratio.
    #[arg(long = "algorithm", short = 'a')]
    pub algorithm: Option<String>,

    /// Minimum score (0-100) for a match.
    #[arg(long = "threshold", short = 't', allow_negative_numbers = true)]
    pub threshold: Option<i64>,

    /// Column holding the text to match.
    #[arg(long = "text-field")]
    pub text_field: Option<String>,

    /// Column used to group statistics.
    #[arg(long = "group-field")]
    pub group_field: Option<String>,
}

#[derive(Args)]
pub struct VocabularyArgs {
    /// Built-in vocabulary.
    #[arg(long = "vocabulary", value_enum, default_value = "demographic")]
    pub vocabulary: VocabularyArg,

    /// Extra keywords, one per line, appended to the built-in vocabulary.
    #[arg(long = "keywords", value_name = "FILE")]
    pub keywords: Option<PathBuf>,

    /// Use only the keywords from --keywords.
    #[arg(long = "custom-only", requires = "keywords")]
    pub custom_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum VocabularyArg {
    Demographic,
    Extended,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
