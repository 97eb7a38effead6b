//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use placematch_match::MatchConfig;

#[derive(Parser)]
#[command(
    name = "placematch",
    version,
    about = "Resolve free-text place names against a reference registry",
    long_about = "Resolve free-text place names against a reference registry.\n\n\
                  Names are matched exactly after normalization, then by sequence\n\
                  similarity. Duplicated names are disambiguated by region."
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

    /// Log output format (pretty for human, json for machine parsing).
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

    /// Prefix log lines with timestamps (pretty and compact formats).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve every row of a CSV table and write the enriched result.
    Run(RunArgs),

    /// Resolve a single name and show how the decision was reached.
    Lookup(LookupArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Registry snapshot (JSON array of records).
    #[arg(long = "registry", value_name = "FILE")]
    pub registry: PathBuf,

    /// Input CSV with a `municipio` column and optional `populacao` column.
    #[arg(long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Result CSV (default: resultado.csv next to the input).
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also write batch statistics as JSON.
    #[arg(long = "stats", value_name = "FILE")]
    pub stats: Option<PathBuf>,

    #[command(flatten)]
    pub matching: MatchArgs,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Name to resolve.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Registry snapshot (JSON array of records).
    #[arg(long = "registry", value_name = "FILE")]
    pub registry: PathBuf,

    #[command(flatten)]
    pub matching: MatchArgs,
}

/// Matching knobs shared by `run` and `lookup`.
#[derive(Args)]
pub struct MatchArgs {
    /// Minimum similarity for an approximate candidate (0.0 to 1.0).
    #[arg(long = "cutoff", value_name = "SCORE")]
    pub cutoff: Option<f64>,

    /// Number of approximate candidates considered.
    #[arg(long = "max-candidates", value_name = "N")]
    pub max_candidates: Option<usize>,

    /// Region preferred when several records share a name.
    #[arg(long = "preferred-region", value_name = "NAME")]
    pub preferred_region: Option<String>,
}

impl MatchArgs {
    /// Overlays the given flags on the default configuration.
    pub fn to_config(&self) -> MatchConfig {
        let mut config = MatchConfig::default();
        if let Some(cutoff) = self.cutoff {
            config = config.with_similarity_cutoff(cutoff);
        }
        if let Some(max_candidates) = self.max_candidates {
            config = config.with_max_candidates(max_candidates);
        }
        if let Some(region) = &self.preferred_region {
            config = config.with_preferred_region(region.clone());
        }
        config
    }
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
