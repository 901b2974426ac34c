//! CLI argument definitions for the dispensing ETL.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use dispense_model::Frequency;

#[derive(Parser)]
#[command(
    name = "dispense-etl",
    version,
    about = "Critical-supply dispensing ETL - build dashboard JSON from prescription batches",
    long_about = "Read prescription dispensing batches (Parquet or CSV), resolve their \
                  columns by synonym, enrich them with reference tables, keep the \
                  critical-supply items and write series, breakdowns and KPIs as JSON."
)]
pub struct Cli {
    /// Directory holding the reference CSV files.
    #[arg(long = "repo-dir", value_name = "DIR", default_value = ".")]
    pub repo_dir: PathBuf,

    /// Directory holding the batch files.
    #[arg(long = "input-dir", value_name = "DIR", default_value = ".")]
    pub input_dir: PathBuf,

    /// Glob pattern for batch files, relative to the input directory.
    #[arg(long = "parquet-glob", value_name = "PATTERN", default_value = "*.parquet")]
    pub parquet_glob: String,

    /// Output directory for the JSON artifacts.
    #[arg(long = "out-dir", value_name = "DIR", default_value = "docs/data")]
    pub out_dir: PathBuf,

    /// Series frequency: D (daily) or M (monthly).
    #[arg(long = "freq", value_enum, default_value = "D")]
    pub freq: FrequencyArg,

    /// Allow patient identifiers and other row values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
}

/// CLI series frequency choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum FrequencyArg {
    #[value(name = "D")]
    Daily,
    #[value(name = "M")]
    Monthly,
}

impl From<FrequencyArg> for Frequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Daily => Frequency::Daily,
            FrequencyArg::Monthly => Frequency::Monthly,
        }
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
