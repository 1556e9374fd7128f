//! CLI argument definitions for the model comparison tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "model-comparison",
    version,
    about = "Normalize capacity-expansion model outputs for side-by-side comparison",
    long_about = "Normalize capacity-expansion model outputs for side-by-side comparison.\n\n\
                  Classifies resources by technology, aggregates zones into regions,\n\
                  unifies transmission line names, and derives additions and capacity\n\
                  factors. Also expands representative-period inputs to a full year."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Load every model's reports under a root and write normalized tables.
    Normalize(NormalizeArgs),

    /// Expand representative-period inputs to full-year series.
    Expand(ExpandArgs),

    /// List the technology classification rules in priority order.
    TechRules(ConfigArgs),

    /// List aggregate regions and their zones.
    Regions(ConfigArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// TOML file overriding the built-in rule and region tables.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Root directory holding the per-model report folders.
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Output directory for normalized tables (default: <ROOT>/normalized).
    /// Files below it are never read as input.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Load and normalize without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ExpandArgs {
    /// Root directory searched for Period_map.csv files.
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Rewrite full-year outputs that already exist.
    #[arg(long = "overwrite")]
    pub overwrite: bool,
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
