//! CLI argument parsing using clap

use crate::config::{CONFIG_FILE_NAME, ColorOption, OutputFormat as ConfigOutputFormat};
use crate::types::EvaluationMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for fieldrules commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

impl From<ConfigOutputFormat> for OutputFormat {
    fn from(format: ConfigOutputFormat) -> Self {
        match format {
            ConfigOutputFormat::Human => OutputFormat::Human,
            ConfigOutputFormat::Jsonl => OutputFormat::Jsonl,
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

impl From<ColorOption> for ColorChoice {
    fn from(option: ColorOption) -> Self {
        match option {
            ColorOption::Auto => ColorChoice::Auto,
            ColorOption::Always => ColorChoice::Always,
            ColorOption::Never => ColorChoice::Never,
        }
    }
}

/// Evaluation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Stop at the first failing rule
    FailFast,
    /// Report every failing rule
    CollectAll,
}

impl From<Mode> for EvaluationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::FailFast => EvaluationMode::FailFast,
            Mode::CollectAll => EvaluationMode::CollectAll,
        }
    }
}

/// Fieldrules CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "fieldrules")]
#[command(about = "Validate form field values against ordered rule tables")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Output coloring (overrides the configuration file)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,
}

/// Available fieldrules subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one value against a field category
    Check {
        /// Field category, e.g. EMAIL
        category: String,

        /// Value to validate
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Evaluation mode (defaults to the configuration file)
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Field property used by message templates, as name=value
        #[arg(long = "prop", value_name = "NAME=VALUE", value_parser = parse_key_value)]
        props: Vec<(String, String)>,

        /// Field data attribute used by message templates, as name=value
        #[arg(long = "data", value_name = "NAME=VALUE", value_parser = parse_key_value)]
        data: Vec<(String, String)>,

        /// Output format (defaults to the configuration file)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Validate JSONL field records from a file, or stdin with "-"
    Batch {
        /// Input file of JSON records, one per line
        input: String,

        /// Evaluation mode for records that do not set one
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Output format (defaults to the configuration file)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// List field categories and their rules
    List {
        /// Output format (defaults to the configuration file)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Write a starter fieldrules.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Parse a `name=value` pair; the value may itself contain `=`
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    if name.is_empty() {
        return Err(format!("empty name in '{}'", s));
    }
    Ok((name.to_string(), value.to_string()))
}
