//! CLI argument definitions for sigmascan.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Score every day of a series |
//! | `anomalies` | List flagged (day, metric) pairs |
//! | `summary` | Latest day, daily change and anomaly counts |
//! | `calendar` | Report gaps, duplicates and reversed dates |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings and errors as failures |
//! | `--threshold` | `1.5` | Flag days with `abs(z)` above this |
//! | `--window` | `7` | Trailing window length in days |
//! | `--input-format` | `market-chart` | Layout of the input file |
//!
//! Threshold and window fall back to `SIGMASCAN_THRESHOLD` and
//! `SIGMASCAN_WINDOW_SIZE` when the flags are absent.
//!
//! # Examples
//!
//! ```bash
//! sigmascan analyze bitcoin.json --pretty
//! sigmascan anomalies bitcoin.json --metric volume --threshold 2
//! sigmascan --input-format observations summary series.json --format table
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use sigmascan_core::{Metric, SourceFormat};

/// Rolling z-score anomaly detection for daily market series.
#[derive(Debug, Parser)]
#[command(name = "sigmascan", author, version, about)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Anomaly threshold on the absolute z-score (must be > 0).
    #[arg(long, global = true)]
    pub threshold: Option<f64>,

    /// Trailing window length in days, current day included (must be >= 1).
    #[arg(long, global = true)]
    pub window: Option<usize>,

    /// Layout of the input file.
    #[arg(long, global = true, value_enum, default_value_t = InputFormat::MarketChart)]
    pub input_format: InputFormat,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Metadata line followed by one JSON object per data row.
    Ndjson,
}

/// Input file layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// JSON array of `{date, price, market_cap, volume}` objects.
    Observations,
    /// Provider payload with `prices`, `market_caps` and `total_volumes`.
    MarketChart,
}

impl From<InputFormat> for SourceFormat {
    fn from(value: InputFormat) -> Self {
        match value {
            InputFormat::Observations => SourceFormat::Observations,
            InputFormat::MarketChart => SourceFormat::MarketChart,
        }
    }
}

/// Metric filter for the `anomalies` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricSelector {
    Price,
    MarketCap,
    Volume,
}

impl From<MetricSelector> for Metric {
    fn from(value: MetricSelector) -> Self {
        match value {
            MetricSelector::Price => Metric::Price,
            MetricSelector::MarketCap => Metric::MarketCap,
            MetricSelector::Volume => Metric::Volume,
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score every day of a series.
    ///
    ///   sigmascan analyze bitcoin.json
    Analyze(InputArgs),

    /// List flagged (day, metric) pairs.
    ///
    ///   sigmascan anomalies bitcoin.json --metric price
    Anomalies(AnomaliesArgs),

    /// Summarize the latest day and anomaly counts.
    Summary(InputArgs),

    /// Report calendar gaps, duplicate dates and reversed dates.
    Calendar(InputArgs),
}

impl Command {
    pub fn input(&self) -> &InputArgs {
        match self {
            Self::Analyze(args) | Self::Summary(args) | Self::Calendar(args) => args,
            Self::Anomalies(args) => &args.input,
        }
    }
}

/// Input file shared by every command.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Path to the series file.
    pub path: PathBuf,
}

/// Arguments for the `anomalies` command.
#[derive(Debug, Args)]
pub struct AnomaliesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only list anomalies of this metric.
    #[arg(long, value_enum)]
    pub metric: Option<MetricSelector>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sigmascan",
            "anomalies",
            "series.json",
            "--metric",
            "market-cap",
            "--threshold",
            "2.5",
            "--input-format",
            "observations",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.threshold, Some(2.5));
        assert_eq!(cli.window, None);
        assert_eq!(cli.input_format, InputFormat::Observations);
        match cli.command {
            Command::Anomalies(args) => {
                assert_eq!(args.metric, Some(MetricSelector::MarketCap));
                assert_eq!(args.input.path, PathBuf::from("series.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn counts_verbosity() {
        let cli = Cli::try_parse_from(["sigmascan", "-vv", "summary", "series.json"])
            .expect("arguments should parse");
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
