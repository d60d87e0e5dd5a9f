//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ta-engine")]
#[command(author, version, about = "Technical-analysis strategy backtesting engine")]
pub struct Cli {
    /// Configuration file path (TOML); `TA__*` variables apply on top
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level, overriding the configuration
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a strategy over a CSV series and score it
    Backtest(BacktestArgs),
    /// List available strategies
    Strategies,
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Headered `date,open,high,low,close,volume`
    Csv,
    /// MetaTrader 4 history export
    Mt4,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Data file (CSV)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Strategy to backtest; defaults to `strategy.name` from the configuration
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Strategy parameters as a JSON object; defaults to `strategy.params`
    #[arg(short, long)]
    pub params: Option<String>,

    /// Layout of the data file
    #[arg(long, value_enum, default_value = "csv")]
    pub input_format: InputFormat,

    /// Tick period in minutes
    #[arg(long, default_value = "1440")]
    pub period_minutes: i64,

    /// First index to evaluate
    #[arg(long)]
    pub start_index: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Save the JSON report to a file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Save the cash flow to a CSV file
    #[arg(long)]
    pub cash_flow: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_backtest() {
        let cli = Cli::try_parse_from([
            "ta-engine",
            "--log-level",
            "debug",
            "backtest",
            "--data",
            "eurusd.csv",
            "--strategy",
            "momentum",
            "--params",
            r#"{"signal_period": 5}"#,
            "--output",
            "json",
        ])
        .unwrap();

        assert!(matches!(cli.log_level, Some(LogLevel::Debug)));
        match cli.command {
            Commands::Backtest(args) => {
                assert_eq!(args.data, PathBuf::from("eurusd.csv"));
                assert_eq!(args.strategy.as_deref(), Some("momentum"));
                assert!(args.output == OutputFormat::Json);
                assert!(args.input_format == InputFormat::Csv);
                assert_eq!(args.period_minutes, 1440);
            }
            _ => panic!("expected backtest"),
        }
    }
}
