//! Technical-analysis backtesting CLI.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use ta_config::{load_config, LoggingConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A broken config still gets default logging so validate-config can report it
    let loaded = load_config(cli.config.as_deref());
    let configured = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_else(|_| LoggingConfig::default());
    let level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or(configured.level);
    let format = if cli.json_logs {
        "json".to_string()
    } else {
        configured.format
    };
    logging::setup_logging(&level, &format);

    match cli.command {
        Commands::Backtest(args) => {
            let config = loaded.context("Failed to load configuration")?;
            cli::commands::backtest::run(args, config)
        }
        Commands::Strategies => cli::commands::strategies::run(),
        Commands::ValidateConfig => cli::commands::validate::run(cli.config.as_deref(), loaded),
    }
}
