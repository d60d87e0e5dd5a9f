//! Backtest command implementation.

use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::Duration;
use ta_backtest::BacktestEngine;
use ta_config::AppConfig;
use ta_data::{CsvFormat, CsvTickLoader};
use ta_strategies::StrategyRegistry;
use tracing::info;

use crate::cli::{BacktestArgs, InputFormat, OutputFormat};

pub fn run(args: BacktestArgs, config: AppConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let name = args.strategy.unwrap_or(config.strategy.name);
    let params = match &args.params {
        Some(text) => serde_json::from_str(text).context("--params is not valid JSON")?,
        None => config.strategy.params,
    };

    // Load data
    if !args.data.exists() {
        anyhow::bail!("Data file '{}' does not exist", args.data.display());
    }
    let format = match args.input_format {
        InputFormat::Csv => CsvFormat::Headered,
        InputFormat::Mt4 => CsvFormat::Mt4,
    };
    let series = CsvTickLoader::new(&args.data)?
        .with_format(format)
        .with_time_period(Duration::minutes(args.period_minutes))
        .load()
        .with_context(|| format!("Failed to load {}", args.data.display()))?;
    let series = Rc::new(series);

    // Create strategy
    let registry = StrategyRegistry::new();
    let strategy = registry
        .create(&name, params, series.clone())
        .with_context(|| format!("Failed to create strategy '{name}'"))?;

    let mut backtest = config.backtest;
    if args.start_index.is_some() {
        backtest.start_index = args.start_index;
    }

    // Run backtest
    info!("Starting backtest for strategy: {}", name);
    let report = BacktestEngine::new(backtest).report(&series, &strategy)?;

    // Output results
    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        std::fs::write(save_path, report.to_json()?)?;
        info!("Results saved to {:?}", save_path);
    }
    if let Some(path) = &args.cash_flow {
        std::fs::write(path, report.cash_flow_to_csv())?;
        info!("Cash flow saved to {:?}", path);
    }

    Ok(())
}
