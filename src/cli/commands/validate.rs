//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use ta_config::{AppConfig, ConfigError};
use ta_strategies::StrategyRegistry;

pub fn run(config_path: Option<&Path>, loaded: Result<AppConfig, ConfigError>) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {:?}", path),
        None => println!("Validating configuration from defaults and environment"),
    }

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };
    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }
    if !StrategyRegistry::new().exists(&config.strategy.name) {
        anyhow::bail!("Unknown strategy '{}'", config.strategy.name);
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Strategy: {}", config.strategy.name);
    println!();
    print!("{}", config.to_toml()?);

    Ok(())
}
