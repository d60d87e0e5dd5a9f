//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `TA__`-prefixed environment variables (`TA__BACKTEST__ORDER_AMOUNT=2`).

mod settings;

pub use settings::{AppConfig, AppSettings, LoggingConfig, StrategySettings};

pub use config::ConfigError;

use config::{Config, Environment, File};
use std::path::Path;

/// Prefix of the environment variables read by [`load_config`].
pub const ENV_PREFIX: &str = "TA";

/// Load configuration from an optional file and the environment.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    build(path, Environment::with_prefix(ENV_PREFIX))
}

fn build(path: Option<&Path>, environment: Environment) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }
    let config = builder
        .add_source(environment.separator("__").try_parsing(true))
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use ta_core::{Num, OpenTradePolicy, TradeDirection};

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn temp_toml(contents: &str, tag: &str) -> std::path::PathBuf {
        let file = format!("ta-config-{tag}-{}.toml", std::process::id());
        let path = std::env::temp_dir().join(file);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = build(None, env(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_file_then_environment() {
        let path = temp_toml(
            r#"
[app]
name = "research"

[backtest]
order_amount = "2.5"
direction = "short"
open_trade_policy = "close_at_last_price"

[strategy]
name = "ma_crossover"

[strategy.params]
fast_period = 5
slow_period = 20
use_ema = false
"#,
            "layered",
        );

        let config = build(Some(&path), env(&[("TA__BACKTEST__START_INDEX", "10")])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.app.name, "research");
        assert_eq!(config.backtest.order_amount, "2.5".parse::<Num>().unwrap());
        assert_eq!(config.backtest.direction, TradeDirection::Short);
        assert_eq!(config.backtest.open_trade_policy, OpenTradePolicy::CloseAtLastPrice);
        assert_eq!(config.backtest.start_index, Some(10));
        assert_eq!(config.strategy.name, "ma_crossover");
        assert_eq!(config.strategy.params["slow_period"], 20);
        assert_eq!(config.strategy.params["use_ema"], false);
    }

    #[test]
    fn test_environment_overrides_logging() {
        let config = build(None, env(&[("TA__LOGGING__LEVEL", "debug")])).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = Path::new("/definitely/not/here.toml");
        assert!(build(Some(path), env(&[])).is_err());
    }
}
