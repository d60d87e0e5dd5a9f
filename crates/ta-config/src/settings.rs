//! Configuration structures.

use serde::{Deserialize, Serialize};
use ta_backtest::BacktestConfig;
use ta_core::TaError;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub backtest: BacktestConfig,
    #[serde(default)]
    pub strategy: StrategySettings,
}

impl AppConfig {
    /// Check values the type system does not.
    pub fn validate(&self) -> Result<(), TaError> {
        self.logging.validate()?;
        if !self.backtest.order_amount.is_positive() {
            return Err(TaError::Config(format!(
                "backtest.order_amount must be positive, got {}",
                self.backtest.order_amount
            )));
        }
        if self.strategy.name.trim().is_empty() {
            return Err(TaError::Config("strategy.name must not be empty".to_string()));
        }
        if !(self.strategy.params.is_null() || self.strategy.params.is_object()) {
            return Err(TaError::Config("strategy.params must be a table".to_string()));
        }
        Ok(())
    }

    /// Render as TOML, e.g. to print the effective configuration.
    pub fn to_toml(&self) -> Result<String, TaError> {
        toml::to_string_pretty(self).map_err(|e| TaError::Config(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "ta-engine".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`
    pub level: String,
    /// `pretty`, `compact` or `json`
    pub format: String,
}

impl LoggingConfig {
    pub const LEVELS: [&'static str; 5] = ["trace", "debug", "info", "warn", "error"];
    pub const FORMATS: [&'static str; 3] = ["pretty", "compact", "json"];

    fn validate(&self) -> Result<(), TaError> {
        if !Self::LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            return Err(TaError::Config(format!("unknown logging.level {:?}", self.level)));
        }
        if !Self::FORMATS.contains(&self.format.as_str()) {
            return Err(TaError::Config(format!("unknown logging.format {:?}", self.format)));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Strategy to run and its preset parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategySettings {
    /// Registry key, e.g. `ma_crossover`
    pub name: String,
    /// Preset parameters; missing fields take their defaults
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            name: "ma_crossover".to_string(),
            params: serde_json::Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta_core::Num;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = AppConfig::default();
        config.backtest.order_amount = Num::ZERO;
        assert!(matches!(config.validate(), Err(TaError::Config(_))));

        let mut config = AppConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.strategy.params = serde_json::json!([1, 2]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_toml() {
        let mut config = AppConfig::default();
        config.strategy.params = serde_json::json!({"fast_period": 3});
        let text = config.to_toml().unwrap();
        assert!(text.contains("[backtest]"));
        assert!(text.contains("order_amount = \"1\""));
        assert!(text.contains("fast_period = 3"));

        assert!(AppConfig::default().to_toml().is_ok());
    }
}
