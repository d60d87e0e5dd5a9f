//! Strategy registry for building named strategy presets.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use ta_core::{StrategyError, TimeSeries};

use crate::{
    buy_and_hold, ma_crossover, mean_reversion, momentum, sma_stops, MACrossoverConfig,
    MeanReversionConfig, MomentumConfig, RuleStrategy, SmaStopsConfig,
};

/// Information about a registered strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Registry key
    pub key: String,
    /// Strategy name
    pub name: String,
    /// Strategy description
    pub description: String,
    /// Default configuration as JSON
    pub default_config: serde_json::Value,
}

/// Registry for available trading strategies.
pub struct StrategyRegistry {
    strategies: BTreeMap<String, StrategyInfo>,
}

fn info<C: Serialize>(key: &str, name: &str, description: &str, config: C) -> StrategyInfo {
    StrategyInfo {
        key: key.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        default_config: serde_json::to_value(config).unwrap_or_default(),
    }
}

/// Parse preset parameters; `null` means all defaults.
fn parse<C: DeserializeOwned + Default>(params: serde_json::Value) -> Result<C, StrategyError> {
    if params.is_null() {
        return Ok(C::default());
    }
    serde_json::from_value(params).map_err(|e| StrategyError::InvalidConfig(e.to_string()))
}

impl StrategyRegistry {
    /// Create a new strategy registry with all built-in strategies.
    pub fn new() -> Self {
        let entries = [
            info(
                "ma_crossover",
                "MA Crossover",
                "Enters on fast/slow moving average cross-ups, exits on cross-downs",
                MACrossoverConfig::default(),
            ),
            info(
                "mean_reversion",
                "Mean Reversion",
                "Buys dips through the lower Bollinger band, sells the reversion to the mean",
                MeanReversionConfig::default(),
            ),
            info(
                "momentum",
                "Momentum",
                "Follows MACD signal-line crossings",
                MomentumConfig::default(),
            ),
            info(
                "sma_stops",
                "SMA Stops",
                "Short/long SMA crossover with stop-loss and stop-gain exits",
                SmaStopsConfig::default(),
            ),
            info(
                "buy_and_hold",
                "Buy And Hold",
                "Enters once and never exits; score with close_at_last_price",
                serde_json::Value::Null,
            ),
        ];

        Self {
            strategies: entries.into_iter().map(|i| (i.key.clone(), i)).collect(),
        }
    }

    /// List all available strategies, ordered by key.
    pub fn list(&self) -> Vec<&StrategyInfo> {
        self.strategies.values().collect()
    }

    /// Get strategy info by name.
    pub fn get(&self, name: &str) -> Option<&StrategyInfo> {
        self.strategies.get(name)
    }

    /// Check if a strategy exists.
    pub fn exists(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Get all strategy names.
    pub fn names(&self) -> Vec<&String> {
        self.strategies.keys().collect()
    }

    /// Build a strategy over `series` from its JSON parameters. Missing
    /// fields take their default values.
    pub fn create(
        &self,
        name: &str,
        params: serde_json::Value,
        series: Rc<TimeSeries>,
    ) -> Result<RuleStrategy, StrategyError> {
        tracing::debug!(strategy = name, %params, series = series.name(), "Creating strategy");
        match name {
            "ma_crossover" => ma_crossover(series, &parse(params)?),
            "mean_reversion" => mean_reversion(series, &parse(params)?),
            "momentum" => momentum(series, &parse(params)?),
            "sma_stops" => sma_stops(series, &parse(params)?),
            "buy_and_hold" => Ok(buy_and_hold()),
            _ => Err(StrategyError::NotFound(name.to_string())),
        }
    }

    /// Create a strategy with default configuration.
    pub fn create_default(
        &self,
        name: &str,
        series: Rc<TimeSeries>,
    ) -> Result<RuleStrategy, StrategyError> {
        self.create(name, serde_json::Value::Null, series)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::series_of;
    use ta_core::Strategy;

    #[test]
    fn test_registry_list() {
        let registry = StrategyRegistry::new();
        let keys: Vec<&str> = registry.list().iter().map(|i| i.key.as_str()).collect();

        assert_eq!(
            keys,
            vec!["buy_and_hold", "ma_crossover", "mean_reversion", "momentum", "sma_stops"]
        );
    }

    #[test]
    fn test_registry_get() {
        let registry = StrategyRegistry::new();

        assert!(registry.get("ma_crossover").is_some());
        assert!(registry.exists("momentum"));
        assert!(registry.get("unknown").is_none());
        assert_eq!(
            registry.get("ma_crossover").unwrap().default_config["slow_period"],
            26
        );
    }

    #[test]
    fn test_create_default() {
        let registry = StrategyRegistry::new();
        let strategy = registry.create_default("ma_crossover", series_of(&[1, 2, 3])).unwrap();
        assert_eq!(strategy.name(), "MA Crossover");
    }

    #[test]
    fn test_create_with_config() {
        let registry = StrategyRegistry::new();
        let config = serde_json::json!({
            "fast_period": 5,
            "slow_period": 10,
            "use_ema": false
        });

        let strategy = registry.create("ma_crossover", config, series_of(&[1, 2, 3]));
        assert!(strategy.is_ok());
    }

    #[test]
    fn test_create_rejects_bad_config() {
        let registry = StrategyRegistry::new();
        let config = serde_json::json!({ "fast_period": 10, "slow_period": 5 });
        assert!(matches!(
            registry.create("ma_crossover", config, series_of(&[1])),
            Err(StrategyError::InvalidConfig(_))
        ));

        let typo = serde_json::json!({ "fast_period": "ten" });
        assert!(registry.create("ma_crossover", typo, series_of(&[1])).is_err());
    }

    #[test]
    fn test_create_unknown_strategy() {
        let registry = StrategyRegistry::new();

        let result = registry.create_default("unknown", series_of(&[1]));
        assert!(matches!(result, Err(StrategyError::NotFound(_))));
    }
}
