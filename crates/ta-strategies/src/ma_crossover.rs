//! Moving Average Crossover Strategy.
//!
//! Enters when the fast MA crosses above the slow MA and exits when it
//! crosses back below.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use ta_core::{SharedIndicator, StrategyConfig, StrategyError, TimeSeries};
use ta_indicators::{ClosePrice, Ema, Sma};
use ta_rules::{CrossedDownIndicatorRule, CrossedUpIndicatorRule};

use crate::RuleStrategy;

/// Configuration for the MA Crossover strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MACrossoverConfig {
    /// Fast moving average period (1 tracks the close itself)
    pub fast_period: usize,
    /// Slow moving average period
    pub slow_period: usize,
    /// Use EMA instead of SMA
    pub use_ema: bool,
    /// Leading indices without operations
    pub unstable_period: usize,
}

impl Default for MACrossoverConfig {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            use_ema: true,
            unstable_period: 0,
        }
    }
}

impl StrategyConfig for MACrossoverConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.fast_period >= self.slow_period {
            return Err(StrategyError::InvalidConfig(
                "Fast period must be less than slow period".into(),
            ));
        }
        if self.fast_period == 0 {
            return Err(StrategyError::InvalidConfig(
                "Fast period must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

fn moving_average(
    close: &SharedIndicator,
    period: usize,
    use_ema: bool,
) -> Result<SharedIndicator, StrategyError> {
    if period == 1 {
        return Ok(close.clone());
    }
    Ok(if use_ema {
        Rc::new(Ema::new(close.clone(), period)?)
    } else {
        Rc::new(Sma::new(close.clone(), period)?)
    })
}

/// Build the crossover strategy over `series`.
pub fn ma_crossover(
    series: Rc<TimeSeries>,
    config: &MACrossoverConfig,
) -> Result<RuleStrategy, StrategyError> {
    config.validate()?;
    let close: SharedIndicator = Rc::new(ClosePrice::new(series));
    let fast = moving_average(&close, config.fast_period, config.use_ema)?;
    let slow = moving_average(&close, config.slow_period, config.use_ema)?;

    let entry = CrossedUpIndicatorRule::new(fast.clone(), slow.clone());
    let exit = CrossedDownIndicatorRule::new(fast, slow);
    Ok(RuleStrategy::new("MA Crossover", entry, exit)
        .with_description("Enters on fast/slow moving average cross-ups, exits on cross-downs")
        .with_unstable_period(config.unstable_period))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::series_of;
    use ta_core::{Strategy, TradingRecord};

    #[test]
    fn test_config_validation() {
        assert!(MACrossoverConfig::default().validate().is_ok());

        let inverted = MACrossoverConfig {
            fast_period: 30,
            slow_period: 5,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let zero = MACrossoverConfig {
            fast_period: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_close_over_sma_signals() {
        let config = MACrossoverConfig {
            fast_period: 1,
            slow_period: 2,
            use_ema: false,
            unstable_period: 0,
        };
        let strategy = ma_crossover(series_of(&[10, 11, 9, 12, 8, 13]), &config).unwrap();

        let flat = TradingRecord::default();
        let entries: Vec<usize> = (0..6)
            .filter(|&i| strategy.should_enter(i, Some(&flat)).unwrap())
            .collect();
        let exits: Vec<usize> = (0..6)
            .filter(|&i| strategy.should_exit(i, Some(&flat)).unwrap())
            .collect();
        assert_eq!(entries, vec![1, 3, 5]);
        assert_eq!(exits, vec![2, 4]);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: MACrossoverConfig =
            serde_json::from_value(serde_json::json!({ "fast_period": 5 })).unwrap();
        assert_eq!(config.fast_period, 5);
        assert_eq!(config.slow_period, 26);
        assert!(config.use_ema);
    }
}
