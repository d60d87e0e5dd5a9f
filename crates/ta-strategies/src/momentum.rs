//! Momentum Strategy built on MACD.
//!
//! Enters when the MACD line crosses above its signal line, optionally
//! confirmed by positive acceleration, and exits on the opposite cross.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use ta_core::{Num, SharedIndicator, StrategyConfig, StrategyError, TimeSeries};
use ta_indicators::{AccelerationDeceleration, ClosePrice, Macd};
use ta_rules::{CrossedDownIndicatorRule, CrossedUpIndicatorRule, OverIndicatorRule, RuleExt};

use crate::RuleStrategy;

/// Configuration for the Momentum strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Fast EMA period of the MACD line
    pub fast_ema_period: usize,
    /// Slow EMA period of the MACD line
    pub slow_ema_period: usize,
    /// EMA period of the signal line
    pub signal_period: usize,
    /// Require acceleration/deceleration above zero on entry
    pub require_acceleration: bool,
    /// Leading indices without operations
    pub unstable_period: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            fast_ema_period: 12,
            slow_ema_period: 26,
            signal_period: 9,
            require_acceleration: false,
            unstable_period: 26,
        }
    }
}

impl StrategyConfig for MomentumConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.fast_ema_period == 0 || self.signal_period == 0 {
            return Err(StrategyError::InvalidConfig(
                "EMA periods must be greater than 0".into(),
            ));
        }
        if self.fast_ema_period >= self.slow_ema_period {
            return Err(StrategyError::InvalidConfig(
                "Fast EMA period must be less than slow EMA period".into(),
            ));
        }
        Ok(())
    }
}

/// Build the momentum strategy over `series`.
pub fn momentum(
    series: Rc<TimeSeries>,
    config: &MomentumConfig,
) -> Result<RuleStrategy, StrategyError> {
    config.validate()?;
    let close: SharedIndicator = Rc::new(ClosePrice::new(series.clone()));
    let macd = Rc::new(Macd::new(close, config.fast_ema_period, config.slow_ema_period)?);
    let signal: SharedIndicator = Rc::new(macd.signal(config.signal_period)?);
    let line: SharedIndicator = macd;

    let cross_up = CrossedUpIndicatorRule::new(line.clone(), signal.clone());
    let entry = if config.require_acceleration {
        let acceleration: SharedIndicator = Rc::new(AccelerationDeceleration::from_series(series)?);
        cross_up
            .and(OverIndicatorRule::over_threshold(acceleration, Num::ZERO))
            .boxed()
    } else {
        cross_up.boxed()
    };
    let exit = CrossedDownIndicatorRule::new(line, signal);

    Ok(RuleStrategy::new("Momentum", entry, exit)
        .with_description("Follows MACD signal-line crossings")
        .with_unstable_period(config.unstable_period))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::series_of;
    use ta_core::{Strategy, TradingRecord};

    #[test]
    fn test_config_validation() {
        assert!(MomentumConfig::default().validate().is_ok());
        let bad = MomentumConfig {
            fast_ema_period: 26,
            slow_ema_period: 12,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_enters_on_turnaround() {
        let config = MomentumConfig {
            fast_ema_period: 2,
            slow_ema_period: 4,
            signal_period: 2,
            require_acceleration: false,
            unstable_period: 0,
        };
        let closes = [20, 19, 18, 17, 16, 15, 18, 22, 26];
        let strategy = momentum(series_of(&closes), &config).unwrap();
        let flat = TradingRecord::default();

        let entries: Vec<usize> = (0..closes.len())
            .filter(|&i| strategy.should_enter(i, Some(&flat)).unwrap())
            .collect();
        assert_eq!(entries.first(), Some(&6));
    }
}
