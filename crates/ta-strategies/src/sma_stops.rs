//! Short/long SMA crossover with a price floor entry and stop exits.
//!
//! Enters when the short SMA crosses above the long SMA, or when the close
//! falls through a buy-below price. Exits when the short SMA crosses below
//! the long SMA, or on a stop loss, or on a stop gain.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use ta_core::{Num, SharedIndicator, StrategyConfig, StrategyError, TimeSeries};
use ta_indicators::{ClosePrice, Sma};
use ta_rules::{
    CrossedDownIndicatorRule, CrossedUpIndicatorRule, RuleExt, StopGainRule, StopLossRule,
};

use crate::RuleStrategy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmaStopsConfig {
    pub short_period: usize,
    pub long_period: usize,
    /// Also enter when the close crosses below this price
    pub buy_below: Option<Num>,
    pub stop_loss_percent: Num,
    pub stop_gain_percent: Num,
    pub unstable_period: usize,
}

impl Default for SmaStopsConfig {
    fn default() -> Self {
        Self {
            short_period: 5,
            long_period: 30,
            buy_below: None,
            stop_loss_percent: Num::from(3),
            stop_gain_percent: Num::from(2),
            unstable_period: 0,
        }
    }
}

impl StrategyConfig for SmaStopsConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.short_period == 0 || self.short_period >= self.long_period {
            return Err(StrategyError::InvalidConfig(
                "Short period must be positive and less than long period".into(),
            ));
        }
        for (label, percent) in [
            ("Stop loss", self.stop_loss_percent),
            ("Stop gain", self.stop_gain_percent),
        ] {
            if !percent.is_positive() {
                return Err(StrategyError::InvalidConfig(format!(
                    "{label} percent must be positive"
                )));
            }
        }
        Ok(())
    }
}

/// Build the SMA crossover with stops over `series`.
pub fn sma_stops(
    series: Rc<TimeSeries>,
    config: &SmaStopsConfig,
) -> Result<RuleStrategy, StrategyError> {
    config.validate()?;
    let close: SharedIndicator = Rc::new(ClosePrice::new(series));
    let short: SharedIndicator = Rc::new(Sma::new(close.clone(), config.short_period)?);
    let long: SharedIndicator = Rc::new(Sma::new(close.clone(), config.long_period)?);

    let crossed_up = CrossedUpIndicatorRule::new(short.clone(), long.clone());
    let entry = match config.buy_below {
        Some(floor) => crossed_up
            .or(CrossedDownIndicatorRule::under_threshold(close.clone(), floor))
            .boxed(),
        None => crossed_up.boxed(),
    };
    let exit = CrossedDownIndicatorRule::new(short, long)
        .or(StopLossRule::new(close.clone(), config.stop_loss_percent))
        .or(StopGainRule::new(close, config.stop_gain_percent));

    Ok(RuleStrategy::new("SMA Stops", entry, exit)
        .with_description("Short/long SMA crossover with stop-loss and stop-gain exits")
        .with_unstable_period(config.unstable_period))
}
