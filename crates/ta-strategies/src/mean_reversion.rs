//! Mean Reversion Strategy using Bollinger Bands.
//!
//! Enters when %B drops below the entry threshold (price pushed through the
//! lower band) and exits once the close is back inside the upper half of
//! the bands, or on a stop loss.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use ta_core::{Num, SharedIndicator, StrategyConfig, StrategyError, TimeSeries};
use ta_indicators::{BollingerBands, ClosePrice};
use ta_rules::{CrossedDownIndicatorRule, InPipeRule, RuleExt, StopLossRule};

use crate::RuleStrategy;

/// Configuration for the Mean Reversion strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeanReversionConfig {
    /// Bollinger Bands period
    pub bb_period: usize,
    /// Bollinger Bands standard deviation multiplier
    pub bb_std_dev: Num,
    /// %B level the price must cross below to enter (0 = lower band)
    pub entry_threshold: Num,
    /// Optional stop loss, in percent of the entry price
    pub stop_loss_percent: Option<Num>,
    /// Leading indices without operations
    pub unstable_period: usize,
}

impl Default for MeanReversionConfig {
    fn default() -> Self {
        Self {
            bb_period: 20,
            bb_std_dev: Num::TWO,
            entry_threshold: Num::ZERO,
            stop_loss_percent: Some(Num::from(5)),
            unstable_period: 20,
        }
    }
}

impl StrategyConfig for MeanReversionConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.bb_period < 2 {
            return Err(StrategyError::InvalidConfig(
                "BB period must be at least 2".into(),
            ));
        }
        if !self.bb_std_dev.is_positive() {
            return Err(StrategyError::InvalidConfig(
                "BB std dev must be positive".into(),
            ));
        }
        if self.entry_threshold.is_nan()
            || self.entry_threshold.is_greater_than(Num::ONE / Num::TWO)
        {
            return Err(StrategyError::InvalidConfig(
                "Entry threshold must be at most 0.5".into(),
            ));
        }
        if let Some(stop) = self.stop_loss_percent {
            if !stop.is_positive() || stop.is_greater_than_or_equal(Num::HUNDRED) {
                return Err(StrategyError::InvalidConfig(
                    "Stop loss percent must be between 0 and 100".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Build the mean reversion strategy over `series`.
pub fn mean_reversion(
    series: Rc<TimeSeries>,
    config: &MeanReversionConfig,
) -> Result<RuleStrategy, StrategyError> {
    config.validate()?;
    let close: SharedIndicator = Rc::new(ClosePrice::new(series));
    let bands = BollingerBands::new(close.clone(), config.bb_period, config.bb_std_dev)?;

    let entry =
        CrossedDownIndicatorRule::under_threshold(bands.percent_b(), config.entry_threshold);
    let reverted = InPipeRule::new(close.clone(), bands.upper(), bands.middle());
    let exit = match config.stop_loss_percent {
        Some(percent) => reverted.or(StopLossRule::new(close, percent)).boxed(),
        None => reverted.boxed(),
    };

    Ok(RuleStrategy::new("Mean Reversion", entry, exit)
        .with_description(
            "Buys dips through the lower Bollinger band, sells the reversion to the mean",
        )
        .with_unstable_period(config.unstable_period))
}
