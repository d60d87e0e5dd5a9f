//! Stop rules.
//!
//! Both read the entry price of the open trade from the trading record and
//! compare the current price against a percentage band around it. Without
//! a record, or while flat, they are never satisfied.

use ta_core::{IndicatorError, Num, Rule, SharedIndicator, TradeDirection, TradingRecord};

use crate::trace_is_satisfied;

/// Open trade's direction and entry price, if any.
fn open_entry(record: Option<&TradingRecord>) -> Option<(TradeDirection, Num)> {
    let trade = record?.current_trade()?;
    Some((trade.direction(), trade.entry().price))
}

/// `entry · (100 − pct) / 100` and `entry · (100 + pct) / 100`.
fn band(entry: Num, percent: Num) -> (Num, Num) {
    let below = entry * (Num::HUNDRED - percent) / Num::HUNDRED;
    let above = entry * (Num::HUNDRED + percent) / Num::HUNDRED;
    (below, above)
}

/// Satisfied once the price has moved `loss_percent` against the open trade:
/// at or below `entry · (100 − pct) / 100` for a long trade, at or above
/// `entry · (100 + pct) / 100` for a short one.
#[derive(Debug)]
pub struct StopLossRule {
    price: SharedIndicator,
    loss_percent: Num,
}

impl StopLossRule {
    pub fn new(price: SharedIndicator, loss_percent: Num) -> Self {
        Self { price, loss_percent }
    }
}

impl Rule for StopLossRule {
    fn is_satisfied(
        &self,
        index: usize,
        record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        let satisfied = match open_entry(record) {
            Some((direction, entry)) => {
                let price = self.price.value(index)?;
                let (below, above) = band(entry, self.loss_percent);
                match direction {
                    TradeDirection::Long => price.is_less_than_or_equal(below),
                    TradeDirection::Short => price.is_greater_than_or_equal(above),
                }
            }
            None => false,
        };
        Ok(trace_is_satisfied("StopLossRule", index, satisfied))
    }

    fn name(&self) -> String {
        format!("StopLoss({}, {}%)", self.price.name(), self.loss_percent)
    }
}

/// Satisfied once the price has moved `gain_percent` in favour of the open
/// trade: at or above `entry · (100 + pct) / 100` long, at or below
/// `entry · (100 − pct) / 100` short.
#[derive(Debug)]
pub struct StopGainRule {
    price: SharedIndicator,
    gain_percent: Num,
}

impl StopGainRule {
    pub fn new(price: SharedIndicator, gain_percent: Num) -> Self {
        Self { price, gain_percent }
    }
}

impl Rule for StopGainRule {
    fn is_satisfied(
        &self,
        index: usize,
        record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        let satisfied = match open_entry(record) {
            Some((direction, entry)) => {
                let price = self.price.value(index)?;
                let (below, above) = band(entry, self.gain_percent);
                match direction {
                    TradeDirection::Long => price.is_greater_than_or_equal(above),
                    TradeDirection::Short => price.is_less_than_or_equal(below),
                }
            }
            None => false,
        };
        Ok(trace_is_satisfied("StopGainRule", index, satisfied))
    }

    fn name(&self) -> String {
        format!("StopGain({}, {}%)", self.price.name(), self.gain_percent)
    }
}
