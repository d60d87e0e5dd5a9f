//! Strategy trait definitions.

use crate::error::{IndicatorError, StrategyError};
use crate::types::TradingRecord;

/// Configuration trait for strategy presets.
pub trait StrategyConfig: Clone + 'static {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), StrategyError>;
}

/// Core strategy trait.
///
/// A strategy answers, for one series index, whether the run should enter
/// a trade or exit the open one. It never records orders itself; the
/// backtest engine does that from the answers it gets.
pub trait Strategy {
    /// Get the unique name of this strategy.
    fn name(&self) -> &str;

    /// Whether a new trade should be entered at `index`.
    fn should_enter(
        &self,
        index: usize,
        record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError>;

    /// Whether the open trade should be exited at `index`.
    fn should_exit(
        &self,
        index: usize,
        record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError>;

    /// Number of leading indices during which no operation is signalled.
    fn unstable_period(&self) -> usize {
        0
    }

    fn is_unstable_at(&self, index: usize) -> bool {
        index < self.unstable_period()
    }

    /// Whether an order should be recorded at `index`: an entry while the
    /// record is flat, an exit while a trade is open.
    fn should_operate(&self, index: usize, record: &TradingRecord) -> Result<bool, IndicatorError> {
        if self.is_unstable_at(index) {
            return Ok(false);
        }
        if record.is_open() {
            self.should_exit(index, Some(record))
        } else {
            self.should_enter(index, Some(record))
        }
    }

    /// Get a description of the strategy.
    fn description(&self) -> &str {
        ""
    }
}
