//! Backtesting engine.

use serde::{Deserialize, Serialize};
use ta_core::{
    Num, OpenTradePolicy, SeriesError, Strategy, TaResult, TimeSeries, TradeDirection,
    TradingRecord,
};

use crate::report::BacktestReport;

/// Backtest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Amount recorded on every order
    pub order_amount: Num,
    /// Direction of the trades entered
    pub direction: TradeDirection,
    /// How the report scores a trade still open at the end of the run
    pub open_trade_policy: OpenTradePolicy,
    /// First index to evaluate; the series' begin index when unset
    pub start_index: Option<usize>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            order_amount: Num::ONE,
            direction: TradeDirection::Long,
            open_trade_policy: OpenTradePolicy::Exclude,
            start_index: None,
        }
    }
}

/// Backtesting engine.
///
/// Walks a series index by index, asks the strategy whether to operate and
/// records an order priced at the tick's close whenever it says yes.
#[derive(Debug, Clone, Default)]
pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    /// Create a new backtest engine.
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run `strategy` over the series' window, starting at the configured
    /// start index.
    pub fn run(&self, series: &TimeSeries, strategy: &dyn Strategy) -> TaResult<TradingRecord> {
        let end = series.end_index().ok_or(SeriesError::IndexOutOfRange {
            index: series.begin_index(),
            begin: series.begin_index(),
            end: None,
        })?;
        let start = self.config.start_index.unwrap_or(series.begin_index());
        self.run_range(series, strategy, start, end)
    }

    /// Run `strategy` over `[start, end]`, both inside the series' window.
    pub fn run_range(
        &self,
        series: &TimeSeries,
        strategy: &dyn Strategy,
        start: usize,
        end: usize,
    ) -> TaResult<TradingRecord> {
        series.check_index(start)?;
        series.check_index(end)?;

        tracing::info!(
            strategy = strategy.name(),
            series = series.name(),
            start,
            end,
            "Starting backtest"
        );

        let mut record = TradingRecord::new(self.config.direction);
        for index in start..=end {
            if !strategy.should_operate(index, &record)? {
                continue;
            }
            let price = series.tick(index)?.close();
            let order = record.operate(index, price, self.config.order_amount)?;
            tracing::debug!(
                index,
                order_type = %order.order_type,
                price = %order.price,
                amount = %order.amount,
                "Order recorded"
            );
        }

        tracing::info!(
            strategy = strategy.name(),
            closed_trades = record.trade_count(),
            open = record.is_open(),
            "Backtest complete"
        );
        Ok(record)
    }

    /// Run `strategy` and score the resulting record.
    pub fn report(&self, series: &TimeSeries, strategy: &dyn Strategy) -> TaResult<BacktestReport> {
        let record = self.run(series, strategy)?;
        Ok(BacktestReport::build(
            strategy.name(),
            series,
            self.config.clone(),
            record,
        )?)
    }
}
