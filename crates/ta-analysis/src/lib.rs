//! Analysis of finished trading records.
//!
//! - [`CashFlow`]: the value multiplier of a record at every series index
//! - Criteria scoring a record: total profit, average profitable trades,
//!   reward/risk, buy-and-hold comparison, trade count, maximum drawdown
//! - [`choose_best`]: pick the best of several records under one criterion

mod cash_flow;
pub mod criteria;
mod selection;

pub use cash_flow::{CashFlow, CashFlowIter};
pub use criteria::{
    AverageProfitableTradesCriterion, BuyAndHoldCriterion, MaximumDrawdownCriterion,
    NumberOfTradesCriterion, RewardRiskRatioCriterion, TotalProfitCriterion,
    VersusBuyAndHoldCriterion,
};
pub use selection::choose_best;

use ta_core::{OpenTradePolicy, SeriesError, TimeSeries, Trade, TradingRecord};

/// Trades a criterion scores under `policy`: every closed trade, plus the
/// open trade closed at the last close when the policy asks for it.
///
/// Fails when an order lies outside the series' window.
pub fn scored_trades(
    series: &TimeSeries,
    record: &TradingRecord,
    policy: OpenTradePolicy,
) -> Result<Vec<Trade>, SeriesError> {
    for order in record.orders() {
        series.check_index(order.index)?;
    }

    let mut trades = record.trades().to_vec();
    if let (OpenTradePolicy::CloseAtLastPrice, Some(open)) = (policy, record.current_trade()) {
        let end = series.end_index().ok_or(SeriesError::IndexOutOfRange {
            index: open.entry().index,
            begin: series.begin_index(),
            end: None,
        })?;
        let last_close = series.tick(end)?.close();
        trades.push(open.closed_at(end, last_close));
    }
    Ok(trades)
}
