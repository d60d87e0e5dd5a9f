//! Profit-based criteria.

use ta_core::{
    AnalysisCriterion, AnalysisError, Num, OpenTradePolicy, SeriesError, TimeSeries, Trade,
    TradingRecord,
};

use super::versus::buy_and_hold_record;
use crate::scored_trades;

fn profit_ratios(
    series: &TimeSeries,
    record: &TradingRecord,
    policy: OpenTradePolicy,
) -> Result<Vec<Num>, SeriesError> {
    Ok(scored_trades(series, record, policy)?
        .iter()
        .filter_map(Trade::profit_ratio)
        .collect())
}

/// Product of the profit ratios of all scored trades; 1 without trades.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalProfitCriterion {
    pub(super) policy: OpenTradePolicy,
}

impl AnalysisCriterion for TotalProfitCriterion {
    fn name(&self) -> String {
        "Total Profit".to_string()
    }

    fn calculate(
        &self,
        series: &TimeSeries,
        record: &TradingRecord,
    ) -> Result<Num, AnalysisError> {
        Ok(profit_ratios(series, record, self.policy)?
            .into_iter()
            .fold(Num::ONE, |acc, ratio| acc * ratio))
    }
}

/// Share of scored trades with a profit ratio above 1; 0 without trades.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageProfitableTradesCriterion {
    pub(super) policy: OpenTradePolicy,
}

impl AnalysisCriterion for AverageProfitableTradesCriterion {
    fn name(&self) -> String {
        "Average Profitable Trades".to_string()
    }

    fn calculate(
        &self,
        series: &TimeSeries,
        record: &TradingRecord,
    ) -> Result<Num, AnalysisError> {
        let ratios = profit_ratios(series, record, self.policy)?;
        if ratios.is_empty() {
            return Ok(Num::ZERO);
        }
        let winners = ratios.iter().filter(|r| r.is_greater_than(Num::ONE)).count();
        Ok(Num::from(winners) / Num::from(ratios.len()))
    }
}

/// Average profit ratio of winning trades over the average profit ratio of
/// losing trades.
///
/// NaN when there is no losing trade and 0 when there is no winning trade.
/// Break-even trades count as neither.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardRiskRatioCriterion {
    pub(super) policy: OpenTradePolicy,
}

fn mean(values: &[Num]) -> Num {
    values.iter().copied().sum::<Num>() / Num::from(values.len())
}

impl AnalysisCriterion for RewardRiskRatioCriterion {
    fn name(&self) -> String {
        "Reward Risk Ratio".to_string()
    }

    fn calculate(
        &self,
        series: &TimeSeries,
        record: &TradingRecord,
    ) -> Result<Num, AnalysisError> {
        let (winners, losers): (Vec<Num>, Vec<Num>) = profit_ratios(series, record, self.policy)?
            .into_iter()
            .filter(|r| r.is_greater_than(Num::ONE) || r.is_less_than(Num::ONE))
            .partition(|r| r.is_greater_than(Num::ONE));

        if losers.is_empty() {
            return Ok(Num::NaN);
        }
        if winners.is_empty() {
            return Ok(Num::ZERO);
        }
        Ok(mean(&winners) / mean(&losers))
    }
}

/// Profit ratio of holding from the first close to the last close, in the
/// record's direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuyAndHoldCriterion;

impl BuyAndHoldCriterion {
    pub fn new() -> Self {
        Self
    }
}

impl AnalysisCriterion for BuyAndHoldCriterion {
    fn name(&self) -> String {
        "Buy And Hold".to_string()
    }

    fn calculate(
        &self,
        series: &TimeSeries,
        record: &TradingRecord,
    ) -> Result<Num, AnalysisError> {
        let held = buy_and_hold_record(series, record.direction())?;
        Ok(held
            .trades()
            .first()
            .and_then(Trade::profit_ratio)
            .unwrap_or(Num::ONE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record_at, series_of};
    use ta_core::TradeDirection;

    fn num(s: &str) -> Num {
        s.parse().unwrap()
    }

    #[test]
    fn test_total_profit() {
        let series = series_of(&["100", "105", "110", "100", "95", "105"]);
        let record = record_at(&series, TradeDirection::Long, &[0, 2, 3, 5]);
        // 1.1 · 1.05
        assert_eq!(
            TotalProfitCriterion::new().calculate(&series, &record).unwrap(),
            num("1.155")
        );
    }

    #[test]
    fn test_total_profit_without_trades() {
        let series = series_of(&["100", "105"]);
        let record = TradingRecord::default();
        assert_eq!(
            TotalProfitCriterion::new().calculate(&series, &record).unwrap(),
            Num::ONE
        );
    }

    #[test]
    fn test_total_profit_open_trade_policy() {
        let series = series_of(&["100", "105", "120"]);
        let record = record_at(&series, TradeDirection::Long, &[0]);

        assert_eq!(
            TotalProfitCriterion::new().calculate(&series, &record).unwrap(),
            Num::ONE
        );
        assert_eq!(
            TotalProfitCriterion::with_policy(OpenTradePolicy::CloseAtLastPrice)
                .calculate(&series, &record)
                .unwrap(),
            num("1.2")
        );
    }

    #[test]
    fn test_average_profitable_trades() {
        let series = series_of(&["100", "95", "102", "105", "97", "113"]);
        let record = record_at(&series, TradeDirection::Long, &[0, 1, 2, 3, 4, 5]);
        // losing, winning, winning
        assert_eq!(
            AverageProfitableTradesCriterion::new()
                .calculate(&series, &record)
                .unwrap(),
            Num::TWO / Num::from(3)
        );
        assert_eq!(
            AverageProfitableTradesCriterion::new()
                .calculate(&series, &TradingRecord::default())
                .unwrap(),
            Num::ZERO
        );
    }

    #[test]
    fn test_reward_risk_ratio() {
        let series = series_of(&["100", "120", "100", "90", "100", "95"]);
        let record = record_at(&series, TradeDirection::Long, &[0, 1, 2, 3, 4, 5]);
        // winners: 1.2; losers: 0.9, 0.95 → average 0.925
        let ratio = RewardRiskRatioCriterion::new().calculate(&series, &record).unwrap();
        assert_eq!(ratio, num("1.2") / num("0.925"));
    }

    #[test]
    fn test_reward_risk_ratio_one_winner_one_loser() {
        let series = series_of(&["100", "120", "100", "90"]);
        let record = record_at(&series, TradeDirection::Long, &[0, 1, 2, 3]);
        let ratio = RewardRiskRatioCriterion::new().calculate(&series, &record).unwrap();
        assert_eq!(ratio, num("1.2") / num("0.9"));
        assert_eq!(ratio, num("1.33333333333333333333"));
    }

    #[test]
    fn test_reward_risk_ratio_ignores_break_even() {
        let series = series_of(&["100", "100", "100", "80"]);
        let record = record_at(&series, TradeDirection::Long, &[0, 1, 2, 3]);
        // the break-even trade is not a winner
        assert_eq!(
            RewardRiskRatioCriterion::new().calculate(&series, &record).unwrap(),
            Num::ZERO
        );
    }

    #[test]
    fn test_reward_risk_ratio_without_losers_is_nan() {
        let series = series_of(&["100", "120"]);
        let record = record_at(&series, TradeDirection::Long, &[0, 1]);
        assert!(RewardRiskRatioCriterion::new()
            .calculate(&series, &record)
            .unwrap()
            .is_nan());
    }

    #[test]
    fn test_buy_and_hold() {
        let series = series_of(&["100", "80", "125"]);
        let long = TradingRecord::new(TradeDirection::Long);
        let short = TradingRecord::new(TradeDirection::Short);
        assert_eq!(BuyAndHoldCriterion.calculate(&series, &long).unwrap(), num("1.25"));
        assert_eq!(BuyAndHoldCriterion.calculate(&series, &short).unwrap(), num("0.8"));
    }
}
