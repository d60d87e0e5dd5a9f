//! Backtest report generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ta_analysis::{
    AverageProfitableTradesCriterion, BuyAndHoldCriterion, CashFlow, MaximumDrawdownCriterion,
    NumberOfTradesCriterion, RewardRiskRatioCriterion, TotalProfitCriterion,
    VersusBuyAndHoldCriterion,
};
use ta_core::{
    AnalysisCriterion, AnalysisError, Num, SeriesError, TimeSeries, Trade, TradingRecord,
};

use crate::BacktestConfig;

/// One trade of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSummary {
    pub entry_index: usize,
    pub entry_time: DateTime<Utc>,
    pub entry_price: Num,
    pub exit_index: Option<usize>,
    pub exit_time: Option<DateTime<Utc>>,
    pub exit_price: Option<Num>,
    /// Realized profit ratio, absent while open
    pub profit_ratio: Option<Num>,
}

impl TradeSummary {
    fn from_trade(series: &TimeSeries, trade: &Trade) -> Result<Self, SeriesError> {
        let entry = trade.entry();
        let exit = match trade.exit() {
            Some(exit) => Some((exit, series.tick(exit.index)?.end_time())),
            None => None,
        };
        Ok(Self {
            entry_index: entry.index,
            entry_time: series.tick(entry.index)?.end_time(),
            entry_price: entry.price,
            exit_index: exit.map(|(o, _)| o.index),
            exit_time: exit.map(|(_, time)| time),
            exit_price: exit.map(|(o, _)| o.price),
            profit_ratio: trade.profit_ratio(),
        })
    }
}

/// A criterion's name and its value for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub name: String,
    pub value: Num,
}

/// Complete backtest report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Strategy name
    pub strategy: String,
    /// Series name
    pub series: String,
    /// Configuration used
    pub config: BacktestConfig,
    /// Ticks in the series' window
    pub ticks_processed: usize,
    /// Closed trades in order
    pub trades: Vec<TradeSummary>,
    /// Trade still open at the end of the run
    pub open_trade: Option<TradeSummary>,
    /// Criterion values, scored under the configured open-trade policy
    pub scores: Vec<CriterionScore>,
    /// Series index of the first cash flow value
    pub begin_index: usize,
    /// Cash flow value at every index of the window
    pub cash_flow: Vec<Num>,
}

impl BacktestReport {
    /// Score `record` and collect everything a report shows.
    pub fn build(
        strategy: &str,
        series: &TimeSeries,
        config: BacktestConfig,
        record: TradingRecord,
    ) -> Result<Self, AnalysisError> {
        let policy = config.open_trade_policy;
        let criteria: Vec<Box<dyn AnalysisCriterion>> = vec![
            Box::new(TotalProfitCriterion::with_policy(policy)),
            Box::new(AverageProfitableTradesCriterion::with_policy(policy)),
            Box::new(RewardRiskRatioCriterion::with_policy(policy)),
            Box::new(NumberOfTradesCriterion::with_policy(policy)),
            Box::new(MaximumDrawdownCriterion::with_policy(policy)),
            Box::new(BuyAndHoldCriterion::new()),
            Box::new(VersusBuyAndHoldCriterion::new(TotalProfitCriterion::with_policy(policy))),
        ];
        let scores = criteria
            .iter()
            .map(|criterion| {
                Ok(CriterionScore {
                    name: criterion.name(),
                    value: criterion.calculate(series, &record)?,
                })
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        let trades = record
            .trades()
            .iter()
            .map(|trade| TradeSummary::from_trade(series, trade))
            .collect::<Result<Vec<_>, _>>()?;
        let open_trade = record
            .current_trade()
            .map(|trade| TradeSummary::from_trade(series, trade))
            .transpose()?;
        let cash_flow = CashFlow::with_policy(series, &record, policy)?.values();

        Ok(Self {
            strategy: strategy.to_string(),
            series: series.name().to_string(),
            config,
            ticks_processed: series.tick_count(),
            trades,
            open_trade,
            scores,
            begin_index: series.begin_index(),
            cash_flow,
        })
    }

    /// Value of the criterion called `name`.
    pub fn score(&self, name: &str) -> Option<Num> {
        self.scores.iter().find(|s| s.name == name).map(|s| s.value)
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                     BACKTEST REPORT                        \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str(&format!("  Strategy:            {}\n", self.strategy));
        s.push_str(&format!("  Series:              {}\n", self.series));
        s.push_str(&format!("  Direction:           {}\n", self.config.direction));
        s.push_str(&format!("  Ticks Processed:     {}\n", self.ticks_processed));
        s.push('\n');

        s.push_str("CRITERIA\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        for score in &self.scores {
            s.push_str(&format!("  {:<32} {:.4}\n", format!("{}:", score.name), score.value));
        }
        s.push('\n');

        s.push_str("TRADES\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        for (n, trade) in self.trades.iter().enumerate() {
            s.push_str(&format!(
                "  #{:<4} {} @ {} → {} @ {}  ratio {:.4}\n",
                n + 1,
                trade.entry_index,
                trade.entry_price,
                trade.exit_index.map_or_else(|| "-".to_string(), |i| i.to_string()),
                trade.exit_price.map_or_else(|| "-".to_string(), |p| p.to_string()),
                trade.profit_ratio.unwrap_or(Num::NaN),
            ));
        }
        if let Some(open) = &self.open_trade {
            s.push_str(&format!(
                "  open  {} @ {} (entered {})\n",
                open.entry_index,
                open.entry_price,
                open.entry_time.format("%Y-%m-%d")
            ));
        }
        if self.trades.is_empty() && self.open_trade.is_none() {
            s.push_str("  no trades\n");
        }
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the cash flow as CSV.
    pub fn cash_flow_to_csv(&self) -> String {
        let mut csv = String::from("index,value\n");
        for (offset, value) in self.cash_flow.iter().enumerate() {
            csv.push_str(&format!("{},{}\n", self.begin_index + offset, value));
        }
        csv
    }
}
