use ta_core::{
    AnalysisCriterion, AnalysisError, Num, OpenTradePolicy, TimeSeries, TradingRecord,
};

use crate::scored_trades;

/// Number of scored trades. Fewer is better.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberOfTradesCriterion {
    pub(super) policy: OpenTradePolicy,
}

impl AnalysisCriterion for NumberOfTradesCriterion {
    fn name(&self) -> String {
        "Number Of Trades".to_string()
    }

    fn calculate(
        &self,
        series: &TimeSeries,
        record: &TradingRecord,
    ) -> Result<Num, AnalysisError> {
        Ok(Num::from(scored_trades(series, record, self.policy)?.len()))
    }

    fn better_than(&self, a: Num, b: Num) -> bool {
        a.is_less_than(b)
    }
}
