use ta_core::{
    AnalysisCriterion, AnalysisError, Num, OpenTradePolicy, TimeSeries, TradingRecord,
};

use crate::CashFlow;

/// Largest peak-to-trough decline of the cash flow, as a fraction of the
/// peak. 0 for a flow that never declines. Lower is better.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaximumDrawdownCriterion {
    pub(super) policy: OpenTradePolicy,
}

impl AnalysisCriterion for MaximumDrawdownCriterion {
    fn name(&self) -> String {
        "Maximum Drawdown".to_string()
    }

    fn calculate(
        &self,
        series: &TimeSeries,
        record: &TradingRecord,
    ) -> Result<Num, AnalysisError> {
        let flow = CashFlow::with_policy(series, record, self.policy)?;
        let mut peak = Num::ONE;
        let mut max_drawdown = Num::ZERO;
        for (_, value) in flow.iter() {
            if value.is_greater_than(peak) {
                peak = value;
            }
            let drawdown = (peak - value) / peak;
            if drawdown.is_greater_than(max_drawdown) {
                max_drawdown = drawdown;
            }
        }
        Ok(max_drawdown)
    }

    fn better_than(&self, a: Num, b: Num) -> bool {
        a.is_less_than(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record_at, series_of};
    use ta_core::TradeDirection;

    #[test]
    fn test_maximum_drawdown() {
        let series = series_of(&["100", "120", "90", "110"]);
        let record = record_at(&series, TradeDirection::Long, &[0, 3]);
        // peak 1.2, trough 0.9 → 0.25
        assert_eq!(
            MaximumDrawdownCriterion::new().calculate(&series, &record).unwrap(),
            "0.25".parse().unwrap()
        );
    }

    #[test]
    fn test_no_drawdown() {
        let series = series_of(&["1", "2", "3"]);
        let record = record_at(&series, TradeDirection::Long, &[0, 2]);
        assert_eq!(
            MaximumDrawdownCriterion::new().calculate(&series, &record).unwrap(),
            Num::ZERO
        );
        assert!(MaximumDrawdownCriterion::new().better_than(Num::ZERO, Num::ONE));
    }
}
