//! Comparison against buy-and-hold.

use ta_core::{
    AnalysisCriterion, AnalysisError, Num, SeriesError, TimeSeries, TradeDirection, TradingRecord,
};

/// Record that enters at the first close and exits at the last close.
pub(crate) fn buy_and_hold_record(
    series: &TimeSeries,
    direction: TradeDirection,
) -> Result<TradingRecord, AnalysisError> {
    let mut record = TradingRecord::new(direction);
    let range = series.index_range().ok_or(SeriesError::IndexOutOfRange {
        index: series.begin_index(),
        begin: series.begin_index(),
        end: None,
    })?;
    let (begin, end) = (*range.start(), *range.end());

    record.enter(begin, series.tick(begin)?.close(), Num::ONE)?;
    record.exit(end, series.tick(end)?.close(), Num::ONE)?;
    Ok(record)
}

/// Ratio of an inner criterion on the record to the same criterion on a
/// long buy-and-hold record over the whole series.
///
/// The baseline is long whatever the record's direction. A value above 1
/// means the strategy beat simply holding the instrument.
pub struct VersusBuyAndHoldCriterion {
    inner: Box<dyn AnalysisCriterion>,
}

impl VersusBuyAndHoldCriterion {
    pub fn new(inner: impl AnalysisCriterion + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl std::fmt::Debug for VersusBuyAndHoldCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersusBuyAndHoldCriterion")
            .field("inner", &self.inner.name())
            .finish()
    }
}

impl AnalysisCriterion for VersusBuyAndHoldCriterion {
    fn name(&self) -> String {
        format!("{} vs Buy And Hold", self.inner.name())
    }

    fn calculate(
        &self,
        series: &TimeSeries,
        record: &TradingRecord,
    ) -> Result<Num, AnalysisError> {
        let held = buy_and_hold_record(series, TradeDirection::Long)?;
        Ok(self.inner.calculate(series, record)? / self.inner.calculate(series, &held)?)
    }

    fn better_than(&self, a: Num, b: Num) -> bool {
        self.inner.better_than(a, b)
    }
}
