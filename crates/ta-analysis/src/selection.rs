//! Picking the best of several trading records.

use ta_core::{AnalysisCriterion, AnalysisError, TimeSeries, TradingRecord};

/// Position of the record scoring best under `criterion`, `None` for an
/// empty slice. Ties keep the earlier record; NaN scores never win.
pub fn choose_best<C: AnalysisCriterion + ?Sized>(
    series: &TimeSeries,
    criterion: &C,
    records: &[TradingRecord],
) -> Result<Option<usize>, AnalysisError> {
    let mut best: Option<(usize, ta_core::Num)> = None;
    for (position, record) in records.iter().enumerate() {
        let score = criterion.calculate(series, record)?;
        tracing::debug!(criterion = %criterion.name(), position, %score, "scored record");
        best = match best {
            None => Some((position, score)),
            Some((_, current)) if current.is_nan() && !score.is_nan() => Some((position, score)),
            Some((_, current)) if criterion.better_than(score, current) => Some((position, score)),
            keep => keep,
        };
    }
    Ok(best.map(|(position, _)| position))
}
