//! Analysis criterion trait.

use crate::error::AnalysisError;
use crate::num::Num;
use crate::types::{TimeSeries, TradingRecord};

/// Scores a finished trading record against the series it was run on.
///
/// Criteria are stateless. Degenerate inputs (no trades, no losing trades)
/// yield documented sentinel values rather than errors; errors are reserved
/// for records that reference indices outside the series and for reference
/// records that cannot be built.
pub trait AnalysisCriterion {
    fn name(&self) -> String;

    fn calculate(
        &self,
        series: &TimeSeries,
        record: &TradingRecord,
    ) -> Result<Num, AnalysisError>;

    /// Whether score `a` is better than score `b`. Higher is better unless
    /// a criterion says otherwise.
    fn better_than(&self, a: Num, b: Num) -> bool {
        a.is_greater_than(b)
    }
}

impl<C: AnalysisCriterion + ?Sized> AnalysisCriterion for Box<C> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn calculate(
        &self,
        series: &TimeSeries,
        record: &TradingRecord,
    ) -> Result<Num, AnalysisError> {
        (**self).calculate(series, record)
    }

    fn better_than(&self, a: Num, b: Num) -> bool {
        (**self).better_than(a, b)
    }
}
