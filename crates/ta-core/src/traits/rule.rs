//! Rule trait.

use crate::error::IndicatorError;
use crate::types::TradingRecord;

/// A predicate over a series index and, optionally, the trading record of
/// the run being evaluated.
///
/// Rules never mutate the record. Most rules ignore it; stop rules need it
/// to find the entry price of the open trade.
pub trait Rule {
    fn is_satisfied(
        &self,
        index: usize,
        record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError>;

    /// Display name used in traces and reports.
    fn name(&self) -> String;
}

/// Owned, type-erased rule. Combinators hold their operands this way.
pub type BoxedRule = Box<dyn Rule>;

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn is_satisfied(
        &self,
        index: usize,
        record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        (**self).is_satisfied(index, record)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

impl std::fmt::Debug for dyn Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
