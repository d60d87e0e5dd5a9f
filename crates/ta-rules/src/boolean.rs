use ta_core::{IndicatorError, Rule, TradingRecord};

/// A rule with a fixed outcome.
///
/// `BooleanRule::TRUE` as an entry and `BooleanRule::FALSE` as an exit
/// gives buy-and-hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanRule {
    satisfied: bool,
}

impl BooleanRule {
    pub const TRUE: BooleanRule = BooleanRule { satisfied: true };
    pub const FALSE: BooleanRule = BooleanRule { satisfied: false };

    pub fn new(satisfied: bool) -> Self {
        Self { satisfied }
    }
}

impl Rule for BooleanRule {
    fn is_satisfied(
        &self,
        index: usize,
        _record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        Ok(crate::trace_is_satisfied("BooleanRule", index, self.satisfied))
    }

    fn name(&self) -> String {
        format!("BooleanRule({})", self.satisfied)
    }
}
