//! Rules comparing indicator values at one index.

use std::rc::Rc;

use ta_core::{IndicatorError, Num, Rule, SharedIndicator, TradingRecord};
use ta_indicators::Constant;

use crate::trace_is_satisfied;

fn constant(like: &SharedIndicator, value: Num) -> SharedIndicator {
    Rc::new(Constant::new(like.series().clone(), value))
}

/// Satisfied when `a > b`.
#[derive(Debug)]
pub struct OverIndicatorRule {
    a: SharedIndicator,
    b: SharedIndicator,
}

impl OverIndicatorRule {
    pub fn new(a: SharedIndicator, b: SharedIndicator) -> Self {
        Self { a, b }
    }

    pub fn over_threshold(a: SharedIndicator, threshold: Num) -> Self {
        let b = constant(&a, threshold);
        Self::new(a, b)
    }
}

impl Rule for OverIndicatorRule {
    fn is_satisfied(
        &self,
        index: usize,
        _record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        let satisfied = self.a.value(index)?.is_greater_than(self.b.value(index)?);
        Ok(trace_is_satisfied("OverIndicatorRule", index, satisfied))
    }

    fn name(&self) -> String {
        format!("Over({}, {})", self.a.name(), self.b.name())
    }
}

/// Satisfied when `a < b`.
#[derive(Debug)]
pub struct UnderIndicatorRule {
    a: SharedIndicator,
    b: SharedIndicator,
}

impl UnderIndicatorRule {
    pub fn new(a: SharedIndicator, b: SharedIndicator) -> Self {
        Self { a, b }
    }

    pub fn under_threshold(a: SharedIndicator, threshold: Num) -> Self {
        let b = constant(&a, threshold);
        Self::new(a, b)
    }
}

impl Rule for UnderIndicatorRule {
    fn is_satisfied(
        &self,
        index: usize,
        _record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        let satisfied = self.a.value(index)?.is_less_than(self.b.value(index)?);
        Ok(trace_is_satisfied("UnderIndicatorRule", index, satisfied))
    }

    fn name(&self) -> String {
        format!("Under({}, {})", self.a.name(), self.b.name())
    }
}

/// Satisfied when `lower ≤ reference ≤ upper`, bounds included.
#[derive(Debug)]
pub struct InPipeRule {
    reference: SharedIndicator,
    upper: SharedIndicator,
    lower: SharedIndicator,
}

impl InPipeRule {
    pub fn new(reference: SharedIndicator, upper: SharedIndicator, lower: SharedIndicator) -> Self {
        Self {
            reference,
            upper,
            lower,
        }
    }

    /// Pipe with fixed bounds.
    pub fn between(reference: SharedIndicator, upper: Num, lower: Num) -> Self {
        let upper = constant(&reference, upper);
        let lower = constant(&reference, lower);
        Self::new(reference, upper, lower)
    }
}

impl Rule for InPipeRule {
    fn is_satisfied(
        &self,
        index: usize,
        _record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        let value = self.reference.value(index)?;
        let satisfied = value.is_less_than_or_equal(self.upper.value(index)?)
            && value.is_greater_than_or_equal(self.lower.value(index)?);
        Ok(trace_is_satisfied("InPipeRule", index, satisfied))
    }

    fn name(&self) -> String {
        format!(
            "InPipe({}, {}, {})",
            self.reference.name(),
            self.upper.name(),
            self.lower.name()
        )
    }
}
