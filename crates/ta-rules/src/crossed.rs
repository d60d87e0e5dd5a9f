//! Crossing rules.

use std::rc::Rc;

use ta_core::{IndicatorError, Num, Rule, SharedIndicator, TradingRecord};
use ta_indicators::Constant;

use crate::trace_is_satisfied;

/// Values of `a` and `b` at `index - 1` and `index`, or `None` at the
/// first index of the window where no crossing can be observed.
fn pairs(
    a: &SharedIndicator,
    b: &SharedIndicator,
    index: usize,
) -> Result<Option<[(Num, Num); 2]>, IndicatorError> {
    let series = a.series();
    series.check_index(index)?;
    if index <= series.begin_index() {
        return Ok(None);
    }
    let prev = (a.value(index - 1)?, b.value(index - 1)?);
    let curr = (a.value(index)?, b.value(index)?);
    Ok(Some([prev, curr]))
}

/// Satisfied at `i` when `a` moves from at-or-below `b` at `i - 1` to
/// strictly above it at `i`.
#[derive(Debug)]
pub struct CrossedUpIndicatorRule {
    a: SharedIndicator,
    b: SharedIndicator,
}

impl CrossedUpIndicatorRule {
    pub fn new(a: SharedIndicator, b: SharedIndicator) -> Self {
        Self { a, b }
    }

    /// Crossing above a fixed threshold.
    pub fn over_threshold(a: SharedIndicator, threshold: Num) -> Self {
        let b = Rc::new(Constant::new(a.series().clone(), threshold));
        Self::new(a, b)
    }
}

impl Rule for CrossedUpIndicatorRule {
    fn is_satisfied(
        &self,
        index: usize,
        _record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        let satisfied = match pairs(&self.a, &self.b, index)? {
            Some([(a0, b0), (a1, b1)]) => a0.is_less_than_or_equal(b0) && a1.is_greater_than(b1),
            None => false,
        };
        Ok(trace_is_satisfied("CrossedUpIndicatorRule", index, satisfied))
    }

    fn name(&self) -> String {
        format!("CrossedUp({}, {})", self.a.name(), self.b.name())
    }
}

/// Satisfied at `i` when `a` moves from at-or-above `b` at `i - 1` to
/// strictly below it at `i`.
#[derive(Debug)]
pub struct CrossedDownIndicatorRule {
    a: SharedIndicator,
    b: SharedIndicator,
}

impl CrossedDownIndicatorRule {
    pub fn new(a: SharedIndicator, b: SharedIndicator) -> Self {
        Self { a, b }
    }

    /// Crossing below a fixed threshold.
    pub fn under_threshold(a: SharedIndicator, threshold: Num) -> Self {
        let b = Rc::new(Constant::new(a.series().clone(), threshold));
        Self::new(a, b)
    }
}

impl Rule for CrossedDownIndicatorRule {
    fn is_satisfied(
        &self,
        index: usize,
        _record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        let satisfied = match pairs(&self.a, &self.b, index)? {
            Some([(a0, b0), (a1, b1)]) => a0.is_greater_than_or_equal(b0) && a1.is_less_than(b1),
            None => false,
        };
        Ok(trace_is_satisfied("CrossedDownIndicatorRule", index, satisfied))
    }

    fn name(&self) -> String {
        format!("CrossedDown({}, {})", self.a.name(), self.b.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::close_of;
    use ta_indicators::Sma;

    #[test]
    fn test_crossed_up_and_down_against_sma() {
        let close = close_of(&[10, 11, 9, 12, 8, 13]);
        let sma: SharedIndicator = Rc::new(Sma::new(close.clone(), 2).unwrap());
        let up = CrossedUpIndicatorRule::new(close.clone(), sma.clone());
        let down = CrossedDownIndicatorRule::new(close, sma);

        let ups: Vec<usize> = (0..6).filter(|&i| up.is_satisfied(i, None).unwrap()).collect();
        let downs: Vec<usize> = (0..6).filter(|&i| down.is_satisfied(i, None).unwrap()).collect();
        assert_eq!(ups, vec![1, 3, 5]);
        assert_eq!(downs, vec![2, 4]);
    }

    #[test]
    fn test_never_satisfied_at_first_index() {
        let close = close_of(&[5, 20]);
        let up = CrossedUpIndicatorRule::over_threshold(close.clone(), Num::from(10));
        assert!(!up.is_satisfied(0, None).unwrap());
        assert!(up.is_satisfied(1, None).unwrap());
    }

    #[test]
    fn test_touching_is_not_crossing() {
        let close = close_of(&[9, 10, 10, 11]);
        let up = CrossedUpIndicatorRule::over_threshold(close.clone(), Num::from(10));
        // 9 → 10 only reaches the threshold; 10 → 11 crosses it
        assert!(!up.is_satisfied(1, None).unwrap());
        assert!(!up.is_satisfied(2, None).unwrap());
        assert!(up.is_satisfied(3, None).unwrap());

        let down = CrossedDownIndicatorRule::under_threshold(close, Num::from(10));
        assert!(!(0..4).any(|i| down.is_satisfied(i, None).unwrap()));
    }

    #[test]
    fn test_out_of_range_index_fails() {
        let up = CrossedUpIndicatorRule::over_threshold(close_of(&[1, 2]), Num::ONE);
        assert!(matches!(up.is_satisfied(2, None), Err(IndicatorError::Series(_))));
    }
}
