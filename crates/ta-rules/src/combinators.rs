//! Logical combinators.

use ta_core::{BoxedRule, IndicatorError, Rule, TradingRecord};

use crate::trace_is_satisfied;

/// Satisfied when both operands are. The right operand is not evaluated
/// when the left one fails.
#[derive(Debug)]
pub struct AndRule {
    left: BoxedRule,
    right: BoxedRule,
}

impl AndRule {
    pub fn new(left: impl Rule + 'static, right: impl Rule + 'static) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl Rule for AndRule {
    fn is_satisfied(
        &self,
        index: usize,
        record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        let satisfied =
            self.left.is_satisfied(index, record)? && self.right.is_satisfied(index, record)?;
        Ok(trace_is_satisfied("AndRule", index, satisfied))
    }

    fn name(&self) -> String {
        format!("({} AND {})", self.left.name(), self.right.name())
    }
}

/// Satisfied when either operand is. The right operand is not evaluated
/// when the left one holds.
#[derive(Debug)]
pub struct OrRule {
    left: BoxedRule,
    right: BoxedRule,
}

impl OrRule {
    pub fn new(left: impl Rule + 'static, right: impl Rule + 'static) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl Rule for OrRule {
    fn is_satisfied(
        &self,
        index: usize,
        record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        let satisfied =
            self.left.is_satisfied(index, record)? || self.right.is_satisfied(index, record)?;
        Ok(trace_is_satisfied("OrRule", index, satisfied))
    }

    fn name(&self) -> String {
        format!("({} OR {})", self.left.name(), self.right.name())
    }
}

/// Satisfied when exactly one operand is.
#[derive(Debug)]
pub struct XorRule {
    left: BoxedRule,
    right: BoxedRule,
}

impl XorRule {
    pub fn new(left: impl Rule + 'static, right: impl Rule + 'static) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl Rule for XorRule {
    fn is_satisfied(
        &self,
        index: usize,
        record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        let satisfied =
            self.left.is_satisfied(index, record)? ^ self.right.is_satisfied(index, record)?;
        Ok(trace_is_satisfied("XorRule", index, satisfied))
    }

    fn name(&self) -> String {
        format!("({} XOR {})", self.left.name(), self.right.name())
    }
}

/// Negation of a rule.
#[derive(Debug)]
pub struct NotRule {
    rule: BoxedRule,
}

impl NotRule {
    pub fn new(rule: impl Rule + 'static) -> Self {
        Self {
            rule: Box::new(rule),
        }
    }
}

impl Rule for NotRule {
    fn is_satisfied(
        &self,
        index: usize,
        record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        let satisfied = !self.rule.is_satisfied(index, record)?;
        Ok(trace_is_satisfied("NotRule", index, satisfied))
    }

    fn name(&self) -> String {
        format!("NOT {}", self.rule.name())
    }
}

/// Builder methods for composing rules.
///
/// ```ignore
/// let entry = CrossedUpIndicatorRule::new(close.clone(), sma.clone())
///     .and(OverIndicatorRule::new(close, threshold));
/// ```
pub trait RuleExt: Rule + Sized + 'static {
    fn and(self, other: impl Rule + 'static) -> AndRule {
        AndRule::new(self, other)
    }

    fn or(self, other: impl Rule + 'static) -> OrRule {
        OrRule::new(self, other)
    }

    fn xor(self, other: impl Rule + 'static) -> XorRule {
        XorRule::new(self, other)
    }

    fn negation(self) -> NotRule {
        NotRule::new(self)
    }

    fn boxed(self) -> BoxedRule {
        Box::new(self)
    }
}

impl<R: Rule + 'static> RuleExt for R {}
