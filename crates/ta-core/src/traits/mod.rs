//! Core traits: indicators, rules, strategies and analysis criteria.

mod criterion;
mod indicator;
mod rule;
mod strategy;

pub use criterion::AnalysisCriterion;
pub use indicator::{Indicator, SharedIndicator, ValueCache};
pub use rule::{BoxedRule, Rule};
pub use strategy::{Strategy, StrategyConfig};
