//! Backtesting engine.

mod engine;
mod report;

pub use engine::{BacktestConfig, BacktestEngine};
pub use report::{BacktestReport, CriterionScore, TradeSummary};
