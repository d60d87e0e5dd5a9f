//! Core types and traits for the backtesting engine.
//!
//! This crate provides the foundational building blocks:
//! - [`Num`], the exact decimal every price and indicator value is expressed in
//! - Market data ([`Tick`], [`TimeSeries`])
//! - Orders, trades and the [`TradingRecord`] state machine
//! - The [`Indicator`], [`Rule`], [`Strategy`] and [`AnalysisCriterion`] traits

pub mod error;
pub mod num;
pub mod traits;
pub mod types;

pub use error::{
    AnalysisError, DataError, IndicatorError, SeriesError, StateError, StrategyError, TaError,
    TaResult,
};
pub use num::Num;
pub use traits::*;
pub use types::*;
