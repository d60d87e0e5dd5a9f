//! Error types for the backtesting engine.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum TaError {
    #[error("Series error: {0}")]
    Series(#[from] SeriesError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Invalid trading state: {0}")]
    State(#[from] StateError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a [`TimeSeries`](crate::TimeSeries).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("index {index} is outside the series window [{begin}, {}]", display_end(.end))]
    IndexOutOfRange {
        index: usize,
        begin: usize,
        /// `None` when the series holds no ticks.
        end: Option<usize>,
    },

    #[error("tick ending at {end_time} is not after the last tick ({last_end_time})")]
    NonChronological {
        end_time: String,
        last_end_time: String,
    },
}

fn display_end(end: &Option<usize>) -> String {
    end.map_or_else(|| "-".to_string(), |e| e.to_string())
}

/// Indicator and rule evaluation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error("Insufficient data at index {index}: need {required} values, have {available}")]
    InsufficientData {
        index: usize,
        required: usize,
        available: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Trading record state machine violations.
///
/// These are never corrected: the operation that caused them is rejected
/// and the record is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("cannot enter at index {index}: a trade entered at index {open_since} is still open")]
    DoubleEntry { index: usize, open_since: usize },

    #[error("cannot exit at index {index}: no trade is open")]
    NoOpenTrade { index: usize },

    #[error("order at index {index} precedes the last recorded order at index {last}")]
    OutOfOrder { index: usize, last: usize },
}

/// Errors raised while scoring a trading record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// A reference record (such as the buy-and-hold baseline) could not be built.
    #[error(transparent)]
    State(#[from] StateError),
}

/// Strategy construction errors.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Strategy not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

/// Data loading errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("No data available: {0}")]
    NoDataAvailable(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Result type alias for engine operations.
pub type TaResult<T> = Result<T, TaError>;
