//! Technical indicators over a [`TimeSeries`](ta_core::TimeSeries).
//!
//! Every indicator answers `value(index)` for an absolute series index and
//! memoizes what it computes, so a graph of indicators sharing upstream
//! nodes evaluates each node at most once per index:
//! - Price accessors (close, open, high, low, volume, typical, median) and constants
//! - Moving averages (SMA, EMA)
//! - Volatility (standard deviation, Bollinger bands, bandwidth, %B)
//! - Momentum (MACD, awesome oscillator, acceleration/deceleration)

pub mod momentum;
pub mod moving_average;
pub mod price;
pub mod volatility;

pub use momentum::{AccelerationDeceleration, AwesomeOscillator, Macd};
pub use moving_average::{Ema, Sma};
pub use price::{
    ClosePrice, Constant, HighPrice, LowPrice, MedianPrice, OpenPrice, TypicalPrice, Volume,
};
pub use volatility::{
    BollingerBand, BollingerBands, BollingerBandWidth, PercentB, StandardDeviation,
};

use ta_core::{IndicatorError, WindowPolicy};

/// First index of the `period`-long window ending at `index`.
///
/// With fewer than `period` values since `begin`, the window shrinks to
/// start at `begin` or the call fails, depending on `policy`.
pub(crate) fn window_start(
    begin: usize,
    index: usize,
    period: usize,
    policy: WindowPolicy,
) -> Result<usize, IndicatorError> {
    let available = index + 1 - begin;
    if available >= period {
        return Ok(index + 1 - period);
    }
    match policy {
        WindowPolicy::Shrink => Ok(begin),
        WindowPolicy::Strict => Err(IndicatorError::InsufficientData {
            index,
            required: period,
            available,
        }),
    }
}

pub(crate) fn check_period(name: &str, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidParameter(format!(
            "{name} period must be greater than 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::rc::Rc;

    use chrono::{Duration, TimeZone, Utc};
    use ta_core::{Num, Tick, TimeSeries};

    /// Daily series whose open, high, low and close all equal the given values.
    pub fn series_of(closes: &[&str]) -> Rc<TimeSeries> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ticks = closes.iter().enumerate().map(|(i, c)| {
            let c: Num = c.parse().unwrap();
            Tick::new(
                Duration::days(1),
                start + Duration::days(i as i64),
                c,
                c,
                c,
                c,
                Num::from(1000),
            )
        });
        Rc::new(TimeSeries::from_ticks("TEST", ticks).unwrap())
    }

    pub fn num(s: &str) -> Num {
        s.parse().unwrap()
    }
}
