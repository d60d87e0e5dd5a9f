//! OHLCV tick.

use chrono::{DateTime, Duration, Utc};

use crate::num::Num;

/// One OHLCV observation, identified by the end of its time period.
///
/// Ticks are immutable once built; a [`TimeSeries`](super::TimeSeries) owns them.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    time_period: Duration,
    end_time: DateTime<Utc>,
    open: Num,
    high: Num,
    low: Num,
    close: Num,
    volume: Num,
}

impl Tick {
    /// Create a new tick.
    pub fn new(
        time_period: Duration,
        end_time: DateTime<Utc>,
        open: Num,
        high: Num,
        low: Num,
        close: Num,
        volume: Num,
    ) -> Self {
        Self {
            time_period,
            end_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn time_period(&self) -> Duration {
        self.time_period
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn begin_time(&self) -> DateTime<Utc> {
        self.end_time - self.time_period
    }

    /// Check whether `timestamp` falls in `[begin_time, end_time)`.
    pub fn in_period(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.begin_time() && timestamp < self.end_time
    }

    pub fn open(&self) -> Num {
        self.open
    }

    pub fn high(&self) -> Num {
        self.high
    }

    pub fn low(&self) -> Num {
        self.low
    }

    pub fn close(&self) -> Num {
        self.close
    }

    pub fn volume(&self) -> Num {
        self.volume
    }

    /// (high + low + close) / 3
    pub fn typical_price(&self) -> Num {
        (self.high + self.low + self.close) / Num::from(3)
    }

    /// (high + low) / 2
    pub fn median_price(&self) -> Num {
        (self.high + self.low) / Num::TWO
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: Option<Num>) -> Num {
        let hl = self.high - self.low;
        match prev_close {
            Some(pc) => {
                let hc = (self.high - pc).abs();
                let lc = (self.low - pc).abs();
                hl.max(hc).max(lc)
            }
            None => hl,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.close.is_greater_than(self.open)
    }

    pub fn is_bearish(&self) -> bool {
        self.close.is_less_than(self.open)
    }
}
