//! Price accessor indicators and constants.
//!
//! These read straight from the series' ticks and are the leaves of every
//! indicator graph. They hold no cache: a tick lookup is already O(1).

use std::rc::Rc;

use ta_core::{Indicator, IndicatorError, Num, Tick, TimeSeries};

macro_rules! tick_indicator {
    ($(#[$doc:meta])* $name:ident, $label:literal, $read:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            series: Rc<TimeSeries>,
        }

        impl $name {
            pub fn new(series: Rc<TimeSeries>) -> Self {
                Self { series }
            }
        }

        impl Indicator for $name {
            fn value(&self, index: usize) -> Result<Num, IndicatorError> {
                let tick = self.series.tick(index)?;
                let read: fn(&Tick) -> Num = $read;
                Ok(read(tick))
            }

            fn series(&self) -> &Rc<TimeSeries> {
                &self.series
            }

            fn name(&self) -> String {
                $label.to_string()
            }
        }
    };
}

tick_indicator!(
    /// Close price of each tick.
    ClosePrice,
    "ClosePrice",
    Tick::close
);
tick_indicator!(OpenPrice, "OpenPrice", Tick::open);
tick_indicator!(HighPrice, "HighPrice", Tick::high);
tick_indicator!(LowPrice, "LowPrice", Tick::low);
tick_indicator!(Volume, "Volume", Tick::volume);
tick_indicator!(
    /// (high + low + close) / 3
    TypicalPrice,
    "TypicalPrice",
    Tick::typical_price
);
tick_indicator!(
    /// (high + low) / 2, the input of the awesome oscillator.
    MedianPrice,
    "MedianPrice",
    Tick::median_price
);

/// The same value at every index of the series' window.
///
/// Used as the threshold side of crossing and comparison rules.
#[derive(Debug, Clone)]
pub struct Constant {
    series: Rc<TimeSeries>,
    value: Num,
}

impl Constant {
    pub fn new(series: Rc<TimeSeries>, value: Num) -> Self {
        Self { series, value }
    }
}

impl Indicator for Constant {
    fn value(&self, index: usize) -> Result<Num, IndicatorError> {
        self.series.check_index(index)?;
        Ok(self.value)
    }

    fn series(&self) -> &Rc<TimeSeries> {
        &self.series
    }

    fn name(&self) -> String {
        format!("Constant({})", self.value)
    }
}
