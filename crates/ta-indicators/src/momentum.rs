//! Momentum indicators.

use std::rc::Rc;

use ta_core::{Indicator, IndicatorError, Num, SharedIndicator, TimeSeries, ValueCache};

use crate::{Ema, MedianPrice, Sma};

/// Moving Average Convergence Divergence line: `EMA(short) − EMA(long)`.
#[derive(Debug)]
pub struct Macd {
    short: Rc<Ema>,
    long: Rc<Ema>,
    cache: ValueCache,
}

impl Macd {
    /// Standard periods: short 12, long 26.
    pub fn standard(upstream: SharedIndicator) -> Result<Self, IndicatorError> {
        Self::new(upstream, 12, 26)
    }

    pub fn new(
        upstream: SharedIndicator,
        short: usize,
        long: usize,
    ) -> Result<Self, IndicatorError> {
        if short >= long {
            return Err(IndicatorError::InvalidParameter(format!(
                "MACD short period ({short}) must be less than long period ({long})"
            )));
        }
        Ok(Self {
            short: Rc::new(Ema::new(upstream.clone(), short)?),
            long: Rc::new(Ema::new(upstream, long)?),
            cache: ValueCache::new(),
        })
    }

    /// Signal line: an EMA of this MACD line.
    pub fn signal(self: &Rc<Self>, period: usize) -> Result<Ema, IndicatorError> {
        Ema::new(self.clone(), period)
    }
}

impl Indicator for Macd {
    fn value(&self, index: usize) -> Result<Num, IndicatorError> {
        self.series().check_index(index)?;
        self.cache
            .get_or_try_insert_with(index, || {
                Ok(self.short.value(index)? - self.long.value(index)?)
            })
    }

    fn series(&self) -> &Rc<TimeSeries> {
        self.short.series()
    }

    fn name(&self) -> String {
        format!("MACD({}, {})", self.short.period(), self.long.period())
    }
}

/// Awesome oscillator: `SMA(short) − SMA(long)` of the median price.
#[derive(Debug)]
pub struct AwesomeOscillator {
    short: Sma,
    long: Sma,
    cache: ValueCache,
}

impl AwesomeOscillator {
    pub fn new(median: SharedIndicator, short: usize, long: usize) -> Result<Self, IndicatorError> {
        if short >= long {
            return Err(IndicatorError::InvalidParameter(format!(
                "awesome oscillator short period ({short}) must be less than long period ({long})"
            )));
        }
        Ok(Self {
            short: Sma::new(median.clone(), short)?,
            long: Sma::new(median, long)?,
            cache: ValueCache::new(),
        })
    }

    /// The usual 5/34 oscillator over the series' median price.
    pub fn from_series(series: Rc<TimeSeries>) -> Result<Self, IndicatorError> {
        Self::new(Rc::new(MedianPrice::new(series)), 5, 34)
    }
}

impl Indicator for AwesomeOscillator {
    fn value(&self, index: usize) -> Result<Num, IndicatorError> {
        self.series().check_index(index)?;
        self.cache
            .get_or_try_insert_with(index, || {
                Ok(self.short.value(index)? - self.long.value(index)?)
            })
    }

    fn series(&self) -> &Rc<TimeSeries> {
        self.short.series()
    }

    fn name(&self) -> String {
        format!("AO({}, {})", self.short.period(), self.long.period())
    }
}

/// Acceleration/deceleration: `AO − SMA(AO, period)`.
#[derive(Debug)]
pub struct AccelerationDeceleration {
    ao: Rc<AwesomeOscillator>,
    sma: Sma,
    cache: ValueCache,
}

impl AccelerationDeceleration {
    pub fn new(ao: Rc<AwesomeOscillator>, period: usize) -> Result<Self, IndicatorError> {
        let sma = Sma::new(ao.clone(), period)?;
        Ok(Self {
            ao,
            sma,
            cache: ValueCache::new(),
        })
    }

    /// AO(5, 34) of the median price, smoothed over 5.
    pub fn from_series(series: Rc<TimeSeries>) -> Result<Self, IndicatorError> {
        Self::new(Rc::new(AwesomeOscillator::from_series(series)?), 5)
    }
}

impl Indicator for AccelerationDeceleration {
    fn value(&self, index: usize) -> Result<Num, IndicatorError> {
        self.series().check_index(index)?;
        self.cache
            .get_or_try_insert_with(index, || Ok(self.ao.value(index)? - self.sma.value(index)?))
    }

    fn series(&self) -> &Rc<TimeSeries> {
        self.ao.series()
    }

    fn name(&self) -> String {
        format!("AccDec({})", self.sma.period())
    }
}
