//! Volatility indicators.

use std::rc::Rc;

use ta_core::{
    Indicator, IndicatorError, Num, SharedIndicator, TimeSeries, ValueCache, WindowPolicy,
};

use crate::Sma;

/// Population standard deviation over a window.
///
/// Reads the window mean from an [`Sma`] over the same upstream, so a
/// deviation built next to a band middle shares its averages.
#[derive(Debug)]
pub struct StandardDeviation {
    mean: Rc<Sma>,
    cache: ValueCache,
}

impl StandardDeviation {
    pub fn new(upstream: SharedIndicator, period: usize) -> Result<Self, IndicatorError> {
        Ok(Self::from_mean(Rc::new(Sma::new(upstream, period)?)))
    }

    /// Deviation around an existing SMA, over the SMA's window.
    pub fn from_mean(mean: Rc<Sma>) -> Self {
        Self {
            mean,
            cache: ValueCache::new(),
        }
    }

    pub fn period(&self) -> usize {
        self.mean.period()
    }
}

impl Indicator for StandardDeviation {
    fn value(&self, index: usize) -> Result<Num, IndicatorError> {
        self.series().check_index(index)?;
        self.cache.get_or_try_insert_with(index, || {
            let mean = self.mean.value(index)?;
            let window = self.mean.window(index)?;
            let count = Num::from(window.clone().count());
            let mut squares = Num::ZERO;
            for i in window {
                let diff = self.mean.upstream().value(i)? - mean;
                squares = squares + diff * diff;
            }
            Ok((squares / count).sqrt())
        })
    }

    fn series(&self) -> &Rc<TimeSeries> {
        self.mean.series()
    }

    fn name(&self) -> String {
        format!("StdDev({})", self.period())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Upper,
    Lower,
}

/// Upper or lower Bollinger band: `middle ± k·deviation`.
#[derive(Debug)]
pub struct BollingerBand {
    middle: Rc<Sma>,
    deviation: Rc<StandardDeviation>,
    k: Num,
    side: Side,
    cache: ValueCache,
}

impl BollingerBand {
    fn new(middle: Rc<Sma>, deviation: Rc<StandardDeviation>, k: Num, side: Side) -> Self {
        Self {
            middle,
            deviation,
            k,
            side,
            cache: ValueCache::new(),
        }
    }
}

impl Indicator for BollingerBand {
    fn value(&self, index: usize) -> Result<Num, IndicatorError> {
        self.series().check_index(index)?;
        self.cache.get_or_try_insert_with(index, || {
            let middle = self.middle.value(index)?;
            let offset = self.k * self.deviation.value(index)?;
            Ok(match self.side {
                Side::Upper => middle + offset,
                Side::Lower => middle - offset,
            })
        })
    }

    fn series(&self) -> &Rc<TimeSeries> {
        self.middle.series()
    }

    fn name(&self) -> String {
        let side = match self.side {
            Side::Upper => "Upper",
            Side::Lower => "Lower",
        };
        format!("BB{}({}, {})", side, self.middle.period(), self.k)
    }
}

/// Bandwidth: `(upper − lower) / middle · 100`. NaN when the middle is zero.
#[derive(Debug)]
pub struct BollingerBandWidth {
    upper: Rc<BollingerBand>,
    lower: Rc<BollingerBand>,
    middle: Rc<Sma>,
    cache: ValueCache,
}

impl Indicator for BollingerBandWidth {
    fn value(&self, index: usize) -> Result<Num, IndicatorError> {
        self.series().check_index(index)?;
        self.cache.get_or_try_insert_with(index, || {
            let spread = self.upper.value(index)? - self.lower.value(index)?;
            Ok(spread / self.middle.value(index)? * Num::HUNDRED)
        })
    }

    fn series(&self) -> &Rc<TimeSeries> {
        self.middle.series()
    }

    fn name(&self) -> String {
        format!("BBWidth({})", self.middle.period())
    }
}

/// %B: where the upstream value sits between the bands,
/// `(value − lower) / (upper − lower)`. NaN when the bands coincide.
#[derive(Debug)]
pub struct PercentB {
    upstream: SharedIndicator,
    upper: Rc<BollingerBand>,
    lower: Rc<BollingerBand>,
    cache: ValueCache,
}

impl Indicator for PercentB {
    fn value(&self, index: usize) -> Result<Num, IndicatorError> {
        self.series().check_index(index)?;
        self.cache.get_or_try_insert_with(index, || {
            let lower = self.lower.value(index)?;
            let upper = self.upper.value(index)?;
            Ok((self.upstream.value(index)? - lower) / (upper - lower))
        })
    }

    fn series(&self) -> &Rc<TimeSeries> {
        self.upstream.series()
    }

    fn name(&self) -> String {
        format!("%B({})", self.upper.middle.period())
    }
}

/// Bollinger bands over one upstream indicator.
///
/// Builds a single SMA and a single deviation and hands out the band
/// indicators that share them.
///
/// # Example
///
/// ```ignore
/// let close: SharedIndicator = Rc::new(ClosePrice::new(series));
/// let bands = BollingerBands::new(close, 20, Num::TWO)?;
/// let upper = bands.upper();
/// ```
#[derive(Debug)]
pub struct BollingerBands {
    middle: Rc<Sma>,
    deviation: Rc<StandardDeviation>,
    upper: Rc<BollingerBand>,
    lower: Rc<BollingerBand>,
    upstream: SharedIndicator,
    k: Num,
}

impl BollingerBands {
    pub fn new(upstream: SharedIndicator, period: usize, k: Num) -> Result<Self, IndicatorError> {
        Self::with_policy(upstream, period, k, WindowPolicy::default())
    }

    pub fn with_policy(
        upstream: SharedIndicator,
        period: usize,
        k: Num,
        policy: WindowPolicy,
    ) -> Result<Self, IndicatorError> {
        if k.is_nan() || k.is_negative() {
            return Err(IndicatorError::InvalidParameter(format!(
                "Bollinger multiplier must be non-negative, got {k}"
            )));
        }
        let middle = Rc::new(Sma::new(upstream.clone(), period)?.with_policy(policy));
        let deviation = Rc::new(StandardDeviation::from_mean(middle.clone()));
        let upper = Rc::new(BollingerBand::new(middle.clone(), deviation.clone(), k, Side::Upper));
        let lower = Rc::new(BollingerBand::new(middle.clone(), deviation.clone(), k, Side::Lower));
        Ok(Self {
            middle,
            deviation,
            upper,
            lower,
            upstream,
            k,
        })
    }

    pub fn k(&self) -> Num {
        self.k
    }

    pub fn middle(&self) -> SharedIndicator {
        self.middle.clone()
    }

    pub fn deviation(&self) -> SharedIndicator {
        self.deviation.clone()
    }

    pub fn upper(&self) -> SharedIndicator {
        self.upper.clone()
    }

    pub fn lower(&self) -> SharedIndicator {
        self.lower.clone()
    }

    pub fn width(&self) -> SharedIndicator {
        Rc::new(BollingerBandWidth {
            upper: self.upper.clone(),
            lower: self.lower.clone(),
            middle: self.middle.clone(),
            cache: ValueCache::new(),
        })
    }

    pub fn percent_b(&self) -> SharedIndicator {
        Rc::new(PercentB {
            upstream: self.upstream.clone(),
            upper: self.upper.clone(),
            lower: self.lower.clone(),
            cache: ValueCache::new(),
        })
    }
}
