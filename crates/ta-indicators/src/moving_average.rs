//! Moving average indicators.

use std::rc::Rc;

use ta_core::{
    Indicator, IndicatorError, Num, SharedIndicator, TimeSeries, ValueCache, WindowPolicy,
};

use crate::{check_period, window_start};

/// Simple Moving Average (SMA).
///
/// Arithmetic mean of the last `period` upstream values ending at the
/// requested index.
#[derive(Debug)]
pub struct Sma {
    upstream: SharedIndicator,
    period: usize,
    policy: WindowPolicy,
    cache: ValueCache,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(upstream: SharedIndicator, period: usize) -> Result<Self, IndicatorError> {
        check_period("SMA", period)?;
        Ok(Self {
            upstream,
            period,
            policy: WindowPolicy::default(),
            cache: ValueCache::new(),
        })
    }

    /// Set how the first `period - 1` indices are handled.
    pub fn with_policy(mut self, policy: WindowPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn policy(&self) -> WindowPolicy {
        self.policy
    }

    pub fn upstream(&self) -> &SharedIndicator {
        &self.upstream
    }

    /// Index range of the window averaged at `index`.
    pub(crate) fn window(
        &self,
        index: usize,
    ) -> Result<std::ops::RangeInclusive<usize>, IndicatorError> {
        let start = window_start(self.series().begin_index(), index, self.period, self.policy)?;
        Ok(start..=index)
    }
}

impl Indicator for Sma {
    fn value(&self, index: usize) -> Result<Num, IndicatorError> {
        self.series().check_index(index)?;
        self.cache.get_or_try_insert_with(index, || {
            let window = self.window(index)?;
            let count = Num::from(window.clone().count());
            let mut sum = Num::ZERO;
            for i in window {
                sum = sum + self.upstream.value(i)?;
            }
            Ok(sum / count)
        })
    }

    fn series(&self) -> &Rc<TimeSeries> {
        self.upstream.series()
    }

    fn name(&self) -> String {
        format!("SMA({})", self.period)
    }
}

/// Exponential Moving Average (EMA).
///
/// `EMA[begin] = value[begin]`, then `EMA[i] = EMA[i-1] + α·(value[i] − EMA[i-1])`
/// with `α = 2 / (period + 1)`.
///
/// A request fills forward from the most recent cached index, so deep
/// indices never recurse.
#[derive(Debug)]
pub struct Ema {
    upstream: SharedIndicator,
    period: usize,
    multiplier: Num,
    policy: WindowPolicy,
    cache: ValueCache,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(upstream: SharedIndicator, period: usize) -> Result<Self, IndicatorError> {
        check_period("EMA", period)?;
        let multiplier = Num::TWO / Num::from(period + 1);
        Ok(Self {
            upstream,
            period,
            multiplier,
            policy: WindowPolicy::default(),
            cache: ValueCache::new(),
        })
    }

    /// Under [`WindowPolicy::Strict`] the first `period - 1` indices fail.
    pub fn with_policy(mut self, policy: WindowPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Smoothing factor α.
    pub fn multiplier(&self) -> Num {
        self.multiplier
    }
}

impl Indicator for Ema {
    fn value(&self, index: usize) -> Result<Num, IndicatorError> {
        let series = self.series();
        series.check_index(index)?;
        let begin = series.begin_index();
        // Strict check comes before the cache: seeded values below the
        // window are cached but must not be handed out.
        window_start(begin, index, self.period, self.policy)?;

        if let Some(value) = self.cache.get(index) {
            return Ok(value);
        }

        let (mut i, mut ema) = match self.cache.last_cached(begin, index) {
            Some(found) => found,
            None => {
                let seed = self.upstream.value(begin)?;
                self.cache.insert(begin, seed);
                (begin, seed)
            }
        };
        while i < index {
            i += 1;
            let value = self.upstream.value(i)?;
            ema = ema + self.multiplier * (value - ema);
            self.cache.insert(i, ema);
        }
        Ok(ema)
    }

    fn series(&self) -> &Rc<TimeSeries> {
        self.upstream.series()
    }

    fn name(&self) -> String {
        format!("EMA({})", self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{num, series_of};
    use crate::ClosePrice;
    use proptest::prelude::*;
    use std::cell::Cell;

    fn close(closes: &[&str]) -> SharedIndicator {
        Rc::new(ClosePrice::new(series_of(closes)))
    }

    /// Close price that counts upstream evaluations.
    struct Counting {
        inner: ClosePrice,
        calls: Rc<Cell<usize>>,
    }

    impl Indicator for Counting {
        fn value(&self, index: usize) -> Result<Num, IndicatorError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.value(index)
        }

        fn series(&self) -> &Rc<TimeSeries> {
            self.inner.series()
        }

        fn name(&self) -> String {
            "Counting".to_string()
        }
    }

    #[test]
    fn test_sma() {
        let sma = Sma::new(close(&["1", "2", "3", "4", "5"]), 3).unwrap();
        assert_eq!(sma.value(2).unwrap(), num("2"));
        assert_eq!(sma.value(3).unwrap(), num("3"));
        assert_eq!(sma.value(4).unwrap(), num("4"));
    }

    #[test]
    fn test_sma_shrinks_early_window() {
        let sma = Sma::new(close(&["10", "11", "9", "12", "8", "13"]), 2).unwrap();
        let expected: Vec<Num> = ["10", "10.5", "10", "10.5", "10", "10.5"]
            .iter()
            .map(|s| num(s))
            .collect();
        assert_eq!(sma.values().unwrap(), expected);
    }

    #[test]
    fn test_sma_strict_policy() {
        let sma = Sma::new(close(&["1", "2", "3"]), 3)
            .unwrap()
            .with_policy(WindowPolicy::Strict);
        assert_eq!(
            sma.value(1).unwrap_err(),
            IndicatorError::InsufficientData {
                index: 1,
                required: 3,
                available: 2
            }
        );
        assert_eq!(sma.value(2).unwrap(), num("2"));
    }

    #[test]
    fn test_sma_zero_period() {
        assert!(matches!(
            Sma::new(close(&["1"]), 0),
            Err(IndicatorError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_sma_is_memoized() {
        let calls = Rc::new(Cell::new(0));
        let upstream = Rc::new(Counting {
            inner: ClosePrice::new(series_of(&["1", "2", "3", "4"])),
            calls: calls.clone(),
        });
        let sma = Sma::new(upstream, 2).unwrap();

        let first = sma.value(3).unwrap();
        let after_first = calls.get();
        assert_eq!(sma.value(3).unwrap(), first);
        assert_eq!(calls.get(), after_first);
    }

    #[test]
    fn test_ema() {
        // α = 0.5
        let ema = Ema::new(close(&["1", "2", "3", "4", "5"]), 3).unwrap();
        assert_eq!(ema.multiplier(), num("0.5"));
        assert_eq!(ema.value(0).unwrap(), num("1"));
        assert_eq!(ema.value(1).unwrap(), num("1.5"));
        assert_eq!(ema.value(2).unwrap(), num("2.25"));
        assert_eq!(ema.value(4).unwrap(), num("4.0625"));
    }

    #[test]
    fn test_ema_evaluates_upstream_once_per_index() {
        let calls = Rc::new(Cell::new(0));
        let upstream = Rc::new(Counting {
            inner: ClosePrice::new(series_of(&["1", "2", "3", "4", "5", "6"])),
            calls: calls.clone(),
        });
        let ema = Ema::new(upstream, 4).unwrap();

        ema.value(2).unwrap();
        assert_eq!(calls.get(), 3);
        ema.value(5).unwrap();
        assert_eq!(calls.get(), 6);
        ema.value(4).unwrap();
        assert_eq!(calls.get(), 6);
    }

    #[test]
    fn test_ema_deep_index_does_not_recurse() {
        let closes: Vec<String> = (0..20_000).map(|i| (100 + i % 7).to_string()).collect();
        let refs: Vec<&str> = closes.iter().map(String::as_str).collect();
        let ema = Ema::new(close(&refs), 10).unwrap();
        assert!(!ema.value(19_999).unwrap().is_nan());
    }

    #[test]
    fn test_ema_strict_policy() {
        let ema = Ema::new(close(&["1", "2", "3"]), 2)
            .unwrap()
            .with_policy(WindowPolicy::Strict);
        ema.value(2).unwrap();
        // index 0 is cached as the seed but still refused
        assert!(matches!(
            ema.value(0),
            Err(IndicatorError::InsufficientData { .. })
        ));
        assert_eq!(ema.value(1).unwrap(), num("1.66666666666666666667"));
    }

    proptest! {
        #[test]
        fn constant_series_averages_to_the_constant(
            units in 1i64..100_000,
            len in 1usize..40,
            period in 1usize..12,
        ) {
            let value = Num::from(units) / Num::from(100);
            let text = value.to_string();
            let closes = vec![text.as_str(); len];
            let upstream = close(&closes);
            let sma = Sma::new(upstream.clone(), period).unwrap();
            let ema = Ema::new(upstream, period).unwrap();
            for i in 0..len {
                prop_assert_eq!(sma.value(i).unwrap(), value);
                prop_assert_eq!(ema.value(i).unwrap(), value);
            }
        }
    }
}
