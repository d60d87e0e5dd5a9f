//! Trading rules.
//!
//! A rule answers, for one series index and optionally the trading record
//! of the current run, whether a condition holds. Rules compose:
//! - Combinators (and, or, xor, not) through [`RuleExt`]
//! - Crossings of one indicator over another
//! - Comparisons (over, under, in-pipe)
//! - Stops that read the entry price of the open trade
//!
//! Every evaluation emits a TRACE event with the rule name, index and
//! outcome.

mod boolean;
mod combinators;
mod comparison;
mod crossed;
mod stop;

pub use boolean::BooleanRule;
pub use combinators::{AndRule, NotRule, OrRule, RuleExt, XorRule};
pub use comparison::{InPipeRule, OverIndicatorRule, UnderIndicatorRule};
pub use crossed::{CrossedDownIndicatorRule, CrossedUpIndicatorRule};
pub use stop::{StopGainRule, StopLossRule};

pub(crate) fn trace_is_satisfied(name: &str, index: usize, satisfied: bool) -> bool {
    tracing::trace!(rule = name, index, satisfied, "rule evaluated");
    satisfied
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::rc::Rc;

    use chrono::{Duration, TimeZone, Utc};
    use ta_core::{Num, SharedIndicator, Tick, TimeSeries};
    use ta_indicators::ClosePrice;

    pub fn series_of(closes: &[i64]) -> Rc<TimeSeries> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ticks = closes.iter().enumerate().map(|(i, &c)| {
            let c = Num::from(c);
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

    pub fn close_of(closes: &[i64]) -> SharedIndicator {
        Rc::new(ClosePrice::new(series_of(closes)))
    }
}
