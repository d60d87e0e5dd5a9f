//! Cash flow of a trading record.

use ta_core::{Num, OpenTradePolicy, SeriesError, TimeSeries, Trade, TradingRecord};

use crate::scored_trades;

/// Value multiplier of a trading record at every index of a series.
///
/// The flow starts at 1 on the series' first index and stays flat while no
/// trade is open. While a trade is open the value is
/// `base · close[i] / entry` (long) or `base · entry / close[i]` (short),
/// where `base` is the value at the entry index. At the exit index the exit
/// price replaces the close and the result is carried forward. A trade
/// entered and exited on the same index applies its whole ratio there.
///
/// Values are produced lazily by [`CashFlow::iter`]; each call starts a
/// fresh pass.
#[derive(Debug, Clone)]
pub struct CashFlow<'a> {
    series: &'a TimeSeries,
    trades: Vec<Trade>,
}

impl<'a> CashFlow<'a> {
    /// Cash flow with the open trade excluded.
    pub fn new(series: &'a TimeSeries, record: &TradingRecord) -> Result<Self, SeriesError> {
        Self::with_policy(series, record, OpenTradePolicy::default())
    }

    pub fn with_policy(
        series: &'a TimeSeries,
        record: &TradingRecord,
        policy: OpenTradePolicy,
    ) -> Result<Self, SeriesError> {
        Ok(Self {
            series,
            trades: scored_trades(series, record, policy)?,
        })
    }

    /// Lazy `(index, value)` pairs over the series' window.
    pub fn iter(&self) -> CashFlowIter<'_> {
        let (next, end) = match self.series.index_range() {
            Some(range) => (*range.start(), Some(*range.end())),
            None => (0, None),
        };
        CashFlowIter {
            series: self.series,
            trades: &self.trades,
            next,
            end,
            trade: 0,
            base: None,
            value: Num::ONE,
        }
    }

    /// Value at `index`.
    pub fn value(&self, index: usize) -> Result<Num, SeriesError> {
        self.series.check_index(index)?;
        self.iter()
            .find(|(i, _)| *i == index)
            .map(|(_, value)| value)
            .ok_or(SeriesError::IndexOutOfRange {
                index,
                begin: self.series.begin_index(),
                end: self.series.end_index(),
            })
    }

    /// All values in index order.
    pub fn values(&self) -> Vec<Num> {
        self.iter().map(|(_, value)| value).collect()
    }

    /// Number of values, equal to the series' tick count.
    pub fn len(&self) -> usize {
        self.series.tick_count()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// One pass over a [`CashFlow`].
#[derive(Debug)]
pub struct CashFlowIter<'a> {
    series: &'a TimeSeries,
    trades: &'a [Trade],
    next: usize,
    end: Option<usize>,
    /// Index of the first trade not yet exited before `next`
    trade: usize,
    /// (trade position, value at its entry index) once inside a trade
    base: Option<(usize, Num)>,
    value: Num,
}

impl CashFlowIter<'_> {
    fn close(&self, index: usize) -> Num {
        match self.series.tick(index) {
            Ok(tick) => tick.close(),
            Err(_) => Num::NaN,
        }
    }
}

impl Iterator for CashFlowIter<'_> {
    type Item = (usize, Num);

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.end?;
        if self.next > end {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let trades = self.trades;
        while let Some(trade) = trades.get(self.trade) {
            let exit = match trade.exit() {
                Some(exit) if exit.index >= index => exit,
                _ => {
                    self.trade += 1;
                    continue;
                }
            };
            let entry = trade.entry().index;
            if entry > index || (entry == index && exit.index != index) {
                break;
            }

            let base = match self.base {
                Some((position, base)) if position == self.trade => base,
                _ => {
                    self.base = Some((self.trade, self.value));
                    self.value
                }
            };
            let price = if exit.index == index {
                exit.price
            } else {
                self.close(index)
            };
            self.value = base * trade.ratio_at(price);

            if exit.index != index {
                break;
            }
            // the next trade may enter, or even exit, on this same index
            self.trade += 1;
        }

        Some((index, self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record_at, series_of};
    use ta_core::TradeDirection;

    fn nums(values: &[&str]) -> Vec<Num> {
        values.iter().map(|v| v.parse().unwrap()).collect()
    }

    #[test]
    fn test_flat_record() {
        let series = series_of(&["1", "2", "3"]);
        let flow = CashFlow::new(&series, &TradingRecord::default()).unwrap();
        assert_eq!(flow.values(), nums(&["1", "1", "1"]));
        assert_eq!(flow.len(), 3);
    }

    #[test]
    fn test_long_trades() {
        let series = series_of(&["10", "12", "15", "15", "10", "12"]);
        let record = record_at(&series, TradeDirection::Long, &[0, 2, 3, 5]);
        let flow = CashFlow::new(&series, &record).unwrap();

        // 10→15 gives 1.5, then 15→10→12 scales by 0.8
        assert_eq!(flow.values(), nums(&["1", "1.2", "1.5", "1.5", "1", "1.2"]));
        assert_eq!(flow.value(4).unwrap(), Num::ONE);
    }

    #[test]
    fn test_short_trade() {
        let series = series_of(&["10", "8", "5"]);
        let record = record_at(&series, TradeDirection::Short, &[0, 2]);
        let flow = CashFlow::new(&series, &record).unwrap();
        assert_eq!(flow.values(), nums(&["1", "1.25", "2"]));
    }

    #[test]
    fn test_open_trade_policy() {
        let series = series_of(&["10", "20", "30"]);
        let record = record_at(&series, TradeDirection::Long, &[1]);

        let excluded = CashFlow::new(&series, &record).unwrap();
        assert_eq!(excluded.values(), nums(&["1", "1", "1"]));

        let closed =
            CashFlow::with_policy(&series, &record, OpenTradePolicy::CloseAtLastPrice).unwrap();
        assert_eq!(closed.values(), nums(&["1", "1", "1.5"]));
    }

    #[test]
    fn test_exit_uses_exit_price() {
        let series = series_of(&["10", "10", "10"]);
        let mut record = TradingRecord::default();
        record.enter(0, Num::from(10), Num::ONE).unwrap();
        record.exit(1, Num::from(11), Num::ONE).unwrap();

        let flow = CashFlow::new(&series, &record).unwrap();
        assert_eq!(flow.values(), nums(&["1", "1.1", "1.1"]));
    }

    #[test]
    fn test_back_to_back_trades() {
        let series = series_of(&["10", "20", "40"]);
        let mut record = TradingRecord::default();
        record.enter(0, Num::from(10), Num::ONE).unwrap();
        record.exit(1, Num::from(20), Num::ONE).unwrap();
        record.enter(1, Num::from(20), Num::ONE).unwrap();
        record.exit(2, Num::from(40), Num::ONE).unwrap();

        let flow = CashFlow::new(&series, &record).unwrap();
        assert_eq!(flow.values(), nums(&["1", "2", "4"]));
    }

    #[test]
    fn test_same_index_trade() {
        let series = series_of(&["10", "10", "10"]);
        let mut record = TradingRecord::default();
        record.enter(1, Num::from(10), Num::ONE).unwrap();
        record.exit(1, Num::from(11), Num::ONE).unwrap();

        let flow = CashFlow::new(&series, &record).unwrap();
        assert_eq!(flow.values(), nums(&["1", "1.1", "1.1"]));
    }

    #[test]
    fn test_same_index_trade_after_exit() {
        let series = series_of(&["10", "20", "20"]);
        let mut record = TradingRecord::default();
        record.enter(0, Num::from(10), Num::ONE).unwrap();
        record.exit(1, Num::from(20), Num::ONE).unwrap();
        record.enter(1, Num::from(20), Num::ONE).unwrap();
        record.exit(1, Num::from(25), Num::ONE).unwrap();

        // 2, then 1.25 on top within index 1
        let flow = CashFlow::new(&series, &record).unwrap();
        assert_eq!(flow.values(), nums(&["1", "2.5", "2.5"]));
    }

    #[test]
    fn test_iter_restarts() {
        let series = series_of(&["10", "12"]);
        let record = record_at(&series, TradeDirection::Long, &[0, 1]);
        let flow = CashFlow::new(&series, &record).unwrap();

        let first: Vec<_> = flow.iter().collect();
        let second: Vec<_> = flow.iter().collect();
        assert_eq!(first, second);
        assert_eq!(first[0], (0, Num::ONE));
    }

    #[test]
    fn test_value_out_of_range() {
        let series = series_of(&["10"]);
        let flow = CashFlow::new(&series, &TradingRecord::default()).unwrap();
        assert!(flow.value(1).is_err());
    }
}
