use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use ta_analysis::{
    CashFlow, NumberOfTradesCriterion, TotalProfitCriterion, VersusBuyAndHoldCriterion,
};
use ta_core::{AnalysisCriterion, Num, Tick, TimeSeries, TradeDirection, TradingRecord};

fn series(closes: &[i64]) -> TimeSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let ticks = closes.iter().enumerate().map(|(i, &c)| {
        let c = Num::from(c);
        Tick::new(Duration::days(1), start + Duration::days(i as i64), c, c, c, c, Num::ZERO)
    });
    TimeSeries::from_ticks("PROP", ticks).unwrap()
}

fn record(series: &TimeSeries, indices: &[usize]) -> TradingRecord {
    let mut record = TradingRecord::new(TradeDirection::Long);
    for &i in indices {
        record.operate(i, series.tick(i).unwrap().close(), Num::ONE).unwrap();
    }
    record
}

/// Strictly increasing operation indices inside `0..len`.
fn operations(len: usize) -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::btree_set(0..len, 0..len.min(8)).prop_map(|set| set.into_iter().collect())
}

fn closes_and_operations() -> impl Strategy<Value = (Vec<i64>, Vec<usize>)> {
    proptest::collection::vec(1i64..500, 2..30)
        .prop_flat_map(|closes| {
            let len = closes.len();
            (Just(closes), operations(len))
        })
}

proptest! {
    #[test]
    fn cash_flow_starts_at_one((closes, ops) in closes_and_operations()) {
        let series = series(&closes);
        let flow = CashFlow::new(&series, &record(&series, &ops)).unwrap();
        prop_assert_eq!(flow.value(0).unwrap(), Num::ONE);
        prop_assert_eq!(flow.values().len(), closes.len());
    }

    #[test]
    fn closed_trade_scales_value_by_price_ratio((closes, ops) in closes_and_operations()) {
        let series = series(&closes);
        let record = record(&series, &ops);
        let flow = CashFlow::new(&series, &record).unwrap();
        let values = flow.values();

        for trade in record.trades() {
            let entry = trade.entry();
            let exit = trade.exit().unwrap();
            let expected = values[entry.index] * trade.ratio_at(exit.price);
            prop_assert_eq!(values[exit.index], expected);
        }
    }

    #[test]
    fn cash_flow_is_flat_outside_trades((closes, ops) in closes_and_operations()) {
        let series = series(&closes);
        let record = record(&series, &ops);
        let values = CashFlow::new(&series, &record).unwrap().values();

        let inside = |i: usize| {
            record.trades().iter().any(|t| {
                t.entry().index < i && t.exit().is_some_and(|exit| i <= exit.index)
            })
        };
        for i in 1..values.len() {
            if !inside(i) {
                prop_assert_eq!(values[i], values[i - 1]);
            }
        }
    }

    #[test]
    fn trade_count_matches_record((closes, ops) in closes_and_operations()) {
        let series = series(&closes);
        let record = record(&series, &ops);
        let count = NumberOfTradesCriterion::new().calculate(&series, &record).unwrap();
        prop_assert_eq!(count, Num::from(ops.len() / 2));
    }
}

#[test]
fn versus_buy_and_hold_of_buy_and_hold_is_one() {
    let series = series(&[10, 11, 9, 12, 8, 13]);
    let bh = record(&series, &[0, 5]);
    let versus = VersusBuyAndHoldCriterion::new(TotalProfitCriterion::new());
    assert_eq!(versus.calculate(&series, &bh).unwrap(), Num::ONE);
}
