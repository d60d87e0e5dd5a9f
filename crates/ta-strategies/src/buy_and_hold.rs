//! Buy-and-hold: enter at the first stable index, never exit.

use ta_rules::BooleanRule;

use crate::RuleStrategy;

/// Its only trade stays open, so criteria see no trades under
/// [`OpenTradePolicy::Exclude`](ta_core::OpenTradePolicy) and the full-series
/// buy-and-hold trade under `CloseAtLastPrice`.
pub fn buy_and_hold() -> RuleStrategy {
    RuleStrategy::new("Buy And Hold", BooleanRule::TRUE, BooleanRule::FALSE)
        .with_description("Enters once and never exits; score with close_at_last_price")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta_core::{Num, Strategy, TradingRecord};

    #[test]
    fn test_buy_and_hold_never_exits() {
        let strategy = buy_and_hold();
        let mut record = TradingRecord::default();

        assert!(strategy.should_operate(0, &record).unwrap());
        record.enter(0, Num::from(10), Num::ONE).unwrap();
        for index in 1..3 {
            assert!(!strategy.should_operate(index, &record).unwrap());
        }
    }
}
