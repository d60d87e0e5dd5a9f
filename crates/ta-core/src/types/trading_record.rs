//! Trading record: the FLAT/OPEN state machine behind a strategy run.

use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::num::Num;

use super::{Order, OrderType, Trade, TradeDirection};

/// Ordered outcome of running a strategy: closed trades plus the currently
/// open trade, if any.
///
/// Orders strictly alternate ENTRY, EXIT, ENTRY, ... Any operation that would
/// break the alternation, or record an order at an index earlier than the
/// previous one, is rejected with a [`StateError`] and leaves the record
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingRecord {
    direction: TradeDirection,
    trades: Vec<Trade>,
    current: Option<Trade>,
}

impl TradingRecord {
    /// Create an empty record whose trades go in `direction`.
    pub fn new(direction: TradeDirection) -> Self {
        Self {
            direction,
            trades: Vec::new(),
            current: None,
        }
    }

    pub fn direction(&self) -> TradeDirection {
        self.direction
    }

    /// True while a trade is open.
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// True when no trade is open.
    pub fn is_flat(&self) -> bool {
        self.current.is_none()
    }

    /// The currently open trade.
    pub fn current_trade(&self) -> Option<&Trade> {
        self.current.as_ref()
    }

    /// Closed trades in order.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Number of closed trades.
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    /// Every order in execution order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.trades
            .iter()
            .chain(self.current.iter())
            .flat_map(|t| std::iter::once(t.entry()).chain(t.exit()))
    }

    pub fn last_order(&self) -> Option<&Order> {
        match &self.current {
            Some(open) => Some(open.entry()),
            None => self.trades.last().and_then(Trade::exit),
        }
    }

    pub fn last_entry(&self) -> Option<&Order> {
        self.current
            .as_ref()
            .or(self.trades.last())
            .map(Trade::entry)
    }

    pub fn last_exit(&self) -> Option<&Order> {
        self.trades.last().and_then(Trade::exit)
    }

    fn check_order_index(&self, index: usize) -> Result<(), StateError> {
        match self.last_order() {
            Some(last) if index < last.index => Err(StateError::OutOfOrder {
                index,
                last: last.index,
            }),
            _ => Ok(()),
        }
    }

    /// Record an entry order opening a new trade.
    pub fn enter(&mut self, index: usize, price: Num, amount: Num) -> Result<&Order, StateError> {
        if let Some(open) = &self.current {
            return Err(StateError::DoubleEntry {
                index,
                open_since: open.entry().index,
            });
        }
        self.check_order_index(index)?;

        let trade = self
            .current
            .insert(Trade::open(self.direction, Order::entry(index, price, amount)));
        Ok(trade.entry())
    }

    /// Record an exit order closing the open trade.
    pub fn exit(&mut self, index: usize, price: Num, amount: Num) -> Result<&Order, StateError> {
        if self.current.is_none() {
            return Err(StateError::NoOpenTrade { index });
        }
        self.check_order_index(index)?;

        let mut trade = match self.current.take() {
            Some(trade) => trade,
            None => return Err(StateError::NoOpenTrade { index }),
        };
        trade.close(Order::exit(index, price, amount));
        self.trades.push(trade);

        let closed = &self.trades[self.trades.len() - 1];
        closed.exit().ok_or(StateError::NoOpenTrade { index })
    }

    /// Enter when flat, exit when open.
    pub fn operate(&mut self, index: usize, price: Num, amount: Num) -> Result<&Order, StateError> {
        match self.next_order_type() {
            OrderType::Entry => self.enter(index, price, amount),
            OrderType::Exit => self.exit(index, price, amount),
        }
    }

    /// The type the next recorded order must have.
    pub fn next_order_type(&self) -> OrderType {
        if self.is_open() {
            OrderType::Exit
        } else {
            OrderType::Entry
        }
    }
}

impl Default for TradingRecord {
    fn default() -> Self {
        Self::new(TradeDirection::Long)
    }
}
