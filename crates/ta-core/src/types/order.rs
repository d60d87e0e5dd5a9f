//! Orders and trades.

use serde::{Deserialize, Serialize};

use crate::num::Num;

/// Whether an order opens or closes a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Entry,
    Exit,
}

impl OrderType {
    /// Get the complementary order type.
    pub fn complement(&self) -> Self {
        match self {
            OrderType::Entry => OrderType::Exit,
            OrderType::Exit => OrderType::Entry,
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Entry => write!(f, "ENTRY"),
            OrderType::Exit => write!(f, "EXIT"),
        }
    }
}

/// Direction of the trades held in a trading record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    /// Entry buys, exit sells
    #[default]
    Long,
    /// Entry sells, exit buys back
    Short,
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeDirection::Long => write!(f, "LONG"),
            TradeDirection::Short => write!(f, "SHORT"),
        }
    }
}

/// An executed order. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Entry or exit
    pub order_type: OrderType,
    /// Series index the order was executed at
    pub index: usize,
    /// Execution price
    pub price: Num,
    /// Traded amount
    pub amount: Num,
}

impl Order {
    pub fn entry(index: usize, price: Num, amount: Num) -> Self {
        Self {
            order_type: OrderType::Entry,
            index,
            price,
            amount,
        }
    }

    pub fn exit(index: usize, price: Num, amount: Num) -> Self {
        Self {
            order_type: OrderType::Exit,
            index,
            price,
            amount,
        }
    }
}

/// An entry order and, once closed, its exit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    direction: TradeDirection,
    entry: Order,
    exit: Option<Order>,
}

impl Trade {
    /// Open a trade with its entry order.
    pub fn open(direction: TradeDirection, entry: Order) -> Self {
        Self {
            direction,
            entry,
            exit: None,
        }
    }

    /// A trade with both orders.
    pub fn closed(direction: TradeDirection, entry: Order, exit: Order) -> Self {
        Self {
            direction,
            entry,
            exit: Some(exit),
        }
    }

    pub(crate) fn close(&mut self, exit: Order) {
        self.exit = Some(exit);
    }

    pub fn direction(&self) -> TradeDirection {
        self.direction
    }

    pub fn entry(&self) -> &Order {
        &self.entry
    }

    pub fn exit(&self) -> Option<&Order> {
        self.exit.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.exit.is_none()
    }

    pub fn is_closed(&self) -> bool {
        self.exit.is_some()
    }

    /// Price ratio of a move from the entry price to `price`, from the
    /// position's point of view: `price / entry` long, `entry / price` short.
    pub fn ratio_at(&self, price: Num) -> Num {
        match self.direction {
            TradeDirection::Long => price / self.entry.price,
            TradeDirection::Short => self.entry.price / price,
        }
    }

    /// Realized profit ratio, `None` while the trade is open.
    pub fn profit_ratio(&self) -> Option<Num> {
        self.exit.map(|exit| self.ratio_at(exit.price))
    }

    /// Copy of this trade closed at `index` and `price` if it is still open.
    pub fn closed_at(&self, index: usize, price: Num) -> Trade {
        match self.exit {
            Some(_) => self.clone(),
            None => Trade::closed(
                self.direction,
                self.entry,
                Order::exit(index, price, self.entry.amount),
            ),
        }
    }
}
