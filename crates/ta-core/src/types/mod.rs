//! Core data types: ticks, series, orders, trades and the trading record.

mod order;
mod policy;
mod series;
mod tick;
mod trading_record;

pub use order::{Order, OrderType, Trade, TradeDirection};
pub use policy::{OpenTradePolicy, WindowPolicy};
pub use series::TimeSeries;
pub use tick::Tick;
pub use trading_record::TradingRecord;
