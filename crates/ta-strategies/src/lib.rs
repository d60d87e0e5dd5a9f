//! Trading strategy implementations.
//!
//! Every strategy here is a [`RuleStrategy`]: an entry rule and an exit rule
//! over indicators built on one series. The presets are:
//! - Moving Average Crossover
//! - Mean Reversion (Bollinger Bands)
//! - Momentum (MACD)
//! - SMA crossover with stop-loss/stop-gain exits
//! - Buy and hold

mod buy_and_hold;
mod ma_crossover;
mod mean_reversion;
mod momentum;
mod registry;
mod rule_strategy;
mod sma_stops;

pub use buy_and_hold::buy_and_hold;
pub use ma_crossover::{ma_crossover, MACrossoverConfig};
pub use mean_reversion::{mean_reversion, MeanReversionConfig};
pub use momentum::{momentum, MomentumConfig};
pub use registry::{StrategyInfo, StrategyRegistry};
pub use rule_strategy::RuleStrategy;
pub use sma_stops::{sma_stops, SmaStopsConfig};
