//! Built-in trading strategies.
//!
//! Strategies implement [`TradingStrategy`](crate::port::inbound::TradingStrategy)
//! and are selected by name from the `[strategies]` config section.

pub mod sma_cross;

pub use sma_cross::{CrossSignal, PriceWindow, SmaCrossConfig, SmaCrossStrategy};
