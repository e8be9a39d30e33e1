//! Inbound (driving) ports: how data sources and strategies call the engine.

pub mod engine;
pub mod strategy;

pub use engine::{Tickable, TradeRequester};
pub use strategy::TradingStrategy;
