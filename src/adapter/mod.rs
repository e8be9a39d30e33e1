//! Adapters connecting ports to the outside world.
//!
//! - [`inbound`] - Command-line interface driving the engine
//! - [`outbound`] - Data sources, risk and execution implementations
//! - [`strategy`] - Built-in trading strategies

pub mod inbound;
pub mod outbound;
pub mod strategy;
