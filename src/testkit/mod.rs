//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`spy`] - Call-counting [`RiskGate`](crate::port::outbound::RiskGate) and
//!   [`OrderExecutor`](crate::port::outbound::OrderExecutor) implementations.
//! - [`strategy`] - `FlagStrategy` with an externally controlled ticked flag,
//!   and `RecordingCallback`.
//! - [`source`] - `ScriptedSource`, an in-memory exchange/backtest spy.
//! - [`domain`] - Builders for requests and events.

pub mod domain;
pub mod source;
pub mod spy;
pub mod strategy;

pub use domain::{buy_request, instrument, sell_request, trade_event};
pub use source::ScriptedSource;
pub use spy::{SpyExecution, SpyRisk};
pub use strategy::{FlagTracker, FlagStrategy, RecordingCallback};
