//! Outbound ports (driven side): collaborators the engine calls.

pub mod callback;
pub mod exchange;
pub mod execution;
pub mod risk;

pub use callback::{deliver, Callback, CallbackOptions, Print};
pub use exchange::{Backtest, Exchange};
pub use execution::OrderExecutor;
pub use risk::RiskGate;
