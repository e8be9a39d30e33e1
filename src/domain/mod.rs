//! Exchange-agnostic domain types.

pub mod account;
pub mod event;
pub mod id;
pub mod mode;
pub mod trade;

pub use account::Account;
pub use event::{EventKind, MarketEvent};
pub use id::{Instrument, OrderId};
pub use mode::{RunMode, TradingType};
pub use trade::{OrderType, Side, TradeRequest, TradeResponse};
