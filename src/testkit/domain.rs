//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Instrument, MarketEvent, TradeRequest};

/// Create an [`Instrument`] from a string.
pub fn instrument(id: &str) -> Instrument {
    Instrument::from(id)
}

/// A 1-unit buy of `BTC-USD` at 100.
pub fn buy_request() -> TradeRequest {
    TradeRequest::buy(instrument("BTC-USD"), dec!(1), dec!(100))
}

/// A 1-unit sell of `BTC-USD` at 100.
pub fn sell_request() -> TradeRequest {
    TradeRequest::sell(instrument("BTC-USD"), dec!(1), dec!(100))
}

/// A match event for `BTC-USD` at `price`.
pub fn trade_event(price: Decimal) -> MarketEvent {
    MarketEvent::trade(instrument("BTC-USD"), price, dec!(1))
}
