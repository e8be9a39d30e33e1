//! Strategy port.

use std::sync::Arc;

use super::engine::TradeRequester;
use crate::port::outbound::callback::Callback;

/// A trading strategy driven by data-source events.
///
/// The engine owns registered strategies for its whole lifetime. A strategy
/// learns about market data through the callback object it hands out, and
/// reacts through the [`TradeRequester`] it receives at registration.
pub trait TradingStrategy: Send {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Callback object subscribed to the active data source.
    ///
    /// Called once, at registration.
    fn callback(&self) -> Box<dyn Callback>;

    /// Whether the strategy has pending state to acknowledge this cycle.
    fn ticked(&self) -> bool;

    /// Clear the ticked flag.
    fn reset(&mut self);

    /// Receive the capability used to request trades.
    fn set_engine(&mut self, engine: Arc<dyn TradeRequester>);
}
