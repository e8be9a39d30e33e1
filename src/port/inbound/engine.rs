//! Engine-facing ports.

use crate::domain::{TradeRequest, TradeResponse};
use crate::error::Result;

/// Per-cycle synchronization point, invoked by the active data source after
/// each data event.
pub trait Tickable {
    fn tick(&self);
}

/// Narrow capability for issuing trade requests.
///
/// Strategies receive this instead of the engine itself, so they can request
/// trades without owning (or even borrowing) their owner.
///
/// Exactly one of `on_success` / `on_failure` fires per call: `on_failure`
/// when it is supplied and the final response failed, `on_success` otherwise.
/// The final response is also returned. Collaborator errors are returned as
/// `Err` and fire no callback.
pub trait TradeRequester: Send + Sync {
    fn request_buy(
        &self,
        request: TradeRequest,
        on_success: &mut dyn FnMut(&TradeResponse),
        on_failure: Option<&mut dyn FnMut(&TradeResponse)>,
    ) -> Result<TradeResponse>;

    fn request_sell(
        &self,
        request: TradeRequest,
        on_success: &mut dyn FnMut(&TradeResponse),
        on_failure: Option<&mut dyn FnMut(&TradeResponse)>,
    ) -> Result<TradeResponse>;
}
