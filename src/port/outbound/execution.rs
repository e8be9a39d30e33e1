//! Execution port.

use crate::domain::TradeResponse;
use crate::error::Result;

/// Carries risk-approved responses to the venue.
///
/// Receives the response produced by the risk gate and returns the updated
/// response (`success` set when the order went through).
pub trait OrderExecutor: Send + Sync {
    fn request_buy(&self, response: TradeResponse) -> Result<TradeResponse>;

    fn request_sell(&self, response: TradeResponse) -> Result<TradeResponse>;
}
