//! Risk port for trade validation.

use crate::domain::{TradeRequest, TradeResponse};
use crate::error::Result;

/// Risk gate that approves or rejects requests before execution.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`); bookkeeping uses
///   interior mutability
/// - The returned response carries `risk_check`; only approved responses are
///   forwarded to execution
/// - `update` is called exactly once for each forwarded response, with the
///   execution result, and never for rejected ones
pub trait RiskGate: Send + Sync {
    fn request_buy(&self, request: TradeRequest) -> Result<TradeResponse>;

    fn request_sell(&self, request: TradeRequest) -> Result<TradeResponse>;

    /// Book the outcome of an executed response.
    fn update(&self, response: &TradeResponse) -> Result<()>;
}
