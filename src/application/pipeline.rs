//! Request pipeline: risk → execution → risk bookkeeping.
//!
//! Every trade request flows through [`RequestPipeline::request`]:
//!
//! 1. Halted engine: a failed response is produced without touching any
//!    collaborator.
//! 2. Risk evaluates the request and sets `risk_check`.
//! 3. Approved responses go to execution; its result is handed back to risk
//!    via `update`. Rejected responses get no update.
//! 4. Exactly one of the success/failure callbacks fires.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::domain::{Side, TradeRequest, TradeResponse};
use crate::error::Result;
use crate::port::outbound::{OrderExecutor, RiskGate};

/// Owns the risk and execution collaborators plus the trading flag.
pub struct RequestPipeline {
    risk: Box<dyn RiskGate>,
    execution: Box<dyn OrderExecutor>,
    trading: AtomicBool,
}

impl RequestPipeline {
    /// Create a pipeline in the running state.
    pub fn new(risk: Box<dyn RiskGate>, execution: Box<dyn OrderExecutor>) -> Self {
        Self {
            risk,
            execution,
            trading: AtomicBool::new(true),
        }
    }

    pub fn risk(&self) -> &dyn RiskGate {
        self.risk.as_ref()
    }

    pub fn execution(&self) -> &dyn OrderExecutor {
        self.execution.as_ref()
    }

    #[must_use]
    pub fn is_trading(&self) -> bool {
        self.trading.load(Ordering::SeqCst)
    }

    pub fn set_trading(&self, trading: bool) {
        self.trading.store(trading, Ordering::SeqCst);
    }

    /// Route a request and dispatch the outcome to one callback.
    ///
    /// # Errors
    ///
    /// Returns collaborator errors unchanged; no callback fires in that case.
    pub fn request(
        &self,
        side: Side,
        request: TradeRequest,
        on_success: &mut dyn FnMut(&TradeResponse),
        on_failure: Option<&mut dyn FnMut(&TradeResponse)>,
    ) -> Result<TradeResponse> {
        let response = self.route(side, request)?;
        dispatch(&response, on_success, on_failure);
        Ok(response)
    }

    /// Run the risk/execution steps without dispatching callbacks.
    ///
    /// # Errors
    ///
    /// Returns collaborator errors unchanged.
    pub fn route(&self, side: Side, request: TradeRequest) -> Result<TradeResponse> {
        if !self.is_trading() {
            debug!(side = %side, instrument = %request.instrument, "Trading halted, request refused");
            return Ok(TradeResponse::halted(request));
        }

        let response = match side {
            Side::Buy => self.risk.request_buy(request)?,
            Side::Sell => self.risk.request_sell(request)?,
        };

        if !response.risk_check {
            warn!(
                side = %side,
                instrument = %response.instrument,
                reason = response.risk_reason.as_deref().unwrap_or("unspecified"),
                "Risk rejected"
            );
            return Ok(response);
        }

        let response = match side {
            Side::Buy => self.execution.request_buy(response)?,
            Side::Sell => self.execution.request_sell(response)?,
        };
        self.risk.update(&response)?;

        info!(
            side = %side,
            instrument = %response.instrument,
            volume = %response.volume,
            price = %response.price,
            success = response.success,
            order_id = ?response.order_id,
            "Execution completed"
        );
        Ok(response)
    }
}

/// Invoke `on_failure` when supplied and the response failed, otherwise
/// `on_success`.
pub fn dispatch(
    response: &TradeResponse,
    on_success: &mut dyn FnMut(&TradeResponse),
    on_failure: Option<&mut dyn FnMut(&TradeResponse)>,
) {
    match on_failure {
        Some(on_failure) if !response.success => on_failure(response),
        _ => on_success(response),
    }
}
