//! Capability handle given to strategies.

use std::sync::{Arc, Weak};

use tracing::warn;

use crate::domain::{Side, TradeRequest, TradeResponse};
use crate::error::Result;
use crate::port::inbound::TradeRequester;

use super::pipeline::{dispatch, RequestPipeline};

/// Non-owning handle to an engine's request pipeline.
///
/// Exposes only trade requests. Once the engine is dropped, requests resolve
/// to a halted response (delivered through the failure path) instead of
/// keeping the engine alive.
#[derive(Clone)]
pub struct EngineHandle {
    pipeline: Weak<RequestPipeline>,
}

impl EngineHandle {
    pub(crate) fn new(pipeline: &Arc<RequestPipeline>) -> Self {
        Self {
            pipeline: Arc::downgrade(pipeline),
        }
    }

    /// Whether the owning engine still exists.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.pipeline.strong_count() > 0
    }

    fn request(
        &self,
        side: Side,
        request: TradeRequest,
        on_success: &mut dyn FnMut(&TradeResponse),
        on_failure: Option<&mut dyn FnMut(&TradeResponse)>,
    ) -> Result<TradeResponse> {
        match self.pipeline.upgrade() {
            Some(pipeline) => pipeline.request(side, request, on_success, on_failure),
            None => {
                warn!(side = %side, instrument = %request.instrument, "Engine dropped, request refused");
                let response = TradeResponse::halted(request);
                dispatch(&response, on_success, on_failure);
                Ok(response)
            }
        }
    }
}

impl TradeRequester for EngineHandle {
    fn request_buy(
        &self,
        request: TradeRequest,
        on_success: &mut dyn FnMut(&TradeResponse),
        on_failure: Option<&mut dyn FnMut(&TradeResponse)>,
    ) -> Result<TradeResponse> {
        self.request(Side::Buy, request, on_success, on_failure)
    }

    fn request_sell(
        &self,
        request: TradeRequest,
        on_success: &mut dyn FnMut(&TradeResponse),
        on_failure: Option<&mut dyn FnMut(&TradeResponse)>,
    ) -> Result<TradeResponse> {
        self.request(Side::Sell, request, on_success, on_failure)
    }
}
