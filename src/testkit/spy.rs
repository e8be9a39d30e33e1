//! Call-counting collaborators.
//!
//! Each spy is `Clone`; clones share their counters, so a test keeps one
//! clone for assertions and boxes the other into the engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{OrderId, TradeRequest, TradeResponse};
use crate::error::{Error, Result};
use crate::port::outbound::{OrderExecutor, RiskGate};

#[derive(Default)]
struct RiskCalls {
    buys: AtomicUsize,
    sells: AtomicUsize,
    updates: Mutex<Vec<TradeResponse>>,
}

/// Risk gate that approves or rejects everything and counts calls.
#[derive(Clone)]
pub struct SpyRisk {
    approve: bool,
    fail_with: Option<String>,
    calls: Arc<RiskCalls>,
}

impl SpyRisk {
    /// Approve every request.
    pub fn approving() -> Self {
        Self {
            approve: true,
            fail_with: None,
            calls: Arc::default(),
        }
    }

    /// Reject every request.
    pub fn rejecting() -> Self {
        Self {
            approve: false,
            ..Self::approving()
        }
    }

    /// Return an error from every request.
    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::approving()
        }
    }

    pub fn buy_calls(&self) -> usize {
        self.calls.buys.load(Ordering::SeqCst)
    }

    pub fn sell_calls(&self) -> usize {
        self.calls.sells.load(Ordering::SeqCst)
    }

    /// Buy plus sell calls.
    pub fn request_calls(&self) -> usize {
        self.buy_calls() + self.sell_calls()
    }

    pub fn update_calls(&self) -> usize {
        self.calls.updates.lock().len()
    }

    /// Responses passed to `update`, in call order.
    pub fn updates(&self) -> Vec<TradeResponse> {
        self.calls.updates.lock().clone()
    }

    fn answer(&self, request: TradeRequest) -> Result<TradeResponse> {
        if let Some(reason) = &self.fail_with {
            return Err(Error::collaborator("risk", reason.clone()));
        }
        if self.approve {
            Ok(TradeResponse::approved(request))
        } else {
            Ok(TradeResponse::rejected(request, "spy rejection"))
        }
    }
}

impl RiskGate for SpyRisk {
    fn request_buy(&self, request: TradeRequest) -> Result<TradeResponse> {
        self.calls.buys.fetch_add(1, Ordering::SeqCst);
        self.answer(request)
    }

    fn request_sell(&self, request: TradeRequest) -> Result<TradeResponse> {
        self.calls.sells.fetch_add(1, Ordering::SeqCst);
        self.answer(request)
    }

    fn update(&self, response: &TradeResponse) -> Result<()> {
        self.calls.updates.lock().push(response.clone());
        Ok(())
    }
}

#[derive(Default)]
struct ExecutionCalls {
    buys: AtomicUsize,
    sells: AtomicUsize,
    received: Mutex<Vec<TradeResponse>>,
}

#[derive(Clone, Copy)]
enum Fill {
    Fill,
    Unfilled,
    Error,
}

/// Executor that fills (or refuses) everything and counts calls.
#[derive(Clone)]
pub struct SpyExecution {
    fill: Fill,
    calls: Arc<ExecutionCalls>,
}

impl SpyExecution {
    /// Fill every response at its requested price.
    pub fn filling() -> Self {
        Self {
            fill: Fill::Fill,
            calls: Arc::default(),
        }
    }

    /// Return every response unfilled (`success == false`).
    pub fn unfilled() -> Self {
        Self {
            fill: Fill::Unfilled,
            ..Self::filling()
        }
    }

    /// Return an error from every call.
    pub fn erroring() -> Self {
        Self {
            fill: Fill::Error,
            ..Self::filling()
        }
    }

    pub fn buy_calls(&self) -> usize {
        self.calls.buys.load(Ordering::SeqCst)
    }

    pub fn sell_calls(&self) -> usize {
        self.calls.sells.load(Ordering::SeqCst)
    }

    /// Buy plus sell calls.
    pub fn calls(&self) -> usize {
        self.buy_calls() + self.sell_calls()
    }

    /// Responses received from the pipeline, in call order.
    pub fn received(&self) -> Vec<TradeResponse> {
        self.calls.received.lock().clone()
    }

    fn answer(&self, response: TradeResponse) -> Result<TradeResponse> {
        self.calls.received.lock().push(response.clone());
        match self.fill {
            Fill::Fill => {
                let (price, volume) = (response.price, response.volume);
                Ok(response.filled(OrderId::generate(), price, volume))
            }
            Fill::Unfilled => Ok(response),
            Fill::Error => Err(Error::collaborator("execution", "spy failure")),
        }
    }
}

impl OrderExecutor for SpyExecution {
    fn request_buy(&self, response: TradeResponse) -> Result<TradeResponse> {
        self.calls.buys.fetch_add(1, Ordering::SeqCst);
        self.answer(response)
    }

    fn request_sell(&self, response: TradeResponse) -> Result<TradeResponse> {
        self.calls.sells.fetch_add(1, Ordering::SeqCst);
        self.answer(response)
    }
}
