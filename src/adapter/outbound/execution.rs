//! Simulated order execution.

use std::sync::atomic::{AtomicU64, Ordering};

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{OrderId, TradeResponse};
use crate::error::Result;
use crate::port::outbound::OrderExecutor;

/// Fills every risk-approved response in full at the requested price,
/// charging `fee_rate` of the notional as transaction cost.
///
/// Responses risk did not approve are returned unchanged.
pub struct PaperExecution {
    fee_rate: Decimal,
    fills: AtomicU64,
}

impl PaperExecution {
    pub fn new(fee_rate: Decimal) -> Self {
        Self {
            fee_rate,
            fills: AtomicU64::new(0),
        }
    }

    pub fn fee_rate(&self) -> Decimal {
        self.fee_rate
    }

    /// Number of fills produced so far.
    pub fn fills(&self) -> u64 {
        self.fills.load(Ordering::Relaxed)
    }

    fn fill(&self, response: TradeResponse) -> TradeResponse {
        if !response.risk_check {
            return response;
        }
        let price = response.request.price;
        let volume = response.request.volume;
        let cost = price * volume * self.fee_rate;
        let order_id = OrderId::generate();
        self.fills.fetch_add(1, Ordering::Relaxed);
        debug!(
            order_id = %order_id,
            side = %response.side,
            instrument = %response.instrument,
            volume = %volume,
            price = %price,
            "Paper fill"
        );
        response
            .filled(order_id, price, volume)
            .with_transaction_cost(cost)
    }
}

impl Default for PaperExecution {
    fn default() -> Self {
        Self::new(Decimal::ZERO)
    }
}

impl OrderExecutor for PaperExecution {
    fn request_buy(&self, response: TradeResponse) -> Result<TradeResponse> {
        Ok(self.fill(response))
    }

    fn request_sell(&self, response: TradeResponse) -> Result<TradeResponse> {
        Ok(self.fill(response))
    }
}
