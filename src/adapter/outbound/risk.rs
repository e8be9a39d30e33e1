//! Exposure-limit risk gate.
//!
//! Tracks per-instrument positions at cost and approves a request only
//! while it fits inside the configured limits:
//!
//! - buys must keep total exposure within `total_funds * max_risk`
//! - sells must not exceed the held position
//! - once realized losses pass `total_funds * max_drawdown`, everything is
//!   refused

use std::collections::HashMap;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::domain::{Instrument, Side, TradeRequest, TradeResponse};
use crate::error::Result;
use crate::port::outbound::RiskGate;

/// Limits enforced by [`LimitRisk`].
#[derive(Debug, Clone, PartialEq)]
pub struct RiskLimits {
    /// Capital available to the engine.
    pub total_funds: Decimal,
    /// Fraction of `total_funds` that may be deployed at once.
    pub max_risk: Decimal,
    /// Fraction of `total_funds` that may be lost before trading stops.
    pub max_drawdown: Decimal,
}

impl RiskLimits {
    /// Maximum exposure at cost.
    #[must_use]
    pub fn capacity(&self) -> Decimal {
        self.total_funds * self.max_risk
    }

    /// Realized loss at which every request is refused.
    #[must_use]
    pub fn loss_limit(&self) -> Decimal {
        self.total_funds * self.max_drawdown
    }
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            total_funds: dec!(10000),
            max_risk: dec!(0.5),
            max_drawdown: dec!(0.2),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Position {
    volume: Decimal,
    cost: Decimal,
}

/// Counters exposed for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskStats {
    pub approved: u64,
    pub rejected: u64,
    pub filled: u64,
    pub unfilled: u64,
}

#[derive(Debug, Default)]
struct RiskBook {
    positions: HashMap<Instrument, Position>,
    realized_pnl: Decimal,
    stats: RiskStats,
}

impl RiskBook {
    fn exposure(&self) -> Decimal {
        self.positions.values().map(|p| p.cost).sum()
    }

    fn held(&self, instrument: &Instrument) -> Decimal {
        self.positions
            .get(instrument)
            .map_or(Decimal::ZERO, |p| p.volume)
    }

    fn book_fill(&mut self, response: &TradeResponse) {
        let position = self
            .positions
            .entry(response.instrument.clone())
            .or_default();
        match response.side {
            Side::Buy => {
                position.volume += response.volume;
                position.cost += response.notional() + response.transaction_cost;
            }
            Side::Sell => {
                let sold = response.volume.min(position.volume);
                if sold.is_zero() {
                    return;
                }
                let released = position.cost * sold / position.volume;
                position.volume -= sold;
                position.cost -= released;
                self.realized_pnl +=
                    sold * response.price - released - response.transaction_cost;
                if position.volume.is_zero() {
                    self.positions.remove(&response.instrument);
                }
            }
        }
    }
}

/// [`RiskGate`] enforcing [`RiskLimits`] against a running position book.
pub struct LimitRisk {
    limits: RiskLimits,
    book: Mutex<RiskBook>,
}

impl LimitRisk {
    pub fn new(limits: RiskLimits) -> Self {
        Self {
            limits,
            book: Mutex::new(RiskBook::default()),
        }
    }

    pub fn limits(&self) -> &RiskLimits {
        &self.limits
    }

    /// Total position cost currently held.
    pub fn exposure(&self) -> Decimal {
        self.book.lock().exposure()
    }

    /// Volume held in `instrument`.
    pub fn position(&self, instrument: &Instrument) -> Decimal {
        self.book.lock().held(instrument)
    }

    pub fn realized_pnl(&self) -> Decimal {
        self.book.lock().realized_pnl
    }

    pub fn stats(&self) -> RiskStats {
        self.book.lock().stats
    }

    fn check(&self, book: &RiskBook, request: &TradeRequest) -> Option<String> {
        if request.volume <= Decimal::ZERO || request.price <= Decimal::ZERO {
            return Some("volume and price must be positive".into());
        }
        if -book.realized_pnl > self.limits.loss_limit() {
            return Some(format!(
                "max drawdown reached: realized {}",
                book.realized_pnl
            ));
        }
        match request.side {
            Side::Buy => {
                let exposure = book.exposure() + request.notional();
                (exposure > self.limits.capacity()).then(|| {
                    format!(
                        "exposure {exposure} exceeds capacity {}",
                        self.limits.capacity()
                    )
                })
            }
            Side::Sell => {
                let held = book.held(&request.instrument);
                (request.volume > held)
                    .then(|| format!("insufficient position: holding {held}"))
            }
        }
    }

    fn evaluate(&self, request: TradeRequest) -> TradeResponse {
        let mut book = self.book.lock();
        match self.check(&book, &request) {
            Some(reason) => {
                book.stats.rejected += 1;
                warn!(
                    side = %request.side,
                    instrument = %request.instrument,
                    volume = %request.volume,
                    price = %request.price,
                    reason = %reason,
                    "Risk rejected request"
                );
                TradeResponse::rejected(request, reason)
            }
            None => {
                book.stats.approved += 1;
                TradeResponse::approved(request)
            }
        }
    }
}

impl Default for LimitRisk {
    fn default() -> Self {
        Self::new(RiskLimits::default())
    }
}

impl RiskGate for LimitRisk {
    fn request_buy(&self, request: TradeRequest) -> Result<TradeResponse> {
        Ok(self.evaluate(request))
    }

    fn request_sell(&self, request: TradeRequest) -> Result<TradeResponse> {
        Ok(self.evaluate(request))
    }

    fn update(&self, response: &TradeResponse) -> Result<()> {
        let mut book = self.book.lock();
        if !response.success {
            book.stats.unfilled += 1;
            return Ok(());
        }
        book.stats.filled += 1;
        book.book_fill(response);
        debug!(
            instrument = %response.instrument,
            exposure = %book.exposure(),
            realized_pnl = %book.realized_pnl,
            "Risk book updated"
        );
        Ok(())
    }
}
