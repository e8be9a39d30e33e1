//! Trade request and response types.
//!
//! This module provides the values that flow through the request pipeline:
//!
//! - [`TradeRequest`] - What a strategy wants to trade
//! - [`TradeResponse`] - What happened to that request
//!
//! # Response lifecycle
//!
//! A response is created by the risk collaborator (or by the engine itself
//! when trading is halted), possibly replaced by the execution collaborator,
//! and finally handed back to risk for bookkeeping. A response whose
//! `risk_check` is false never reaches execution.
//!
//! # Examples
//!
//! ```
//! use tradeloop::domain::{Instrument, OrderId, TradeRequest, TradeResponse};
//! use rust_decimal_macros::dec;
//!
//! let request = TradeRequest::buy(Instrument::from("BTC-USD"), dec!(0.5), dec!(30000));
//! let approved = TradeResponse::approved(request);
//! assert!(approved.risk_check);
//! assert!(!approved.success);
//!
//! let filled = approved.filled(OrderId::from("o-1"), dec!(30010), dec!(0.5));
//! assert!(filled.success);
//! assert_eq!(filled.slippage, dec!(10));
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{Instrument, OrderId};

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl Side {
    /// Stable lowercase name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the order should be placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Take whatever the market offers.
    Market,
    /// Rest at the requested price.
    #[default]
    Limit,
}

/// A desired trade, as produced by a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRequest {
    /// Buy or Sell.
    pub side: Side,
    /// The instrument to trade.
    pub instrument: Instrument,
    /// Quantity to trade.
    pub volume: Decimal,
    /// Limit (or reference) price.
    pub price: Decimal,
    /// Order placement type.
    #[serde(default)]
    pub order_type: OrderType,
}

impl TradeRequest {
    /// Create a new limit request.
    pub fn new(side: Side, instrument: Instrument, volume: Decimal, price: Decimal) -> Self {
        Self {
            side,
            instrument,
            volume,
            price,
            order_type: OrderType::Limit,
        }
    }

    /// Create a limit buy request.
    pub fn buy(instrument: Instrument, volume: Decimal, price: Decimal) -> Self {
        Self::new(Side::Buy, instrument, volume, price)
    }

    /// Create a limit sell request.
    pub fn sell(instrument: Instrument, volume: Decimal, price: Decimal) -> Self {
        Self::new(Side::Sell, instrument, volume, price)
    }

    /// Switch the request to a market order.
    #[must_use]
    pub fn market(mut self) -> Self {
        self.order_type = OrderType::Market;
        self
    }

    /// Volume times price.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.volume * self.price
    }
}

/// Outcome of a trade attempt.
///
/// Callers branch on [`success`](Self::success); halted and risk-rejected
/// requests are ordinary failed responses, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResponse {
    /// The request this response answers.
    pub request: TradeRequest,
    pub side: Side,
    pub instrument: Instrument,
    /// Filled (or requested, if unfilled) volume.
    pub volume: Decimal,
    /// Fill (or requested, if unfilled) price.
    pub price: Decimal,
    /// Whether the trade was carried out.
    pub success: bool,
    /// Whether risk approved forwarding to execution.
    pub risk_check: bool,
    /// Why risk (or the engine) refused the request.
    pub risk_reason: Option<String>,
    /// Venue order id once executed.
    pub order_id: Option<OrderId>,
    /// Fill price minus requested price.
    pub slippage: Decimal,
    /// Fees charged by the venue.
    pub transaction_cost: Decimal,
}

impl TradeResponse {
    fn base(request: TradeRequest) -> Self {
        Self {
            side: request.side,
            instrument: request.instrument.clone(),
            volume: request.volume,
            price: request.price,
            request,
            success: false,
            risk_check: false,
            risk_reason: None,
            order_id: None,
            slippage: Decimal::ZERO,
            transaction_cost: Decimal::ZERO,
        }
    }

    /// Response produced when the engine is halted.
    pub fn halted(request: TradeRequest) -> Self {
        Self::rejected(request, "trading halted")
    }

    /// Response approved by risk and awaiting execution.
    pub fn approved(request: TradeRequest) -> Self {
        Self {
            risk_check: true,
            ..Self::base(request)
        }
    }

    /// Response refused before reaching execution.
    pub fn rejected(request: TradeRequest, reason: impl Into<String>) -> Self {
        Self {
            risk_reason: Some(reason.into()),
            ..Self::base(request)
        }
    }

    /// Mark this response as filled by the venue.
    #[must_use]
    pub fn filled(self, order_id: OrderId, price: Decimal, volume: Decimal) -> Self {
        let slippage = price - self.request.price;
        Self {
            success: true,
            order_id: Some(order_id),
            price,
            volume,
            slippage,
            ..self
        }
    }

    /// Attach a transaction cost.
    #[must_use]
    pub fn with_transaction_cost(mut self, cost: Decimal) -> Self {
        self.transaction_cost = cost;
        self
    }

    /// Filled volume times fill price.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.volume * self.price
    }
}
