//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the engine and everything it drives or is
//! driven by.
//!
//! ```text
//!                 ┌──────────────────────┐
//!   Strategy ───▶ │   TradingEngine      │ ───▶ RiskGate
//!   DataSource ─▶ │ (pipeline, registry) │ ───▶ OrderExecutor
//!                 └──────────────────────┘
//! ```
//!
//! - [`inbound`]: what drives the engine ([`inbound::Tickable`],
//!   [`inbound::TradeRequester`], [`inbound::TradingStrategy`])
//! - [`outbound`]: what the engine drives ([`outbound::Exchange`],
//!   [`outbound::Backtest`], [`outbound::RiskGate`],
//!   [`outbound::OrderExecutor`], [`outbound::Callback`])

pub mod inbound;
pub mod outbound;
