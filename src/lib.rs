//! Tradeloop - trading engine orchestrator.
//!
//! Routes trade requests from registered strategies through a risk gate and
//! an execution venue, driven by a live, sandbox or backtest data source.
//!
//! # Architecture
//!
//! - **`domain`** - Trade requests and responses, market events, run modes
//! - **`port`** - Traits at every collaborator seam
//! - **`application`** - The engine, its request pipeline and strategy registry
//! - **`adapter`** - Paper exchange, CSV backtest, limit risk, paper execution,
//!   built-in strategies and the CLI
//! - **`infrastructure`** - Configuration, factory and bootstrap
//!
//! # Modules
//!
//! - [`domain`] - Exchange-agnostic value types
//! - [`port`] - Inbound and outbound traits
//! - [`application`] - [`TradingEngine`](application::TradingEngine)
//! - [`adapter`] - Concrete collaborators
//! - [`infrastructure`] - Config loading and engine wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use tradeloop::infrastructure::bootstrap::build_engine;
//! use tradeloop::infrastructure::config::TradingEngineConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TradingEngineConfig::load("tradeloop.toml")?;
//!     let engine = build_engine(&config)?;
//!     engine.run()?;
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
