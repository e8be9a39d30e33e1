//! Application services: the engine and the pieces it composes.
//!
//! - [`engine`]: [`TradingEngine`] lifecycle controller and its builder
//! - [`pipeline`]: risk → execution → risk-update request routing
//! - [`registry`]: ordered strategy registry and the per-cycle ticked scan
//! - [`mode`]: data-source selection for live, sandbox and backtest runs
//! - [`handle`]: the non-owning trade capability handed to strategies

pub mod engine;
pub mod handle;
pub mod mode;
pub mod pipeline;
pub mod registry;

pub use engine::{EngineBuilder, TradingEngine};
pub use handle::EngineHandle;
pub use mode::ModeSelector;
pub use pipeline::{dispatch, RequestPipeline};
pub use registry::StrategyRegistry;
