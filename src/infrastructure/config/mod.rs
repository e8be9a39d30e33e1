//! Infrastructure configuration modules.

pub mod backtest;
pub mod exchange;
pub mod execution;
pub mod logging;
pub mod risk;
pub mod settings;
pub mod strategy;

pub use backtest::BacktestConfig;
pub use exchange::{AccountConfig, ExchangeConfig, ExchangeType};
pub use execution::ExecutionConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use risk::RiskConfig;
pub use settings::TradingEngineConfig;
pub use strategy::StrategiesConfig;
