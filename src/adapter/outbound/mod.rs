//! Outbound adapters: concrete data sources, risk and execution.

pub mod csv_backtest;
pub mod execution;
pub mod paper;
pub mod replay;
pub mod risk;

pub use csv_backtest::CsvBacktest;
pub use execution::PaperExecution;
pub use paper::PaperExchange;
pub use replay::ReplayFeed;
pub use risk::{LimitRisk, RiskLimits, RiskStats};
