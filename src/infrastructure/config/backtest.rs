//! Backtest configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// `[backtest]` section. Required when running in backtest mode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BacktestConfig {
    /// CSV trade history.
    #[serde(default)]
    pub file: Option<PathBuf>,
}
