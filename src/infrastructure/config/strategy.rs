//! Strategy configuration.

use serde::Deserialize;

use crate::adapter::strategy::SmaCrossConfig;

/// Configuration for all built-in strategies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrategiesConfig {
    /// Enabled strategy names, registered in this order.
    #[serde(default)]
    pub enabled: Vec<String>,

    /// Moving-average crossover strategy config.
    #[serde(default)]
    pub sma_cross: SmaCrossConfig,
}
