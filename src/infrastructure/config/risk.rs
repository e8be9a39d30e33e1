//! Risk management configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::adapter::outbound::RiskLimits;

/// Risk management configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    /// Capital available to the engine.
    #[serde(default = "default_total_funds")]
    pub total_funds: Decimal,
    /// Fraction of funds that may be deployed (e.g., 0.5 = 50%).
    #[serde(default = "default_max_risk")]
    pub max_risk: Decimal,
    /// Fraction of funds that may be lost before all requests are refused.
    #[serde(default = "default_max_drawdown")]
    pub max_drawdown: Decimal,
}

fn default_total_funds() -> Decimal {
    Decimal::from(10000)
}

fn default_max_risk() -> Decimal {
    Decimal::new(5, 1) // 50%
}

fn default_max_drawdown() -> Decimal {
    Decimal::new(2, 1) // 20%
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            total_funds: default_total_funds(),
            max_risk: default_max_risk(),
            max_drawdown: default_max_drawdown(),
        }
    }
}

impl From<&RiskConfig> for RiskLimits {
    fn from(config: &RiskConfig) -> Self {
        Self {
            total_funds: config.total_funds,
            max_risk: config.max_risk,
            max_drawdown: config.max_drawdown,
        }
    }
}
