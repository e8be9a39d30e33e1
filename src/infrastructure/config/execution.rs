//! Execution configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

/// `[execution]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutionConfig {
    /// Fee charged per fill as a fraction of notional.
    #[serde(default)]
    pub fee_rate: Decimal,
}
