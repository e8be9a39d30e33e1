//! Exchange account balances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single currency balance held at the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Venue-assigned account id.
    pub id: String,
    /// Currency code, e.g. `USD` or `BTC`.
    pub currency: String,
    /// Available balance.
    pub balance: Decimal,
}

impl Account {
    pub fn new(id: impl Into<String>, currency: impl Into<String>, balance: Decimal) -> Self {
        Self {
            id: id.into(),
            currency: currency.into(),
            balance,
        }
    }
}
