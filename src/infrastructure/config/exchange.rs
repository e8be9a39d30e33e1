//! Data source configuration.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::Account;

/// Supported exchange implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeType {
    /// Simulated venue replaying a recorded feed.
    #[default]
    Paper,
}

impl ExchangeType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paper => "paper",
        }
    }
}

/// One starting balance.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub currency: String,
    pub balance: Decimal,
    /// Defaults to the lowercased currency.
    #[serde(default)]
    pub id: Option<String>,
}

impl From<&AccountConfig> for Account {
    fn from(config: &AccountConfig) -> Self {
        let id = config
            .id
            .clone()
            .unwrap_or_else(|| config.currency.to_lowercase());
        Account::new(id, config.currency.clone(), config.balance)
    }
}

/// `[exchange]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExchangeConfig {
    #[serde(default)]
    pub exchange_type: ExchangeType,

    #[serde(default)]
    pub accounts: Vec<AccountConfig>,

    /// JSON-lines event feed replayed in live and sandbox modes.
    #[serde(default)]
    pub feed: Option<PathBuf>,
}
