//! Collaborator factory.
//!
//! Provides [`CollaboratorFactory`] for creating the engine's collaborators
//! and strategies from configuration.

use tracing::warn;

use crate::adapter::outbound::{CsvBacktest, LimitRisk, PaperExchange, PaperExecution, RiskLimits};
use crate::adapter::strategy::SmaCrossStrategy;
use crate::domain::Account;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::{ExchangeType, TradingEngineConfig};
use crate::port::inbound::TradingStrategy;
use crate::port::outbound::{Backtest, Exchange, OrderExecutor, RiskGate};

/// Factory for configuration-selected collaborators.
///
/// All factory methods are static; no instance state is required.
pub struct CollaboratorFactory;

impl CollaboratorFactory {
    /// Create the exchange. Always built, whatever the run mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured feed cannot be loaded.
    pub fn create_exchange(config: &TradingEngineConfig) -> Result<Box<dyn Exchange>> {
        match config.exchange.exchange_type {
            ExchangeType::Paper => {
                let accounts: Vec<Account> =
                    config.exchange.accounts.iter().map(Account::from).collect();
                let events = match &config.exchange.feed {
                    Some(path) => PaperExchange::load_feed(path)?,
                    None => Vec::new(),
                };
                Ok(Box::new(PaperExchange::new(accounts, events)))
            }
        }
    }

    /// Create the backtest source; `None` outside backtest mode.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingField`] without `[backtest].file`, or any error
    /// reading the file.
    pub fn create_backtest(config: &TradingEngineConfig) -> Result<Option<Box<dyn Backtest>>> {
        if !config.run_mode().is_backtest() {
            return Ok(None);
        }
        let path = config
            .backtest
            .file
            .as_deref()
            .ok_or(ConfigError::MissingField {
                field: "backtest.file",
            })?;
        Ok(Some(Box::new(CsvBacktest::from_path(path)?)))
    }

    pub fn create_risk(config: &TradingEngineConfig) -> Box<dyn RiskGate> {
        Box::new(LimitRisk::new(RiskLimits::from(&config.risk)))
    }

    pub fn create_execution(config: &TradingEngineConfig) -> Box<dyn OrderExecutor> {
        Box::new(PaperExecution::new(config.execution.fee_rate))
    }

    /// Create a strategy by name. Names are matched case-insensitively, with
    /// `-` treated as `_`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Unknown`] for names with no built-in strategy.
    pub fn create_strategy(
        name: &str,
        config: &TradingEngineConfig,
    ) -> Result<Box<dyn TradingStrategy>> {
        match normalize_strategy_name(name).as_str() {
            "sma_cross" => Ok(Box::new(SmaCrossStrategy::new(
                config.strategies.sma_cross.clone(),
            )?)),
            _ => Err(ConfigError::Unknown {
                kind: "strategy",
                name: name.to_string(),
            }
            .into()),
        }
    }

    /// Create every enabled strategy, in configured order.
    ///
    /// Unknown strategy names are logged and skipped.
    pub fn create_strategies(config: &TradingEngineConfig) -> Vec<Box<dyn TradingStrategy>> {
        config
            .strategies
            .enabled
            .iter()
            .filter_map(|name| match Self::create_strategy(name, config) {
                Ok(strategy) => Some(strategy),
                Err(e) => {
                    warn!(strategy = %name, error = %e, "Unknown strategy in config, skipping");
                    None
                }
            })
            .collect()
    }
}

fn normalize_strategy_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace('-', "_")
}
