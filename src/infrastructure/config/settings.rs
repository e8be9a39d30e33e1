//! Engine configuration loading and validation.
//!
//! Provides [`TradingEngineConfig`], which aggregates every section of the
//! TOML file.
//!
//! # Example
//!
//! ```no_run
//! use tradeloop::infrastructure::config::TradingEngineConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TradingEngineConfig::load("tradeloop.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::backtest::BacktestConfig;
use super::exchange::ExchangeConfig;
use super::execution::ExecutionConfig;
use super::logging::LoggingConfig;
use super::risk::RiskConfig;
use super::strategy::StrategiesConfig;
use crate::domain::{RunMode, TradingType};
use crate::error::{ConfigError, Result};

/// Full engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradingEngineConfig {
    /// Run mode: `live`, `sandbox` or `backtest`.
    #[serde(rename = "type", default)]
    pub trading_type: TradingType,

    /// Subscribe the event printer to the active data source.
    #[serde(default)]
    pub print: bool,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub exchange: ExchangeConfig,

    #[serde(default)]
    pub risk: RiskConfig,

    #[serde(default)]
    pub execution: ExecutionConfig,

    #[serde(default)]
    pub backtest: BacktestConfig,

    #[serde(default)]
    pub strategies: StrategiesConfig,
}

impl TradingEngineConfig {
    /// Parse configuration from TOML content without validating it.
    ///
    /// Callers that adjust the result (command-line overrides) must call
    /// [`validate`](Self::validate) before use.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed.
    pub fn parse_unvalidated(content: &str) -> Result<Self> {
        Ok(toml::from_str(content).map_err(ConfigError::Parse)?)
    }

    /// Parse configuration from TOML content and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config = Self::parse_unvalidated(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_unvalidated(&content)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// The mode flags derived from `type`.
    #[must_use]
    pub fn run_mode(&self) -> RunMode {
        RunMode::from(self.trading_type)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// The first violated constraint, as a [`ConfigError`].
    pub fn validate(&self) -> Result<()> {
        if self.trading_type == TradingType::Backtest && self.backtest.file.is_none() {
            return Err(ConfigError::MissingField {
                field: "backtest.file",
            }
            .into());
        }
        if self.risk.total_funds <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "total_funds",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.risk.max_risk <= Decimal::ZERO || self.risk.max_risk > Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "max_risk",
                reason: "must be in (0, 1]".to_string(),
            }
            .into());
        }
        if self.risk.max_drawdown < Decimal::ZERO || self.risk.max_drawdown > Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "max_drawdown",
                reason: "must be between 0 and 1".to_string(),
            }
            .into());
        }
        if self.execution.fee_rate < Decimal::ZERO || self.execution.fee_rate >= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "fee_rate",
                reason: "must be in [0, 1)".to_string(),
            }
            .into());
        }
        self.strategies.sma_cross.validate()?;
        Ok(())
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::infrastructure::config::{ExchangeType, LogFormat};
    use rust_decimal_macros::dec;

    #[test]
    fn empty_config_uses_defaults() {
        let config = TradingEngineConfig::parse_toml("").unwrap();
        assert_eq!(config.trading_type, TradingType::Sandbox);
        assert!(!config.print);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.exchange.exchange_type, ExchangeType::Paper);
        assert_eq!(config.risk.max_risk, dec!(0.5));
        assert!(config.strategies.enabled.is_empty());
        assert!(config.run_mode().is_sandbox());
    }

    #[test]
    fn full_config_parses() {
        let toml = r#"
type = "backtest"
print = true

[logging]
level = "debug"
format = "json"

[exchange]
exchange_type = "paper"
accounts = [{ currency = "USD", balance = "1000" }]

[risk]
total_funds = "1000"
max_risk = "0.25"

[execution]
fee_rate = "0.001"

[backtest]
file = "trades.csv"

[strategies]
enabled = ["sma_cross"]

[strategies.sma_cross]
short_window = 3
long_window = 8
volume = "0.5"
"#;
        let config = TradingEngineConfig::parse_toml(toml).unwrap();
        assert!(config.run_mode().is_backtest());
        assert!(config.print);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.exchange.accounts.len(), 1);
        assert_eq!(config.risk.total_funds, dec!(1000));
        assert_eq!(config.execution.fee_rate, dec!(0.001));
        assert_eq!(config.strategies.enabled, vec!["sma_cross"]);
        assert_eq!(config.strategies.sma_cross.long_window, 8);
    }

    #[test]
    fn backtest_requires_file() {
        let err = TradingEngineConfig::parse_toml("type = \"backtest\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "backtest.file"
            })
        ));
    }

    #[test]
    fn max_risk_out_of_range_is_rejected() {
        let err = TradingEngineConfig::parse_toml("[risk]\nmax_risk = \"1.5\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "max_risk",
                ..
            })
        ));
    }

    #[test]
    fn inverted_sma_windows_are_rejected() {
        let toml = "[strategies.sma_cross]\nshort_window = 10\nlong_window = 5";
        assert!(TradingEngineConfig::parse_toml(toml).is_err());
    }

    #[test]
    fn unvalidated_parse_keeps_incomplete_backtest_config() {
        let config = TradingEngineConfig::parse_unvalidated("type = \"backtest\"").unwrap();
        assert_eq!(config.trading_type, TradingType::Backtest);
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_type_is_a_parse_error() {
        let err = TradingEngineConfig::parse_toml("type = \"paper\"").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
