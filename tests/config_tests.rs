use std::io::Write;

use tempfile::NamedTempFile;
use tradeloop::domain::TradingType;
use tradeloop::error::{ConfigError, Error};
use tradeloop::infrastructure::config::TradingEngineConfig;
use rust_decimal_macros::dec;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn config_loads_from_file() {
    let file = write_temp_config(
        r#"
type = "live"

[exchange]
accounts = [
    { currency = "USD", balance = "5000" },
    { currency = "BTC", balance = "0.25", id = "btc-main" },
]

[risk]
total_funds = "5000"
"#,
    );

    let config = TradingEngineConfig::load(file.path()).unwrap();

    assert_eq!(config.trading_type, TradingType::Live);
    assert_eq!(config.exchange.accounts.len(), 2);
    assert_eq!(config.exchange.accounts[1].id.as_deref(), Some("btc-main"));
    assert_eq!(config.risk.total_funds, dec!(5000));
}

#[test]
fn missing_file_is_a_read_error() {
    let result = TradingEngineConfig::load("/nonexistent/tradeloop.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let file = write_temp_config("type = ");
    let result = TradingEngineConfig::load(file.path());
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn config_rejects_zero_funds() {
    let file = write_temp_config("[risk]\ntotal_funds = \"0\"\n");

    match TradingEngineConfig::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "total_funds",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid total_funds error, got {err}"),
        Ok(_) => panic!("Expected invalid total_funds error, got Ok"),
    }
}

#[test]
fn config_rejects_negative_fee_rate() {
    let file = write_temp_config("[execution]\nfee_rate = \"-0.01\"\n");
    let result = TradingEngineConfig::load(file.path());
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "fee_rate",
            ..
        }))
    ));
}
