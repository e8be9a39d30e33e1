//! End-to-end runs with the built-in adapters and strategy.

use std::io::Write;

use tempfile::NamedTempFile;
use tradeloop::adapter::outbound::{CsvBacktest, PaperExchange, PaperExecution};
use tradeloop::adapter::strategy::{SmaCrossConfig, SmaCrossStrategy};
use tradeloop::application::TradingEngine;
use tradeloop::domain::{Side, TradingType};
use tradeloop::infrastructure::bootstrap::build_engine;
use tradeloop::infrastructure::config::TradingEngineConfig;
use tradeloop::testkit::SpyRisk;
use rust_decimal_macros::dec;

// Short window 2, long window 3: crosses up at 12, back down at 5.
const PRICES: &[&str] = &["10", "10", "9", "12", "13", "5"];

fn trades_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "timestamp,instrument,price,volume").unwrap();
    for (i, price) in PRICES.iter().enumerate() {
        writeln!(file, "2024-03-01T00:0{i}:00Z,BTC-USD,{price},1").unwrap();
    }
    file
}

fn sma() -> SmaCrossConfig {
    SmaCrossConfig {
        short_window: 2,
        long_window: 3,
        volume: dec!(1),
        instrument: None,
    }
}

#[test]
fn crossover_buys_then_sells_during_backtest() {
    let file = trades_csv();
    let risk = SpyRisk::approving();
    let engine = TradingEngine::builder()
        .trading_type(TradingType::Backtest)
        .exchange(Box::new(PaperExchange::new(vec![], vec![])))
        .backtest(Box::new(CsvBacktest::from_path(file.path()).unwrap()))
        .risk(Box::new(risk.clone()))
        .execution(Box::new(PaperExecution::new(dec!(0.001))))
        .build()
        .unwrap();
    engine.register_strategy(Box::new(SmaCrossStrategy::new(sma()).unwrap()));

    engine.run().unwrap();

    assert_eq!(risk.buy_calls(), 1);
    assert_eq!(risk.sell_calls(), 1);
    let updates = risk.updates();
    assert_eq!(updates.len(), 2);
    assert!(updates.iter().all(|r| r.success && r.order_id.is_some()));
    assert_eq!(updates[0].side, Side::Buy);
    assert_eq!(updates[0].price, dec!(12));
    assert_eq!(updates[0].transaction_cost, dec!(0.012));
    assert_eq!(updates[1].side, Side::Sell);
    assert_eq!(updates[1].price, dec!(5));
    assert_eq!(engine.pending_ticked(), 0);
}

#[test]
fn halted_backtest_never_reaches_risk() {
    let file = trades_csv();
    let risk = SpyRisk::approving();
    let engine = TradingEngine::builder()
        .trading_type(TradingType::Backtest)
        .exchange(Box::new(PaperExchange::new(vec![], vec![])))
        .backtest(Box::new(CsvBacktest::from_path(file.path()).unwrap()))
        .risk(Box::new(risk.clone()))
        .execution(Box::new(PaperExecution::default()))
        .build()
        .unwrap();
    engine.register_strategy(Box::new(SmaCrossStrategy::new(sma()).unwrap()));
    engine.halt_trading();

    engine.run().unwrap();

    assert_eq!(risk.request_calls(), 0);
}

#[test]
fn configured_backtest_runs_end_to_end() {
    let file = trades_csv();
    let toml = format!(
        r#"
type = "backtest"

[risk]
total_funds = "100"
max_risk = "0.5"

[backtest]
file = {:?}

[strategies]
enabled = ["sma_cross"]

[strategies.sma_cross]
short_window = 2
long_window = 3
"#,
        file.path().display().to_string()
    );
    let config = TradingEngineConfig::parse_toml(&toml).unwrap();
    let engine = build_engine(&config).unwrap();

    assert_eq!(engine.strategy_count(), 1);
    engine.run().unwrap();
    assert!(engine.is_trading());
}

#[test]
fn paper_feed_drives_sandbox_run() {
    let mut feed = NamedTempFile::new().unwrap();
    for price in PRICES {
        writeln!(
            feed,
            r#"{{"kind":"match","instrument":"BTC-USD","price":"{price}","volume":"1"}}"#
        )
        .unwrap();
    }
    let events = PaperExchange::load_feed(feed.path()).unwrap();
    assert_eq!(events.len(), PRICES.len());

    let risk = SpyRisk::approving();
    let engine = TradingEngine::builder()
        .trading_type(TradingType::Sandbox)
        .exchange(Box::new(PaperExchange::new(vec![], events)))
        .risk(Box::new(risk.clone()))
        .execution(Box::new(PaperExecution::default()))
        .build()
        .unwrap();
    engine.register_strategy(Box::new(SmaCrossStrategy::new(sma()).unwrap()));

    engine.run().unwrap();

    assert_eq!(risk.buy_calls(), 1);
    assert_eq!(risk.sell_calls(), 1);
}
