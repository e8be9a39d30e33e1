//! Engine behaviour through the public API: halting, routing and the tick cycle.

use std::cell::Cell;

use tradeloop::application::TradingEngine;
use tradeloop::domain::{RunMode, TradeResponse, TradingType};
use tradeloop::error::{ConfigError, Error};
use tradeloop::port::inbound::Tickable;
use tradeloop::testkit::{
    buy_request, sell_request, trade_event, FlagStrategy, ScriptedSource, SpyExecution, SpyRisk,
};
use rust_decimal_macros::dec;

fn engine(
    trading_type: TradingType,
    risk: &SpyRisk,
    execution: &SpyExecution,
) -> TradingEngine {
    TradingEngine::builder()
        .trading_type(trading_type)
        .exchange(Box::new(ScriptedSource::new()))
        .risk(Box::new(risk.clone()))
        .execution(Box::new(execution.clone()))
        .build()
        .expect("engine builds")
}

#[test]
fn exactly_one_mode_flag_is_set() {
    for trading_type in [TradingType::Live, TradingType::Sandbox, TradingType::Backtest] {
        let engine = engine(trading_type, &SpyRisk::approving(), &SpyExecution::filling());
        let mode = engine.mode();
        let set = [mode.is_live(), mode.is_sandbox(), mode.is_backtest()]
            .iter()
            .filter(|flag| **flag)
            .count();
        assert_eq!(set, 1, "{trading_type}");
    }
}

#[test]
fn halted_live_engine_fires_failure_callback_without_collaborators() {
    let risk = SpyRisk::approving();
    let execution = SpyExecution::filling();
    let engine = engine(TradingType::Live, &risk, &execution);
    engine.halt_trading();

    let successes = Cell::new(0);
    let failures = Cell::new(0);
    let response = engine
        .request_buy(
            buy_request(),
            &mut |_| successes.set(successes.get() + 1),
            Some(&mut |r: &TradeResponse| {
                assert!(!r.success);
                failures.set(failures.get() + 1);
            }),
        )
        .unwrap();

    assert!(!response.success);
    assert_eq!((successes.get(), failures.get()), (0, 1));
    assert_eq!(risk.request_calls(), 0);
    assert_eq!(execution.calls(), 0);
}

#[test]
fn halted_engine_without_failure_callback_uses_success_callback() {
    let risk = SpyRisk::approving();
    let engine = engine(TradingType::Sandbox, &risk, &SpyExecution::filling());
    engine.halt_trading();

    let mut seen = Vec::new();
    engine
        .request_sell(sell_request(), &mut |r: &TradeResponse| seen.push(r.success), None)
        .unwrap();

    assert_eq!(seen, vec![false]);
    assert_eq!(risk.request_calls(), 0);
}

#[test]
fn continue_trading_restores_routing() {
    let risk = SpyRisk::approving();
    let engine = engine(TradingType::Sandbox, &risk, &SpyExecution::filling());
    engine.halt_trading();
    engine.continue_trading();

    let response = engine.request_buy(buy_request(), &mut |_| {}, None).unwrap();

    assert!(response.success);
    assert_eq!(risk.buy_calls(), 1);
}

#[test]
fn live_engine_routes_approved_request_through_execution_and_update() {
    let risk = SpyRisk::approving();
    let execution = SpyExecution::filling();
    let engine = engine(TradingType::Live, &risk, &execution);

    let mut successes = 0;
    let mut failures = 0;
    let response = engine
        .request_buy(buy_request(), &mut |_| successes += 1, Some(&mut |_| failures += 1))
        .unwrap();

    assert_eq!((successes, failures), (1, 0));
    assert_eq!(execution.buy_calls(), 1);
    assert_eq!(risk.update_calls(), 1);
    assert_eq!(risk.updates()[0], response);
}

#[test]
fn rejected_request_skips_execution_and_update() {
    let risk = SpyRisk::rejecting();
    let execution = SpyExecution::filling();
    let engine = engine(TradingType::Live, &risk, &execution);

    let mut failed = false;
    engine
        .request_sell(sell_request(), &mut |_| {}, Some(&mut |_| failed = true))
        .unwrap();

    assert!(failed);
    assert_eq!(risk.sell_calls(), 1);
    assert_eq!(execution.calls(), 0);
    assert_eq!(risk.update_calls(), 0);
}

#[test]
fn unfilled_execution_fires_failure_after_update() {
    let risk = SpyRisk::approving();
    let execution = SpyExecution::unfilled();
    let engine = engine(TradingType::Sandbox, &risk, &execution);

    let mut failed = false;
    let response = engine
        .request_buy(buy_request(), &mut |_| {}, Some(&mut |_| failed = true))
        .unwrap();

    assert!(failed);
    assert!(!response.success);
    assert_eq!(risk.update_calls(), 1);
}

#[test]
fn risk_error_propagates_and_fires_no_callback() {
    let engine = engine(
        TradingType::Sandbox,
        &SpyRisk::failing("limits unavailable"),
        &SpyExecution::filling(),
    );

    let mut fired = false;
    let result = engine.request_buy(buy_request(), &mut |_| fired = true, None);

    assert!(matches!(result, Err(Error::Collaborator { collaborator: "risk", .. })));
    assert!(!fired);
}

#[test]
fn tick_resets_only_ticked_strategies_and_drains() {
    let engine = engine(TradingType::Live, &SpyRisk::approving(), &SpyExecution::filling());
    let idle = FlagStrategy::new("idle");
    let busy = FlagStrategy::new("busy").ticked();
    let (idle_tracker, busy_tracker) = (idle.tracker(), busy.tracker());
    engine.register_strategy(Box::new(idle));
    engine.register_strategy(Box::new(busy));

    engine.tick();

    assert_eq!(idle_tracker.resets(), 0);
    assert_eq!(busy_tracker.resets(), 1);
    assert!(!busy_tracker.is_ticked());
    assert_eq!(engine.pending_ticked(), 0);
}

#[test]
fn tick_with_no_strategies_is_a_no_op() {
    let engine = engine(TradingType::Sandbox, &SpyRisk::approving(), &SpyExecution::filling());
    engine.tick();
    assert_eq!(engine.pending_ticked(), 0);
}

#[test]
fn many_ticked_strategies_are_all_reset() {
    let engine = engine(TradingType::Sandbox, &SpyRisk::approving(), &SpyExecution::filling());
    let trackers: Vec<_> = (0..5)
        .map(|i| {
            let strategy = FlagStrategy::new(&format!("s{i}")).ticked();
            let tracker = strategy.tracker();
            engine.register_strategy(Box::new(strategy));
            tracker
        })
        .collect();

    engine.tick();

    assert!(trackers.iter().all(|p| p.resets() == 1 && !p.is_ticked()));
    assert_eq!(engine.pending_ticked(), 0);
}

#[test]
fn run_drives_events_and_ticks_registered_strategies() {
    let source = ScriptedSource::new().with_events(vec![trade_event(dec!(1)), trade_event(dec!(2))]);
    let engine = TradingEngine::builder()
        .trading_type(TradingType::Sandbox)
        .exchange(Box::new(source.clone()))
        .risk(Box::new(SpyRisk::approving()))
        .execution(Box::new(SpyExecution::filling()))
        .build()
        .unwrap();
    let strategy = FlagStrategy::new("reactive").tick_on_event();
    let tracker = strategy.tracker();
    engine.register_strategy(Box::new(strategy));

    engine.run().unwrap();

    assert_eq!(source.runs(), 1);
    assert_eq!(tracker.events().len(), 2);
    assert_eq!(tracker.resets(), 2);
}

#[test]
fn backtest_mode_runs_the_backtest_source_only() {
    let exchange = ScriptedSource::new();
    let backtest = ScriptedSource::new().with_events(vec![trade_event(dec!(5))]);
    let engine = TradingEngine::builder()
        .trading_type(TradingType::Backtest)
        .exchange(Box::new(exchange.clone()))
        .backtest(Box::new(backtest.clone()))
        .risk(Box::new(SpyRisk::approving()))
        .execution(Box::new(SpyExecution::filling()))
        .build()
        .unwrap();
    engine.register_strategy(Box::new(FlagStrategy::new("s")));

    engine.run().unwrap();

    assert_eq!(exchange.accounts_calls(), 1);
    assert_eq!(exchange.runs(), 0);
    assert_eq!(backtest.runs(), 1);
    assert_eq!(backtest.callback_count(), 1);
    assert_eq!(exchange.callback_count(), 0);
}

#[test]
fn engine_without_run_mode_refuses_to_run() {
    let source = ScriptedSource::new();
    let engine = TradingEngine::builder()
        .run_mode(RunMode::none())
        .exchange(Box::new(source.clone()))
        .risk(Box::new(SpyRisk::approving()))
        .execution(Box::new(SpyExecution::filling()))
        .build()
        .unwrap();

    let err = engine.run().unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::NoRunMode)));
    assert_eq!(source.runs(), 0);
}

#[test]
fn strategy_handle_is_inert_after_engine_drop() {
    let strategy = FlagStrategy::new("orphan");
    let tracker = strategy.tracker();
    {
        let engine = engine(TradingType::Sandbox, &SpyRisk::approving(), &SpyExecution::filling());
        engine.register_strategy(Box::new(strategy));
    }
    let handle = tracker.engine().expect("engine handle attached");

    let mut failed = false;
    let response = handle
        .request_buy(buy_request(), &mut |_| {}, Some(&mut |_| failed = true))
        .unwrap();

    assert!(failed);
    assert!(!response.success);
}

#[test]
fn verbose_mode_does_not_change_responses() {
    let respond = |print: bool| {
        let risk = SpyRisk::approving();
        let source = ScriptedSource::new().with_events(vec![trade_event(dec!(7))]);
        let engine = TradingEngine::builder()
            .trading_type(TradingType::Live)
            .print(print)
            .exchange(Box::new(source.clone()))
            .risk(Box::new(risk.clone()))
            .execution(Box::new(SpyExecution::filling()))
            .build()
            .unwrap();
        engine.run().unwrap();

        let mut seen = Vec::new();
        let mut response = engine
            .request_buy(buy_request(), &mut |r: &TradeResponse| seen.push(r.success), None)
            .unwrap();
        assert!(response.order_id.take().is_some());
        (response, seen, risk.update_calls(), source.callback_count())
    };

    let (quiet, quiet_seen, quiet_updates, quiet_callbacks) = respond(false);
    let (verbose, verbose_seen, verbose_updates, verbose_callbacks) = respond(true);

    assert_eq!(quiet, verbose);
    assert_eq!(quiet_seen, verbose_seen);
    assert_eq!(quiet_updates, verbose_updates);
    assert_eq!((quiet_callbacks, verbose_callbacks), (0, 1));
}
