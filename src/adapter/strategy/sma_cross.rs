//! Moving-average crossover strategy.
//!
//! Keeps a short and a long simple moving average of trade prices per
//! instrument. Buys when the short average crosses above the long one,
//! sells the held position when it crosses back below.

use std::cmp::Ordering as CmpOrdering;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::{Instrument, MarketEvent, Side, TradeRequest, TradeResponse};
use crate::error::ConfigError;
use crate::port::inbound::{TradeRequester, TradingStrategy};
use crate::port::outbound::{Callback, CallbackOptions};

/// Configuration for the crossover strategy.
#[derive(Debug, Clone, Deserialize)]
pub struct SmaCrossConfig {
    /// Trades in the short average.
    #[serde(default = "default_short_window")]
    pub short_window: usize,

    /// Trades in the long average.
    #[serde(default = "default_long_window")]
    pub long_window: usize,

    /// Volume per buy.
    #[serde(default = "default_volume")]
    pub volume: Decimal,

    /// Restrict trading to one instrument. All instruments when unset.
    #[serde(default)]
    pub instrument: Option<String>,
}

fn default_short_window() -> usize {
    5
}

fn default_long_window() -> usize {
    20
}

fn default_volume() -> Decimal {
    Decimal::ONE
}

impl SmaCrossConfig {
    /// Check `0 < short_window < long_window` and a positive volume.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_windows(self.short_window, self.long_window)?;
        if self.volume <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "volume",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

fn check_windows(short: usize, long: usize) -> Result<(), ConfigError> {
    if short == 0 || short >= long {
        return Err(ConfigError::InvalidValue {
            field: "short_window",
            reason: "must be greater than 0 and less than long_window".to_string(),
        });
    }
    Ok(())
}

impl Default for SmaCrossConfig {
    fn default() -> Self {
        Self {
            short_window: default_short_window(),
            long_window: default_long_window(),
            volume: default_volume(),
            instrument: None,
        }
    }
}

/// A crossover between the two averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossSignal {
    /// Short average moved above the long one.
    Up,
    /// Short average moved below the long one.
    Down,
}

/// Rolling price window producing crossover signals.
#[derive(Debug, Clone)]
pub struct PriceWindow {
    short: usize,
    long: usize,
    prices: VecDeque<Decimal>,
    // Last strict ordering of short vs long; equality keeps the previous one.
    relation: Option<CmpOrdering>,
}

impl PriceWindow {
    /// Create a window averaging the last `short` and `long` prices.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] unless `0 < short < long`.
    pub fn new(short: usize, long: usize) -> Result<Self, ConfigError> {
        check_windows(short, long)?;
        Ok(Self::with_windows(short, long))
    }

    // Callers guarantee 0 < short < long.
    fn with_windows(short: usize, long: usize) -> Self {
        Self {
            short,
            long,
            prices: VecDeque::with_capacity(long + 1),
            relation: None,
        }
    }

    fn mean(&self, n: usize) -> Decimal {
        let sum: Decimal = self.prices.iter().rev().take(n).sum();
        sum / Decimal::from(n)
    }

    /// Add a price; returns a signal if the averages crossed.
    ///
    /// No signal is produced until the long window is full and one strict
    /// ordering of the averages has been observed.
    pub fn push(&mut self, price: Decimal) -> Option<CrossSignal> {
        self.prices.push_back(price);
        if self.prices.len() > self.long {
            self.prices.pop_front();
        }
        if self.prices.len() < self.long {
            return None;
        }

        let now = self.mean(self.short).cmp(&self.mean(self.long));
        if now == CmpOrdering::Equal {
            return None;
        }
        let signal = match (self.relation, now) {
            (Some(CmpOrdering::Less), CmpOrdering::Greater) => Some(CrossSignal::Up),
            (Some(CmpOrdering::Greater), CmpOrdering::Less) => Some(CrossSignal::Down),
            _ => None,
        };
        self.relation = Some(now);
        signal
    }
}

#[derive(Default)]
struct SmaState {
    windows: HashMap<Instrument, PriceWindow>,
    holdings: HashMap<Instrument, Decimal>,
}

struct Shared {
    config: SmaCrossConfig,
    state: Mutex<SmaState>,
    ticked: AtomicBool,
    engine: Mutex<Option<Arc<dyn TradeRequester>>>,
}

impl Shared {
    /// Decide what to request for `event`, without holding any lock afterwards.
    fn signal(&self, event: &MarketEvent) -> Option<TradeRequest> {
        let mut state = self.state.lock();
        let (short, long) = (self.config.short_window, self.config.long_window);
        let signal = state
            .windows
            .entry(event.instrument.clone())
            .or_insert_with(|| PriceWindow::with_windows(short, long))
            .push(event.price)?;

        match signal {
            CrossSignal::Up => Some(TradeRequest::buy(
                event.instrument.clone(),
                self.config.volume,
                event.price,
            )),
            CrossSignal::Down => {
                let held = state
                    .holdings
                    .get(&event.instrument)
                    .copied()
                    .unwrap_or_default();
                (held > Decimal::ZERO)
                    .then(|| TradeRequest::sell(event.instrument.clone(), held, event.price))
            }
        }
    }

    fn record_fill(&self, response: &TradeResponse) {
        let mut state = self.state.lock();
        let held = state
            .holdings
            .entry(response.instrument.clone())
            .or_default();
        match response.side {
            Side::Buy => *held += response.volume,
            Side::Sell => *held = (*held - response.volume).max(Decimal::ZERO),
        }
    }

    fn on_trade(&self, event: &MarketEvent) {
        if let Some(only) = &self.config.instrument {
            if only != event.instrument.as_str() {
                return;
            }
        }
        let Some(request) = self.signal(event) else {
            return;
        };
        self.ticked.store(true, Ordering::SeqCst);

        let Some(engine) = self.engine.lock().clone() else {
            debug!(instrument = %event.instrument, "Signal before engine attached");
            return;
        };

        let side = request.side;
        let mut on_success = |response: &TradeResponse| {
            info!(
                strategy = "sma_cross",
                side = %response.side,
                instrument = %response.instrument,
                volume = %response.volume,
                price = %response.price,
                "Crossover trade filled"
            );
        };
        let mut on_failure = |response: &TradeResponse| {
            debug!(
                strategy = "sma_cross",
                side = %response.side,
                reason = ?response.risk_reason,
                "Crossover trade not filled"
            );
        };
        let outcome = match side {
            Side::Buy => engine.request_buy(request, &mut on_success, Some(&mut on_failure)),
            Side::Sell => engine.request_sell(request, &mut on_success, Some(&mut on_failure)),
        };
        match outcome {
            Ok(response) if response.success => self.record_fill(&response),
            Ok(_) => {}
            Err(e) => warn!(strategy = "sma_cross", error = %e, "Trade request failed"),
        }
    }
}

/// Simple moving-average crossover strategy.
pub struct SmaCrossStrategy {
    shared: Arc<Shared>,
}

impl SmaCrossStrategy {
    /// Create the strategy.
    ///
    /// # Errors
    ///
    /// Any violation reported by [`SmaCrossConfig::validate`].
    pub fn new(config: SmaCrossConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(SmaState::default()),
                ticked: AtomicBool::new(false),
                engine: Mutex::new(None),
            }),
        })
    }

    pub fn config(&self) -> &SmaCrossConfig {
        &self.shared.config
    }

    /// Volume currently held in `instrument` according to filled responses.
    pub fn holding(&self, instrument: &Instrument) -> Decimal {
        self.shared
            .state
            .lock()
            .holdings
            .get(instrument)
            .copied()
            .unwrap_or_default()
    }
}

impl TradingStrategy for SmaCrossStrategy {
    fn name(&self) -> &str {
        "sma_cross"
    }

    fn callback(&self) -> Box<dyn Callback> {
        Box::new(SmaCallback {
            shared: Arc::clone(&self.shared),
        })
    }

    fn ticked(&self) -> bool {
        self.shared.ticked.load(Ordering::SeqCst)
    }

    fn reset(&mut self) {
        self.shared.ticked.store(false, Ordering::SeqCst);
    }

    fn set_engine(&mut self, engine: Arc<dyn TradeRequester>) {
        *self.shared.engine.lock() = Some(engine);
    }
}

struct SmaCallback {
    shared: Arc<Shared>,
}

impl Callback for SmaCallback {
    fn options(&self) -> CallbackOptions {
        CallbackOptions::only_match()
    }

    fn on_match(&self, event: &MarketEvent) {
        self.shared.on_trade(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::outbound::deliver;
    use crate::testkit::trade_event;
    use rust_decimal_macros::dec;

    #[test]
    fn window_needs_full_history_before_signalling() {
        let mut window = PriceWindow::new(2, 3).unwrap();
        assert_eq!(window.push(dec!(10)), None);
        assert_eq!(window.push(dec!(10)), None);
        // short 9.5 < long 9.67: first relation observed, no signal yet
        assert_eq!(window.push(dec!(9)), None);
    }

    #[test]
    fn window_signals_up_then_down() {
        let mut window = PriceWindow::new(2, 3).unwrap();
        for price in [dec!(10), dec!(10), dec!(9)] {
            window.push(price);
        }
        assert_eq!(window.push(dec!(12)), Some(CrossSignal::Up));
        assert_eq!(window.push(dec!(13)), None);
        assert_eq!(window.push(dec!(5)), Some(CrossSignal::Down));
        assert_eq!(window.push(dec!(4)), None);
    }

    #[test]
    fn equal_averages_keep_previous_relation() {
        let mut window = PriceWindow::new(1, 2).unwrap();
        window.push(dec!(10));
        assert_eq!(window.push(dec!(9)), None);
        assert_eq!(window.push(dec!(9)), None);
        assert_eq!(window.push(dec!(10)), Some(CrossSignal::Up));
    }

    #[test]
    fn zero_short_window_is_rejected() {
        assert!(matches!(
            PriceWindow::new(0, 2),
            Err(ConfigError::InvalidValue {
                field: "short_window",
                ..
            })
        ));
    }

    #[test]
    fn short_window_must_be_shorter_than_long() {
        assert!(PriceWindow::new(4, 2).is_err());
        assert!(PriceWindow::new(2, 2).is_err());
        let config = SmaCrossConfig {
            short_window: 4,
            long_window: 2,
            ..SmaCrossConfig::default()
        };
        assert!(SmaCrossStrategy::new(config).is_err());
    }

    #[test]
    fn non_positive_volume_is_rejected() {
        let config = SmaCrossConfig {
            volume: Decimal::ZERO,
            ..SmaCrossConfig::default()
        };
        assert!(matches!(
            SmaCrossStrategy::new(config),
            Err(ConfigError::InvalidValue { field: "volume", .. })
        ));
    }

    #[test]
    fn default_config_values() {
        let config = SmaCrossConfig::default();
        assert_eq!(config.short_window, 5);
        assert_eq!(config.long_window, 20);
        assert_eq!(config.volume, dec!(1));
        assert!(config.instrument.is_none());
    }

    #[test]
    fn signal_without_engine_still_marks_ticked() {
        let strategy = SmaCrossStrategy::new(SmaCrossConfig {
            short_window: 1,
            long_window: 2,
            ..SmaCrossConfig::default()
        })
        .unwrap();
        let callback = strategy.callback();
        for price in [dec!(10), dec!(9), dec!(11)] {
            deliver(callback.as_ref(), &trade_event(price));
        }
        assert!(strategy.ticked());
    }

    #[test]
    fn other_instruments_are_ignored() {
        let strategy = SmaCrossStrategy::new(SmaCrossConfig {
            short_window: 1,
            long_window: 2,
            instrument: Some("ETH-USD".into()),
            ..SmaCrossConfig::default()
        })
        .unwrap();
        let callback = strategy.callback();
        for price in [dec!(10), dec!(9), dec!(11)] {
            deliver(callback.as_ref(), &trade_event(price));
        }
        assert!(!strategy.ticked());
    }
}
