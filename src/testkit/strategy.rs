//! Test strategies and callbacks.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{EventKind, MarketEvent};
use crate::port::inbound::{TradeRequester, TradingStrategy};
use crate::port::outbound::{Callback, CallbackOptions};

#[derive(Default)]
struct FlagState {
    ticked: AtomicBool,
    tick_on_event: AtomicBool,
    resets: AtomicUsize,
    callbacks_built: AtomicUsize,
    events: Mutex<Vec<MarketEvent>>,
    engine: Mutex<Option<Arc<dyn TradeRequester>>>,
}

/// Strategy whose ticked flag is controlled by the test.
///
/// Keep a [`FlagTracker`] (from [`FlagStrategy::tracker`]) before boxing the
/// strategy into the engine.
pub struct FlagStrategy {
    name: String,
    state: Arc<FlagState>,
}

impl FlagStrategy {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Arc::default(),
        }
    }

    /// Start with the ticked flag already set.
    #[must_use]
    pub fn ticked(self) -> Self {
        self.state.ticked.store(true, Ordering::SeqCst);
        self
    }

    /// Set the ticked flag whenever the callback receives an event.
    #[must_use]
    pub fn tick_on_event(self) -> Self {
        self.state.tick_on_event.store(true, Ordering::SeqCst);
        self
    }

    pub fn tracker(&self) -> FlagTracker {
        FlagTracker {
            state: Arc::clone(&self.state),
        }
    }
}

impl TradingStrategy for FlagStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn callback(&self) -> Box<dyn Callback> {
        self.state.callbacks_built.fetch_add(1, Ordering::SeqCst);
        Box::new(FlagCallback {
            state: Arc::clone(&self.state),
        })
    }

    fn ticked(&self) -> bool {
        self.state.ticked.load(Ordering::SeqCst)
    }

    fn reset(&mut self) {
        self.state.resets.fetch_add(1, Ordering::SeqCst);
        self.state.ticked.store(false, Ordering::SeqCst);
    }

    fn set_engine(&mut self, engine: Arc<dyn TradeRequester>) {
        *self.state.engine.lock() = Some(engine);
    }
}

struct FlagCallback {
    state: Arc<FlagState>,
}

impl FlagCallback {
    fn record(&self, event: &MarketEvent) {
        self.state.events.lock().push(event.clone());
        if self.state.tick_on_event.load(Ordering::SeqCst) {
            self.state.ticked.store(true, Ordering::SeqCst);
        }
    }
}

impl Callback for FlagCallback {
    fn on_match(&self, event: &MarketEvent) {
        self.record(event);
    }

    fn on_received(&self, event: &MarketEvent) {
        self.record(event);
    }

    fn on_open(&self, event: &MarketEvent) {
        self.record(event);
    }

    fn on_done(&self, event: &MarketEvent) {
        self.record(event);
    }

    fn on_change(&self, event: &MarketEvent) {
        self.record(event);
    }

    fn on_error(&self, event: &MarketEvent) {
        self.record(event);
    }
}

/// Shared view into a [`FlagStrategy`] after it has been registered.
#[derive(Clone)]
pub struct FlagTracker {
    state: Arc<FlagState>,
}

impl FlagTracker {
    pub fn set_ticked(&self, ticked: bool) {
        self.state.ticked.store(ticked, Ordering::SeqCst);
    }

    pub fn is_ticked(&self) -> bool {
        self.state.ticked.load(Ordering::SeqCst)
    }

    pub fn resets(&self) -> usize {
        self.state.resets.load(Ordering::SeqCst)
    }

    pub fn callbacks_built(&self) -> usize {
        self.state.callbacks_built.load(Ordering::SeqCst)
    }

    pub fn events(&self) -> Vec<MarketEvent> {
        self.state.events.lock().clone()
    }

    /// The capability handed over at registration.
    pub fn engine(&self) -> Option<Arc<dyn TradeRequester>> {
        self.state.engine.lock().clone()
    }
}

/// Callback that records the kinds of delivered events.
#[derive(Clone)]
pub struct RecordingCallback {
    options: CallbackOptions,
    kinds: Arc<Mutex<Vec<EventKind>>>,
}

impl RecordingCallback {
    pub fn new(options: CallbackOptions) -> Self {
        Self {
            options,
            kinds: Arc::default(),
        }
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.kinds.lock().clone()
    }
}

impl Default for RecordingCallback {
    fn default() -> Self {
        Self::new(CallbackOptions::all())
    }
}

impl Callback for RecordingCallback {
    fn options(&self) -> CallbackOptions {
        self.options
    }

    fn on_match(&self, event: &MarketEvent) {
        self.kinds.lock().push(event.kind);
    }

    fn on_received(&self, event: &MarketEvent) {
        self.kinds.lock().push(event.kind);
    }

    fn on_open(&self, event: &MarketEvent) {
        self.kinds.lock().push(event.kind);
    }

    fn on_done(&self, event: &MarketEvent) {
        self.kinds.lock().push(event.kind);
    }

    fn on_change(&self, event: &MarketEvent) {
        self.kinds.lock().push(event.kind);
    }

    fn on_error(&self, event: &MarketEvent) {
        self.kinds.lock().push(event.kind);
    }
}
