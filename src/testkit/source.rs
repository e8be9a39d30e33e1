//! In-memory data source spy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{Account, MarketEvent};
use crate::error::Result;
use crate::port::inbound::Tickable;
use crate::port::outbound::{deliver, Backtest, Callback, Exchange};

#[derive(Default)]
struct SourceState {
    callbacks: Mutex<Vec<Box<dyn Callback>>>,
    accounts_calls: AtomicUsize,
    runs: AtomicUsize,
}

/// A data source with a fixed event script.
///
/// Implements both [`Exchange`] and [`Backtest`]. `run` delivers each event
/// to every callback and then ticks the engine once. Clones share state.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    events: Vec<MarketEvent>,
    accounts: Vec<Account>,
    state: Arc<SourceState>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_events(mut self, events: Vec<MarketEvent>) -> Self {
        self.events = events;
        self
    }

    #[must_use]
    pub fn with_accounts(mut self, accounts: Vec<Account>) -> Self {
        self.accounts = accounts;
        self
    }

    /// Number of subscribed callbacks.
    pub fn callback_count(&self) -> usize {
        self.state.callbacks.lock().len()
    }

    pub fn accounts_calls(&self) -> usize {
        self.state.accounts_calls.load(Ordering::SeqCst)
    }

    pub fn runs(&self) -> usize {
        self.state.runs.load(Ordering::SeqCst)
    }

    fn subscribe(&self, callback: Box<dyn Callback>) {
        self.state.callbacks.lock().push(callback);
    }

    fn replay(&self, engine: &dyn Tickable) -> Result<()> {
        self.state.runs.fetch_add(1, Ordering::SeqCst);
        for event in &self.events {
            for callback in self.state.callbacks.lock().iter() {
                deliver(callback.as_ref(), event);
            }
            engine.tick();
        }
        Ok(())
    }
}

impl Exchange for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn accounts(&self) -> Result<Vec<Account>> {
        self.state.accounts_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.clone())
    }

    fn register_callback(&self, callback: Box<dyn Callback>) {
        self.subscribe(callback);
    }

    fn run(&self, engine: &dyn Tickable) -> Result<()> {
        self.replay(engine)
    }
}

impl Backtest for ScriptedSource {
    fn register_callback(&self, callback: Box<dyn Callback>) {
        self.subscribe(callback);
    }

    fn run(&self, engine: &dyn Tickable) -> Result<()> {
        self.replay(engine)
    }
}
