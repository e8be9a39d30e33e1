//! Data-event callback port.
//!
//! Data sources fan every event out to their registered callbacks through
//! [`deliver`], which honours each callback's [`CallbackOptions`].

use tracing::info;

use crate::domain::{EventKind, MarketEvent};

/// Which event categories a callback wants delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackOptions {
    pub on_match: bool,
    pub on_received: bool,
    pub on_open: bool,
    pub on_done: bool,
    pub on_change: bool,
    pub on_error: bool,
}

impl CallbackOptions {
    /// Every category enabled.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            on_match: true,
            on_received: true,
            on_open: true,
            on_done: true,
            on_change: true,
            on_error: true,
        }
    }

    /// Only trade (match) events.
    #[must_use]
    pub const fn only_match() -> Self {
        Self {
            on_match: true,
            on_received: false,
            on_open: false,
            on_done: false,
            on_change: false,
            on_error: false,
        }
    }

    /// Whether events of `kind` should be delivered.
    #[must_use]
    pub const fn accepts(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Match => self.on_match,
            EventKind::Received => self.on_received,
            EventKind::Open => self.on_open,
            EventKind::Done => self.on_done,
            EventKind::Change => self.on_change,
            EventKind::Error => self.on_error,
        }
    }
}

impl Default for CallbackOptions {
    fn default() -> Self {
        Self::all()
    }
}

/// Receiver of market data events.
///
/// Every handler defaults to a no-op, so implementations override only the
/// categories they care about.
pub trait Callback: Send + Sync {
    fn options(&self) -> CallbackOptions {
        CallbackOptions::all()
    }

    fn on_match(&self, _event: &MarketEvent) {}

    fn on_received(&self, _event: &MarketEvent) {}

    fn on_open(&self, _event: &MarketEvent) {}

    fn on_done(&self, _event: &MarketEvent) {}

    fn on_change(&self, _event: &MarketEvent) {}

    fn on_error(&self, _event: &MarketEvent) {}
}

/// Route `event` to the handler for its kind, if the callback accepts it.
pub fn deliver(callback: &dyn Callback, event: &MarketEvent) {
    if !callback.options().accepts(event.kind) {
        return;
    }
    match event.kind {
        EventKind::Match => callback.on_match(event),
        EventKind::Received => callback.on_received(event),
        EventKind::Open => callback.on_open(event),
        EventKind::Done => callback.on_done(event),
        EventKind::Change => callback.on_change(event),
        EventKind::Error => callback.on_error(event),
    }
}

/// A callback that logs delivered events via tracing.
///
/// Purely observational: it holds no state and never touches the engine.
pub struct Print {
    options: CallbackOptions,
}

impl Print {
    pub const fn new(options: CallbackOptions) -> Self {
        Self { options }
    }

    /// Log trade (match) events only.
    pub const fn match_only() -> Self {
        Self::new(CallbackOptions::only_match())
    }

    fn log(event: &MarketEvent) {
        info!(
            kind = %event.kind,
            instrument = %event.instrument,
            price = %event.price,
            volume = %event.volume,
            sequence = event.sequence,
            "Market event"
        );
    }
}

impl Default for Print {
    fn default() -> Self {
        Self::new(CallbackOptions::all())
    }
}

impl Callback for Print {
    fn options(&self) -> CallbackOptions {
        self.options
    }

    fn on_match(&self, event: &MarketEvent) {
        Self::log(event);
    }

    fn on_received(&self, event: &MarketEvent) {
        Self::log(event);
    }

    fn on_open(&self, event: &MarketEvent) {
        Self::log(event);
    }

    fn on_done(&self, event: &MarketEvent) {
        Self::log(event);
    }

    fn on_change(&self, event: &MarketEvent) {
        Self::log(event);
    }

    fn on_error(&self, event: &MarketEvent) {
        Self::log(event);
    }
}
