//! In-memory event replay shared by the paper exchange and the CSV backtest.

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::MarketEvent;
use crate::error::Result;
use crate::port::inbound::Tickable;
use crate::port::outbound::{deliver, Callback};

/// Ordered events plus the callbacks subscribed to them.
///
/// Callbacks must not subscribe new callbacks while an event is being
/// delivered.
pub struct ReplayFeed {
    events: Vec<MarketEvent>,
    callbacks: RwLock<Vec<Box<dyn Callback>>>,
}

impl ReplayFeed {
    pub fn new(events: Vec<MarketEvent>) -> Self {
        Self {
            events,
            callbacks: RwLock::new(Vec::new()),
        }
    }

    pub fn register(&self, callback: Box<dyn Callback>) {
        self.callbacks.write().push(callback);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().len()
    }

    /// Deliver every event to every callback (registration order), ticking
    /// the engine once after each event. Returns the number of events.
    pub fn replay(&self, engine: &dyn Tickable) -> Result<usize> {
        for event in &self.events {
            {
                let callbacks = self.callbacks.read();
                for callback in callbacks.iter() {
                    deliver(callback.as_ref(), event);
                }
            }
            engine.tick();
        }
        debug!(events = self.events.len(), "Replay finished");
        Ok(self.events.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventKind;
    use crate::port::outbound::CallbackOptions;
    use crate::testkit::{trade_event, RecordingCallback};
    use rust_decimal_macros::dec;
    use std::cell::Cell;

    struct CountingTicker(Cell<usize>);

    impl Tickable for CountingTicker {
        fn tick(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn replay_delivers_then_ticks_per_event() {
        let feed = ReplayFeed::new(vec![trade_event(dec!(1)), trade_event(dec!(2))]);
        let all = RecordingCallback::default();
        let none = RecordingCallback::new(CallbackOptions {
            on_match: false,
            ..CallbackOptions::all()
        });
        feed.register(Box::new(all.clone()));
        feed.register(Box::new(none.clone()));
        let ticker = CountingTicker(Cell::new(0));

        let replayed = feed.replay(&ticker).unwrap();

        assert_eq!(replayed, 2);
        assert_eq!(ticker.0.get(), 2);
        assert_eq!(all.kinds(), vec![EventKind::Match, EventKind::Match]);
        assert!(none.kinds().is_empty());
    }

    #[test]
    fn empty_feed_never_ticks() {
        let feed = ReplayFeed::new(vec![]);
        let ticker = CountingTicker(Cell::new(0));
        assert_eq!(feed.replay(&ticker).unwrap(), 0);
        assert_eq!(ticker.0.get(), 0);
        assert!(feed.is_empty());
    }
}
