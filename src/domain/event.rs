//! Market data events delivered by data sources to callbacks.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::Instrument;
use super::trade::Side;

/// Category of a market data event.
///
/// Callbacks opt in or out of each category individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A trade occurred.
    Match,
    /// An order was received by the venue.
    Received,
    /// An order is resting on the book.
    Open,
    /// An order left the book.
    Done,
    /// An order changed size.
    Change,
    /// The feed reported an error.
    Error,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Received => "received",
            Self::Open => "open",
            Self::Done => "done",
            Self::Change => "change",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single market data event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub kind: EventKind,
    pub instrument: Instrument,
    pub price: Decimal,
    pub volume: Decimal,
    /// Aggressor side, when the venue reports one.
    #[serde(default)]
    pub side: Option<Side>,
    /// Position of the event in its feed.
    #[serde(default)]
    pub sequence: u64,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl MarketEvent {
    /// Create an event stamped with the current time.
    pub fn new(kind: EventKind, instrument: Instrument, price: Decimal, volume: Decimal) -> Self {
        Self {
            kind,
            instrument,
            price,
            volume,
            side: None,
            sequence: 0,
            timestamp: Utc::now(),
        }
    }

    /// Create a trade (match) event.
    pub fn trade(instrument: Instrument, price: Decimal, volume: Decimal) -> Self {
        Self::new(EventKind::Match, instrument, price, volume)
    }

    #[must_use]
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    #[must_use]
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn event_deserializes_with_defaults() {
        let json = r#"{"kind":"match","instrument":"BTC-USD","price":"100.5","volume":"2"}"#;
        let event: MarketEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, EventKind::Match);
        assert_eq!(event.instrument.as_str(), "BTC-USD");
        assert_eq!(event.price, dec!(100.5));
        assert_eq!(event.sequence, 0);
        assert!(event.side.is_none());
    }

    #[test]
    fn trade_builder_sets_match_kind() {
        let event = MarketEvent::trade(Instrument::from("ETH-USD"), dec!(1), dec!(3))
            .with_side(Side::Sell)
            .with_sequence(7);
        assert_eq!(event.kind, EventKind::Match);
        assert_eq!(event.side, Some(Side::Sell));
        assert_eq!(event.sequence, 7);
    }
}
