//! CSV-backed backtest source.
//!
//! Expected columns: `timestamp,instrument,price,volume[,side]`, timestamps
//! in RFC 3339. Every row becomes a match event, replayed in file order.

use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::domain::{Instrument, MarketEvent, Side};
use crate::error::{FeedError, Result};
use crate::port::inbound::Tickable;
use crate::port::outbound::{Backtest, Callback};

use super::replay::ReplayFeed;

#[derive(Debug, Deserialize)]
struct TradeRow {
    timestamp: DateTime<Utc>,
    instrument: String,
    price: Decimal,
    volume: Decimal,
    #[serde(default)]
    side: Option<Side>,
}

pub struct CsvBacktest {
    feed: ReplayFeed,
}

impl CsvBacktest {
    /// Load trades from a CSV file.
    ///
    /// # Errors
    ///
    /// [`FeedError::Read`] if the file cannot be opened, a CSV error for
    /// malformed rows.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|source| FeedError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let backtest = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            events = backtest.event_count(),
            "Loaded backtest data"
        );
        Ok(backtest)
    }

    /// Load trades from any CSV reader with a header row.
    ///
    /// # Errors
    ///
    /// A CSV error for malformed rows.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut events = Vec::new();
        for (index, row) in reader.deserialize::<TradeRow>().enumerate() {
            let row = row?;
            let mut event = MarketEvent::trade(Instrument::new(row.instrument), row.price, row.volume)
                .with_sequence(index as u64 + 1)
                .with_timestamp(row.timestamp);
            event.side = row.side;
            events.push(event);
        }
        Ok(Self {
            feed: ReplayFeed::new(events),
        })
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.feed.len()
    }
}

impl Backtest for CsvBacktest {
    fn register_callback(&self, callback: Box<dyn Callback>) {
        self.feed.register(callback);
    }

    fn run(&self, engine: &dyn Tickable) -> Result<()> {
        let replayed = self.feed.replay(engine)?;
        info!(events = replayed, "Backtest complete");
        Ok(())
    }
}
