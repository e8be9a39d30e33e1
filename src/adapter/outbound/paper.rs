//! Paper exchange: configured balances and a recorded event feed.
//!
//! The feed file holds one JSON-encoded [`MarketEvent`] per line; blank
//! lines and lines starting with `#` are skipped.

use std::path::Path;

use tracing::info;

use crate::domain::{Account, MarketEvent};
use crate::error::{FeedError, Result};
use crate::port::inbound::Tickable;
use crate::port::outbound::{Callback, Exchange};

use super::replay::ReplayFeed;

pub struct PaperExchange {
    accounts: Vec<Account>,
    feed: ReplayFeed,
}

impl PaperExchange {
    pub fn new(accounts: Vec<Account>, events: Vec<MarketEvent>) -> Self {
        Self {
            accounts,
            feed: ReplayFeed::new(events),
        }
    }

    /// Read a JSON-lines event feed.
    ///
    /// # Errors
    ///
    /// [`FeedError::Read`] if the file cannot be read, [`FeedError::Parse`]
    /// naming the first bad line otherwise.
    pub fn load_feed(path: &Path) -> Result<Vec<MarketEvent>> {
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| FeedError::Read {
            path: shown.clone(),
            source,
        })?;
        let events = parse_feed(&content, &shown)?;
        info!(path = %shown, events = events.len(), "Loaded event feed");
        Ok(events)
    }

    /// Number of events this exchange will replay.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.feed.len()
    }
}

fn parse_feed(content: &str, path: &str) -> Result<Vec<MarketEvent>> {
    let mut events = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut event: MarketEvent =
            serde_json::from_str(line).map_err(|e| FeedError::Parse {
                path: path.to_string(),
                reason: format!("line {}: {e}", index + 1),
            })?;
        if event.sequence == 0 {
            event.sequence = events.len() as u64 + 1;
        }
        events.push(event);
    }
    Ok(events)
}

impl Exchange for PaperExchange {
    fn name(&self) -> &'static str {
        "paper"
    }

    fn accounts(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    fn register_callback(&self, callback: Box<dyn Callback>) {
        self.feed.register(callback);
    }

    fn run(&self, engine: &dyn Tickable) -> Result<()> {
        self.feed.replay(engine)?;
        Ok(())
    }
}
