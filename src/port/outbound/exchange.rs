//! Data-source ports.
//!
//! Both the live/sandbox exchange and the backtest replayer own the run
//! loop: `run` blocks, delivers events to registered callbacks and calls
//! back into the engine's [`Tickable::tick`] as it goes.

use crate::domain::Account;
use crate::error::Result;
use crate::port::inbound::Tickable;

use super::callback::Callback;

/// Live or sandbox market data source.
pub trait Exchange: Send + Sync {
    /// Name for logging/debugging.
    fn name(&self) -> &'static str;

    /// Account balances, queried once at engine startup.
    fn accounts(&self) -> Result<Vec<Account>>;

    /// Subscribe a callback to the event stream.
    fn register_callback(&self, callback: Box<dyn Callback>);

    /// Drive the event loop until the source is exhausted or fails.
    fn run(&self, engine: &dyn Tickable) -> Result<()>;
}

/// Historical replay source.
pub trait Backtest: Send + Sync {
    /// Subscribe a callback to the replayed events.
    fn register_callback(&self, callback: Box<dyn Callback>);

    /// Replay every event, ticking the engine as it goes.
    fn run(&self, engine: &dyn Tickable) -> Result<()>;
}
