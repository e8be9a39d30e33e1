//! Mode selector: holds the data-source collaborators and picks the one that
//! drives the run loop.

use tracing::warn;

use crate::domain::RunMode;
use crate::error::{ConfigError, Result};
use crate::port::inbound::Tickable;
use crate::port::outbound::{Backtest, Callback, Exchange};

/// Data sources for one engine, fixed at construction.
///
/// The exchange is always present. The backtest collaborator is kept only in
/// backtest mode; one supplied for any other mode is dropped.
pub struct ModeSelector {
    mode: RunMode,
    exchange: Box<dyn Exchange>,
    backtest: Option<Box<dyn Backtest>>,
}

impl ModeSelector {
    pub fn new(
        mode: RunMode,
        exchange: Box<dyn Exchange>,
        backtest: Option<Box<dyn Backtest>>,
    ) -> Self {
        let backtest = if mode.is_backtest() { backtest } else { None };
        Self {
            mode,
            exchange,
            backtest,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn exchange(&self) -> &dyn Exchange {
        self.exchange.as_ref()
    }

    pub fn backtest(&self) -> Option<&dyn Backtest> {
        self.backtest.as_deref()
    }

    /// Subscribe a callback to whichever source is active for this mode.
    pub fn subscribe(&self, callback: Box<dyn Callback>) {
        if self.mode.uses_exchange() {
            self.exchange.register_callback(callback);
        } else if self.mode.is_backtest() {
            match &self.backtest {
                Some(backtest) => backtest.register_callback(callback),
                None => warn!("Backtest mode without a backtest source, callback dropped"),
            }
        } else {
            warn!("No run mode selected, callback dropped");
        }
    }

    /// Hand the run loop to the active source.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoRunMode`] when no source matches the mode; otherwise
    /// whatever the source returns.
    pub fn run(&self, engine: &dyn Tickable) -> Result<()> {
        if self.mode.uses_exchange() {
            return self.exchange.run(engine);
        }
        if self.mode.is_backtest() {
            if let Some(backtest) = &self.backtest {
                return backtest.run(engine);
            }
        }
        Err(ConfigError::NoRunMode.into())
    }
}
