//! Run mode selection.
//!
//! A [`TradingType`] comes from configuration; [`RunMode`] is the resolved
//! set of mutually exclusive flags the engine consults for the rest of its
//! lifetime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which kind of run the engine performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingType {
    /// Real venue, real money.
    Live,
    /// Real venue protocol against a sandbox account.
    #[default]
    Sandbox,
    /// Historical replay.
    Backtest,
}

impl TradingType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Sandbox => "sandbox",
            Self::Backtest => "backtest",
        }
    }
}

impl fmt::Display for TradingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "sandbox" => Ok(Self::Sandbox),
            "backtest" => Ok(Self::Backtest),
            other => Err(format!("unknown trading type '{other}'")),
        }
    }
}

/// Resolved run mode flags.
///
/// Built with [`RunMode::select`], exactly one flag is set and it never
/// changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunMode {
    live: bool,
    sandbox: bool,
    backtest: bool,
}

impl RunMode {
    /// Derive the flags for a trading type.
    #[must_use]
    pub const fn select(trading_type: TradingType) -> Self {
        Self {
            live: matches!(trading_type, TradingType::Live),
            sandbox: matches!(trading_type, TradingType::Sandbox),
            backtest: matches!(trading_type, TradingType::Backtest),
        }
    }

    /// A mode with no flag set. Engines carrying it refuse to run.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            live: false,
            sandbox: false,
            backtest: false,
        }
    }

    #[must_use]
    pub const fn is_live(self) -> bool {
        self.live
    }

    #[must_use]
    pub const fn is_sandbox(self) -> bool {
        self.sandbox
    }

    #[must_use]
    pub const fn is_backtest(self) -> bool {
        self.backtest
    }

    /// True when the exchange collaborator drives the run loop.
    #[must_use]
    pub const fn uses_exchange(self) -> bool {
        self.live || self.sandbox
    }

    /// The trading type these flags were derived from, if any.
    #[must_use]
    pub const fn trading_type(self) -> Option<TradingType> {
        if self.live {
            Some(TradingType::Live)
        } else if self.sandbox {
            Some(TradingType::Sandbox)
        } else if self.backtest {
            Some(TradingType::Backtest)
        } else {
            None
        }
    }
}

impl From<TradingType> for RunMode {
    fn from(trading_type: TradingType) -> Self {
        Self::select(trading_type)
    }
}
