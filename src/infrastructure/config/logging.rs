//! `[logging]` table: filter level and output format for the engine's
//! tracing subscriber.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines for a terminal.
    #[default]
    Pretty,
    /// One JSON object per line, for log shippers.
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset, e.g.
    /// `"info"` or `"tradeloop=debug,warn"`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Filter built from `RUST_LOG`, else from `level`.
    ///
    /// Directives in `level` that fail to parse are dropped rather than
    /// rejected, so a typo never silences the engine entirely.
    #[must_use]
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Install the global subscriber. A subscriber that is already installed
    /// (tests, embedding callers) is left in place.
    pub fn init(&self) {
        let builder = fmt().with_env_filter(self.filter()).with_target(true);
        let installed = match self.format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Pretty => builder.try_init(),
        };
        if installed.is_err() {
            tracing::debug!("Global subscriber already set; keeping it");
        }
    }
}
