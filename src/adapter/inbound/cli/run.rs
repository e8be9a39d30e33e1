//! Handler for the `run` command.

use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::build_engine;
use crate::infrastructure::config::TradingEngineConfig;

/// Apply command-line overrides to a parsed configuration, then validate it.
///
/// # Errors
///
/// Returns an error if the overridden configuration does not validate.
pub fn apply_overrides(mut config: TradingEngineConfig, args: &RunArgs) -> Result<TradingEngineConfig> {
    if let Some(mode) = args.mode {
        config.trading_type = mode;
    }
    config.print |= args.print;
    config.validate()?;
    Ok(config)
}

/// Execute the run command.
///
/// The data-source loop runs on a blocking task; Ctrl-C halts trading and
/// lets the loop finish.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let config = TradingEngineConfig::read(&args.config)?;
    let config = apply_overrides(config, args)?;
    config.init_logging();
    info!(config = %args.config.display(), mode = %config.trading_type, "tradeloop starting");

    let engine = Arc::new(build_engine(&config)?);
    if args.halted {
        engine.halt_trading();
    }

    let runner = Arc::clone(&engine);
    let mut task = tokio::task::spawn_blocking(move || runner.run());

    let joined = tokio::select! {
        joined = &mut task => joined,
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
            engine.halt_trading();
            task.await
        }
    };

    let result = joined.map_err(|e| Error::collaborator("runtime", e.to_string()))?;
    if let Err(e) = &result {
        error!(error = %e, "Engine run failed");
    }
    info!("tradeloop stopped");
    result
}
