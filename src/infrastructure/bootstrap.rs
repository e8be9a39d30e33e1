//! Composition root: configuration in, ready-to-run engine out.

use tracing::info;

use crate::application::TradingEngine;
use crate::error::Result;
use crate::infrastructure::config::TradingEngineConfig;
use crate::infrastructure::factory::CollaboratorFactory;

impl TradingEngine {
    /// Build an engine from configuration, without strategies.
    ///
    /// # Errors
    ///
    /// Any error creating a collaborator or querying the exchange's accounts.
    pub fn from_config(config: &TradingEngineConfig) -> Result<Self> {
        let mut builder = TradingEngine::builder()
            .trading_type(config.trading_type)
            .print(config.print)
            .exchange(CollaboratorFactory::create_exchange(config)?)
            .risk(CollaboratorFactory::create_risk(config))
            .execution(CollaboratorFactory::create_execution(config));
        if let Some(backtest) = CollaboratorFactory::create_backtest(config)? {
            builder = builder.backtest(backtest);
        }
        builder.build()
    }
}

/// Build an engine and register every enabled strategy.
///
/// # Errors
///
/// See [`TradingEngine::from_config`].
pub fn build_engine(config: &TradingEngineConfig) -> Result<TradingEngine> {
    let engine = TradingEngine::from_config(config)?;
    for strategy in CollaboratorFactory::create_strategies(config) {
        engine.register_strategy(strategy);
    }
    info!(
        mode = %config.trading_type,
        strategies = engine.strategy_count(),
        "Engine ready"
    );
    Ok(engine)
}
