//! Handler for the `check` command.

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::TradingEngineConfig;

/// Validate a configuration file without building the engine.
pub fn execute(config_path: &Path) -> Result<()> {
    let config = TradingEngineConfig::load(config_path)?;
    println!("{}", summary(config_path, &config));
    Ok(())
}

fn summary(path: &Path, config: &TradingEngineConfig) -> String {
    let strategies = if config.strategies.enabled.is_empty() {
        "none".to_string()
    } else {
        config.strategies.enabled.join(", ")
    };
    let backtest = config
        .backtest
        .file
        .as_ref()
        .map_or_else(|| "-".to_string(), |p| p.display().to_string());

    [
        format!("Configuration {} is valid", path.display()),
        format!("  mode:        {}", config.trading_type),
        format!("  exchange:    {}", config.exchange.exchange_type.as_str()),
        format!("  accounts:    {}", config.exchange.accounts.len()),
        format!(
            "  risk:        funds {} / max risk {} / max drawdown {}",
            config.risk.total_funds, config.risk.max_risk, config.risk.max_drawdown
        ),
        format!("  fee rate:    {}", config.execution.fee_rate),
        format!("  backtest:    {backtest}"),
        format!("  strategies:  {strategies}"),
        format!("  print:       {}", config.print),
    ]
    .join("\n")
}
