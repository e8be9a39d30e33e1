//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::TradingType;

/// Trading engine orchestrator
#[derive(Parser, Debug)]
#[command(name = "tradeloop")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the engine until the data source is exhausted or Ctrl-C
    Run(RunArgs),

    /// Validate a configuration file and print a summary
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "tradeloop.toml")]
    pub config: PathBuf,

    /// Override the run mode (live, sandbox, backtest).
    #[arg(long)]
    pub mode: Option<TradingType>,

    /// Log every trade event delivered by the data source.
    #[arg(long)]
    pub print: bool,

    /// Start with trading halted.
    #[arg(long)]
    pub halted: bool,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "tradeloop.toml")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_parses_overrides() {
        let cli = Cli::try_parse_from([
            "tradeloop", "run", "--config", "x.toml", "--mode", "backtest", "--print", "--halted",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.config, PathBuf::from("x.toml"));
                assert_eq!(args.mode, Some(TradingType::Backtest));
                assert!(args.print);
                assert!(args.halted);
            }
            Commands::Check(_) => panic!("expected run"),
        }
    }

    #[test]
    fn check_uses_default_config_path() {
        let cli = Cli::try_parse_from(["tradeloop", "check"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert_eq!(args.config, PathBuf::from("tradeloop.toml")),
            Commands::Run(_) => panic!("expected check"),
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["tradeloop", "run", "--mode", "paper"]).is_err());
    }
}
