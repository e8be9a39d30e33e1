use std::process::ExitCode;

use clap::Parser;
use tradeloop::adapter::inbound::cli::{check, run, Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run(args) => run::execute(args).await,
        Commands::Check(args) => check::execute(&args.config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(&e)
        }
    }
}
