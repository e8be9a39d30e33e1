//! Command-line interface.

pub mod check;
pub mod command;
pub mod run;

pub use command::{CheckArgs, Cli, Commands, RunArgs};
