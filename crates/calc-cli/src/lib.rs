//! scicalc: command-line host for the scientific calculator
//!
//! Keys are given as text tokens; state persists in an optional JSON file
//! between invocations.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
mod output;
mod runner;
mod store;

pub use commands::{Cli, Commands, EvalArgs, HistoryArgs};
pub use config::{load_engine_config, CliConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use output::TerminalDisplay;
pub use runner::TokenRunner;
pub use store::JsonFileStore;
