//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// scicalc: keystroke-driven scientific calculator
///
/// Tokens are keypad keys: numbers, `+ - x / mod ^ =`, `sin cos tan log ln
/// sqrt sq ! inv neg pi e`, memory keys `mc mr m+ m- ms`, `c ce bs`, angle
/// modes `deg rad grad drg`, history recall `h0..h9` and `hc`. `pow` asks
/// for an exponent, which is taken from the next token.
#[derive(Parser, Debug)]
#[command(name = "scicalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (print only the main display)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// JSON file holding memory, history and angle mode between runs
    #[arg(long, global = true, env = "SCICALC_STATE")]
    pub state: Option<PathBuf>,

    /// JSON engine configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a sequence of keys and print the display
    Eval(EvalArgs),

    /// Read key sequences from stdin, one line at a time
    Repl,

    /// Show the calculation history
    History(HistoryArgs),

    /// Forget memory, history and angle mode
    Reset,
}

/// Arguments for the eval command
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Keys to press, e.g. `3 + 4 x 2 =`
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub tokens: Vec<String>,

    /// Print the display as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}
