//! CLI configuration

use std::fs;
use std::path::{Path, PathBuf};

use scientific_calculator::config::EngineConfig;

use crate::error::{CliError, CliResult};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Quiet - main display only, errors only in the log
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - engine state transitions
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// From the `-q` flag and the `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Default `tracing` filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
            Self::Debug => "trace",
        }
    }
}

/// Settings for one `scicalc` invocation
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Output verbosity
    pub verbosity: Verbosity,
    /// Engine tunables
    pub engine: EngineConfig,
    /// State file, `None` for an in-memory session
    pub state: Option<PathBuf>,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the state file
    #[must_use]
    pub fn with_state(mut self, state: Option<PathBuf>) -> Self {
        self.state = state;
        self
    }

    /// Set engine configuration
    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

/// Reads an [`EngineConfig`] JSON file
pub fn load_engine_config(path: &Path) -> CliResult<EngineConfig> {
    let text = fs::read_to_string(path).map_err(|e| CliError::config(path, e.to_string()))?;
    EngineConfig::from_json(&text).map_err(|e| CliError::config(path, e.to_string()))
}
