//! Error types for the CLI

use std::path::PathBuf;

use scientific_calculator::host::StorageError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that end a `scicalc` run
///
/// Calculator errors are not here: they are shown on the display.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be loaded
    #[error("Configuration error in {}: {message}", path.display())]
    Config {
        /// Offending file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// State file could not be read or written
    #[error("State file error in {}: {source}", path.display())]
    State {
        /// Offending file
        path: PathBuf,
        /// Underlying storage error
        #[source]
        source: StorageError,
    },

    /// Token not understood by the keypad
    #[error("Unknown token: {token}")]
    UnknownToken {
        /// The token as typed
        token: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a state file error
    #[must_use]
    pub fn state(path: impl Into<PathBuf>, source: StorageError) -> Self {
        Self::State {
            path: path.into(),
            source,
        }
    }

    /// Create an unknown token error
    #[must_use]
    pub fn unknown_token(token: impl Into<String>) -> Self {
        Self::UnknownToken {
            token: token.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::config("calc.json", "expected value");
        assert_eq!(
            err.to_string(),
            "Configuration error in calc.json: expected value"
        );
    }

    #[test]
    fn test_state_error_display() {
        let err = CliError::state("state.json", StorageError::unavailable("locked"));
        assert!(err.to_string().contains("state.json"));
        assert!(err.to_string().contains("locked"));
    }

    #[test]
    fn test_unknown_token_display() {
        let err = CliError::unknown_token("sinh");
        assert_eq!(err.to_string(), "Unknown token: sinh");
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CliError = io_err.into();
        assert!(matches!(err, CliError::Io(_)));
    }
}
