//! Engine configuration

use serde::{Deserialize, Serialize};

/// Tunables for a calculator session
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of history entries kept
    pub history_limit: usize,
    /// Largest accepted factorial argument
    pub factorial_limit: u32,
    /// How long an error stays on the display before recovery (milliseconds)
    pub error_display_ms: u64,
    /// Prefix for persisted keys
    pub storage_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: 10,
            factorial_limit: 100,
            error_display_ms: 1500,
            storage_prefix: "calculadora".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the history bound
    #[must_use]
    pub const fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Set the factorial ceiling
    #[must_use]
    pub const fn with_factorial_limit(mut self, limit: u32) -> Self {
        self.factorial_limit = limit;
        self
    }

    /// Set the error display delay
    #[must_use]
    pub const fn with_error_display_ms(mut self, ms: u64) -> Self {
        self.error_display_ms = ms;
        self
    }

    /// Set the storage key prefix
    #[must_use]
    pub fn with_storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }

    /// Parses a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.factorial_limit, 100);
        assert_eq!(config.error_display_ms, 1500);
        assert_eq!(config.storage_prefix, "calculadora");
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_history_limit(3)
            .with_factorial_limit(20)
            .with_error_display_ms(0)
            .with_storage_prefix("test");
        assert_eq!(config.history_limit, 3);
        assert_eq!(config.factorial_limit, 20);
        assert_eq!(config.error_display_ms, 0);
        assert_eq!(config.storage_prefix, "test");
    }

    #[test]
    fn test_from_partial_json() {
        let config = EngineConfig::from_json(r#"{"history_limit": 5}"#).unwrap();
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.factorial_limit, 100);
    }

    #[test]
    fn test_from_invalid_json() {
        assert!(EngineConfig::from_json(r#"{"history_limit": "many"}"#).is_err());
    }
}
