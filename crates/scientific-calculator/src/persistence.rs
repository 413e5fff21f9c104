//! Saving and restoring the durable part of a session
//!
//! Only the memory register, the history and the angle mode survive a
//! reload. Each lives under its own key so a corrupt value costs only that
//! piece of state.

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::core::history::History;
use crate::core::{AngleMode, CalculatorEngine};
use crate::host::{KeyValueStore, StorageError};

/// Key layout and (de)serialization for persisted state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persistence {
    prefix: String,
}

impl Persistence {
    /// Creates a persistence layer writing keys under `prefix`
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Uses the configured storage prefix
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.storage_prefix.clone())
    }

    /// Key of the memory register
    #[must_use]
    pub fn memory_key(&self) -> String {
        format!("{}.memory", self.prefix)
    }

    /// Key of the history list
    #[must_use]
    pub fn history_key(&self) -> String {
        format!("{}.history", self.prefix)
    }

    /// Key of the angle mode
    #[must_use]
    pub fn angle_mode_key(&self) -> String {
        format!("{}.angleMode", self.prefix)
    }

    /// Writes memory, history and angle mode, stopping at the first failure
    pub fn try_save<S>(&self, store: &mut S, engine: &CalculatorEngine) -> Result<(), StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        store.set(&self.memory_key(), &engine.memory().to_string())?;
        store.set(&self.history_key(), &engine.history().to_json()?)?;
        store.set(&self.angle_mode_key(), engine.angle_mode().as_str())?;
        Ok(())
    }

    /// Fire-and-forget save; failures are logged and dropped
    pub fn save<S>(&self, store: &mut S, engine: &CalculatorEngine)
    where
        S: KeyValueStore + ?Sized,
    {
        if let Err(error) = self.try_save(store, engine) {
            warn!(%error, prefix = %self.prefix, "failed to persist calculator state");
        }
    }

    /// Restores whatever can be read; unreadable keys keep the engine's value
    pub fn load<S>(&self, store: &S, engine: &mut CalculatorEngine)
    where
        S: KeyValueStore + ?Sized,
    {
        let history_limit = engine.config().history_limit;
        let state = engine.state_mut();

        if let Some(memory) = self.read(store, &self.memory_key(), |raw| {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("not a finite number: {raw}"))
        }) {
            state.memory = memory;
        }

        if let Some(history) = self.read(store, &self.history_key(), |raw| {
            History::from_json(raw, history_limit).map_err(|e| e.to_string())
        }) {
            state.history = history;
        }

        if let Some(mode) = self.read(store, &self.angle_mode_key(), |raw| {
            raw.parse::<AngleMode>().map_err(|e| e.to_string())
        }) {
            state.angle_mode = mode;
        }
    }

    /// Deletes every persisted key
    pub fn clear<S>(&self, store: &mut S)
    where
        S: KeyValueStore + ?Sized,
    {
        for key in [self.memory_key(), self.history_key(), self.angle_mode_key()] {
            if let Err(error) = store.remove(&key) {
                warn!(%error, %key, "failed to remove persisted key");
            }
        }
    }

    fn read<S, T, F>(&self, store: &S, key: &str, parse: F) -> Option<T>
    where
        S: KeyValueStore + ?Sized,
        F: FnOnce(&str) -> Result<T, String>,
    {
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(%key, "nothing persisted");
                return None;
            }
            Err(error) => {
                warn!(%error, %key, "failed to read persisted state");
                return None;
            }
        };
        match parse(&raw) {
            Ok(value) => Some(value),
            Err(reason) => {
                warn!(%key, %reason, "ignoring corrupt persisted state");
                None
            }
        }
    }
}

impl Default for Persistence {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
