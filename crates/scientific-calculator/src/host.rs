//! Host capabilities injected into a calculator session
//!
//! The engine never talks to a browser, terminal or file directly. A host
//! provides a key-value store for persistence, a display surface that receives
//! text after every action, and a prompt used by the power key.

use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use crate::core::history::History;

/// Errors raised by a [`KeyValueStore`]
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backing storage cannot be reached
    #[error("Storage unavailable: {message}")]
    Unavailable {
        /// Error message
        message: String,
    },

    /// Write rejected because the store is full
    #[error("Storage quota exceeded while writing {key}")]
    QuotaExceeded {
        /// Key being written
        key: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    /// Create an unavailable error
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// String key-value persistence (browser `localStorage` semantics)
pub trait KeyValueStore {
    /// Reads a value
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes a value; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store, optionally rejecting writes to simulate a full quota
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    values: HashMap<String, String>,
    reject_writes: bool,
}

impl InMemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose writes always fail
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            values: HashMap::new(),
            reject_writes: true,
        }
    }

    /// Pre-populates a key
    #[must_use]
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.reject_writes {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
            });
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Named text areas of the calculator display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplaySlot {
    /// Main number display
    Main,
    /// Pending expression line above the main display
    Expression,
    /// Error message line
    Error,
    /// Memory register indicator
    Memory,
    /// Angle mode indicator
    AngleMode,
}

impl DisplaySlot {
    /// All slots in render order
    pub const ALL: [Self; 5] = [
        Self::Main,
        Self::Expression,
        Self::Error,
        Self::Memory,
        Self::AngleMode,
    ];

    /// DOM element id bound to this slot
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Main => "calc-display",
            Self::Expression => "calc-expression",
            Self::Error => "calc-error",
            Self::Memory => "calc-memory",
            Self::AngleMode => "calc-angle-mode",
        }
    }
}

/// Receives display updates after every state change
pub trait DisplaySurface {
    /// Replaces the text of one slot
    fn set_text(&mut self, slot: DisplaySlot, text: &str);

    /// Replaces the rendered history list (newest first)
    fn set_history(&mut self, history: &History);
}

/// Asks the user for the exponent of the power key
///
/// `None` means the user cancelled.
pub trait ExponentPrompt {
    /// Requests an exponent for the given base
    fn request_exponent(&mut self, base: &str) -> Option<String>;
}

impl<F> ExponentPrompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn request_exponent(&mut self, base: &str) -> Option<String> {
        self(base)
    }
}

/// Prompt answering from a queue of canned responses
///
/// An exhausted queue behaves like a cancelled dialog.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    responses: VecDeque<Option<String>>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    /// Creates a prompt that cancels every request
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an answer
    #[must_use]
    pub fn answer(mut self, text: &str) -> Self {
        self.responses.push_back(Some(text.to_string()));
        self
    }

    /// Queues a cancellation
    #[must_use]
    pub fn cancel(mut self) -> Self {
        self.responses.push_back(None);
        self
    }

    /// Bases the prompt was asked about, in order
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl ExponentPrompt for ScriptedPrompt {
    fn request_exponent(&mut self, base: &str) -> Option<String> {
        self.asked.push(base.to_string());
        self.responses.pop_front().flatten()
    }
}
