//! WASM Driver - Unified Testing Interface
//!
//! Runs the browser wiring (keypad clicks, keyboard, display slots, history
//! list, `localStorage`, exponent prompt, error timeout) against the mock DOM
//! and an in-memory store, with a simulated clock.
//!
//! Runs the shared driver checks through simulated clicks and key presses.

use tracing::debug;

use super::dom::{DomEvent, MockDom};
use crate::config::EngineConfig;
use crate::core::{CalcError, CalculatorEngine};
use crate::driver::{CalculatorDriver, HistoryItem};
use crate::host::{DisplaySlot, InMemoryStore, ScriptedPrompt};
use crate::keypad::{key_to_action, Keypad, KeypadAction};
use crate::session::Session;

/// WASM Driver wrapping a session over the mock DOM
#[derive(Debug)]
pub struct WasmDriver {
    session: Session<InMemoryStore, MockDom>,
    keypad: Keypad,
    prompt: ScriptedPrompt,
    clock_ms: u64,
    error_since: Option<u64>,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver {
    /// Creates a new WASM driver
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(EngineConfig::default(), InMemoryStore::new())
    }

    /// Creates a WASM driver with custom configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_store(config, InMemoryStore::new())
    }

    /// Opens a page over an existing store, as a browser reload would
    #[must_use]
    pub fn with_store(config: EngineConfig, store: InMemoryStore) -> Self {
        let keypad = Keypad::new();
        let dom = MockDom::calculator(&keypad);
        Self {
            session: Session::open(config, store, dom),
            keypad,
            prompt: ScriptedPrompt::new(),
            clock_ms: 0,
            error_since: None,
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        self.session.engine()
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        self.session.display()
    }

    /// Returns the backing store
    #[must_use]
    pub fn store(&self) -> &InMemoryStore {
        self.session.store()
    }

    /// Closes the page, keeping only the store
    #[must_use]
    pub fn into_store(self) -> InMemoryStore {
        let (_, store, _) = self.session.into_parts();
        store
    }

    /// Simulates clicking an element; returns false if nothing handles it
    pub fn click(&mut self, element_id: &str) -> bool {
        self.session
            .display_mut()
            .dispatch_event(DomEvent::click(element_id));
        match self.keypad.handle_click(element_id) {
            Some(action) => {
                self.run(action);
                true
            }
            None => false,
        }
    }

    /// Simulates a keyboard key; returns false for unmapped keys
    pub fn press_key(&mut self, key: &str) -> bool {
        self.session
            .display_mut()
            .dispatch_event(DomEvent::key_press(key));
        match key_to_action(key) {
            Some(action) => {
                self.run(action);
                true
            }
            None => false,
        }
    }

    /// Moves the simulated clock; recovers from an error once it has been
    /// shown for the configured delay
    pub fn advance_clock(&mut self, ms: u64) {
        self.clock_ms = self.clock_ms.saturating_add(ms);
        let delay = self.session.engine().config().error_display_ms;
        if let Some(since) = self.error_since {
            if self.clock_ms.saturating_sub(since) >= delay {
                debug!(clock_ms = self.clock_ms, "error display timed out");
                self.session.recover();
                self.error_since = None;
            }
        }
    }

    fn run(&mut self, action: KeypadAction) {
        self.session.press(action, &mut self.prompt);
        self.error_since = if self.session.engine().has_error() {
            self.error_since.or(Some(self.clock_ms))
        } else {
            None
        };
    }

    fn slot_text(&self, slot: DisplaySlot) -> String {
        self.dom()
            .get_element_text(slot.element_id())
            .unwrap_or_default()
            .to_string()
    }

    /// Gets the main display element's text
    #[must_use]
    pub fn display_text(&self) -> String {
        self.slot_text(DisplaySlot::Main)
    }

    /// Gets the expression line's text
    #[must_use]
    pub fn expression_text(&self) -> String {
        self.slot_text(DisplaySlot::Expression)
    }

    /// Gets the error line's text
    #[must_use]
    pub fn error_text(&self) -> String {
        self.slot_text(DisplaySlot::Error)
    }

    /// Gets the memory indicator's text
    #[must_use]
    pub fn memory_text(&self) -> String {
        self.slot_text(DisplaySlot::Memory)
    }

    /// Gets the angle mode indicator's text
    #[must_use]
    pub fn angle_mode_text(&self) -> String {
        self.slot_text(DisplaySlot::AngleMode)
    }

    /// Gets history list items
    #[must_use]
    pub fn history_list_items(&self) -> Vec<String> {
        let mut items = Vec::new();
        let mut i = 0;
        while let Some(elem) = self.dom().get_element(&format!("history-{i}")) {
            items.push(elem.text_content.clone());
            i += 1;
        }
        items
    }
}

impl CalculatorDriver for WasmDriver {
    fn press(&mut self, action: KeypadAction) {
        // actions without a button on the page are dispatched directly
        if !self.click(&action.element_id()) {
            self.run(action);
        }
    }

    fn answer_prompt(&mut self, answer: Option<&str>) {
        let prompt = std::mem::take(&mut self.prompt);
        self.prompt = match answer {
            Some(text) => prompt.answer(text),
            None => prompt.cancel(),
        };
    }

    fn display(&self) -> String {
        self.display_text()
    }

    fn expression(&self) -> String {
        self.expression_text()
    }

    fn error(&self) -> Option<CalcError> {
        self.engine().error().cloned()
    }

    fn get_history(&self) -> Vec<HistoryItem> {
        self.dom()
            .get_element(super::dom::HISTORY_LIST_ID)
            .map(|list| {
                list.children
                    .iter()
                    .filter_map(|item| {
                        let result = item.get_attr("data-result")?;
                        let expression = item
                            .text_content
                            .strip_suffix(result)?
                            .strip_suffix(" = ")?;
                        Some(HistoryItem {
                            expression: expression.to_string(),
                            result: result.to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
