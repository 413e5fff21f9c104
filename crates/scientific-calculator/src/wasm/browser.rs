//! Browser WASM bindings for Calculator
//!
//! The same session the tests drive through the mock DOM, wired to real
//! `localStorage`, `window.prompt` and document elements.

use wasm_bindgen::prelude::*;
use web_sys::{console, Document, Storage, Window};

use crate::config::EngineConfig;
use crate::core::history::History;
use crate::host::{DisplaySlot, DisplaySurface, ExponentPrompt, KeyValueStore, StorageError};
use crate::keypad::{key_to_action, Keypad, KeypadAction};
use crate::session::Session;

use super::dom::HISTORY_LIST_ID;

/// `window.localStorage` as a [`KeyValueStore`]
#[derive(Debug)]
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    fn open(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                console::warn_1(&err);
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::unavailable("localStorage is disabled"))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StorageError::unavailable(format!("{err:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::QuotaExceeded {
                key: key.to_string(),
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| StorageError::unavailable(format!("{err:?}")))
    }
}

/// Document elements addressed by [`DisplaySlot::element_id`]
#[derive(Debug)]
pub struct DocumentDisplay {
    document: Document,
}

impl DisplaySurface for DocumentDisplay {
    fn set_text(&mut self, slot: DisplaySlot, text: &str) {
        if let Some(element) = self.document.get_element_by_id(slot.element_id()) {
            element.set_text_content(Some(text));
        }
    }

    fn set_history(&mut self, history: &History) {
        let Some(list) = self.document.get_element_by_id(HISTORY_LIST_ID) else {
            return;
        };
        list.set_inner_html("");
        for (i, entry) in history.iter().enumerate() {
            let Ok(item) = self.document.create_element("li") else {
                continue;
            };
            item.set_id(&format!("history-{i}"));
            item.set_class_name("history-item");
            item.set_text_content(Some(&entry.display()));
            if let Err(err) = list.append_child(&item) {
                console::warn_1(&err);
            }
        }
    }
}

/// `window.prompt` as the exponent dialog
#[derive(Debug)]
struct WindowPrompt {
    window: Window,
}

impl ExponentPrompt for WindowPrompt {
    fn request_exponent(&mut self, base: &str) -> Option<String> {
        self.window
            .prompt_with_message_and_default(&format!("Exponente para {base}:"), "2")
            .ok()
            .flatten()
    }
}

/// Browser Calculator - the main WASM entry point
///
/// The page forwards clicks and key presses here. After each call it checks
/// [`BrowserCalculator::has_error`] and, if set, schedules
/// [`BrowserCalculator::recover`] after `error_display_ms`.
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    session: Session<LocalStorage, DocumentDisplay>,
    keypad: Keypad,
    prompt: WindowPrompt,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Opens the calculator over the current document
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<BrowserCalculator, JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let store = LocalStorage::open(&window);
        let display = DocumentDisplay { document };
        Ok(Self {
            session: Session::open(EngineConfig::default(), store, display),
            keypad: Keypad::new(),
            prompt: WindowPrompt { window },
        })
    }

    /// Handle a keypad button or history item click by element ID
    pub fn handle_button(&mut self, element_id: &str) -> bool {
        let Some(action) = self.keypad.handle_click(element_id) else {
            return false;
        };
        self.dispatch(action);
        true
    }

    /// Handle a keyboard key press
    pub fn handle_key(&mut self, key: &str) -> bool {
        let Some(action) = key_to_action(key) else {
            return false;
        };
        self.dispatch(action);
        true
    }

    /// Clears a displayed error
    pub fn recover(&mut self) {
        self.session.recover();
    }

    /// Whether an error is showing
    #[wasm_bindgen(getter)]
    pub fn has_error(&self) -> bool {
        self.session.engine().has_error()
    }

    /// Delay before the page should call `recover`
    #[wasm_bindgen(getter)]
    pub fn error_display_ms(&self) -> u32 {
        u32::try_from(self.session.engine().config().error_display_ms).unwrap_or(u32::MAX)
    }

    /// Main display text
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.session.engine().current_input().to_string()
    }

    /// Get history as JSON
    pub fn history_json(&self) -> String {
        self.session
            .engine()
            .history()
            .to_json()
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Full display snapshot as JSON
    pub fn view_json(&self) -> String {
        serde_json::to_string(&self.session.engine().view()).unwrap_or_else(|_| "{}".to_string())
    }
}

impl BrowserCalculator {
    fn dispatch(&mut self, action: KeypadAction) {
        self.session.press(action, &mut self.prompt);
    }
}

/// Initialize the calculator in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"Calculadora científica WASM inicializada".into());
}
