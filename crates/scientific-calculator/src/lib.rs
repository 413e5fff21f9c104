//! Scientific Calculator - keystroke-driven engine with browser and CLI hosts
//!
//! The engine evaluates strictly left to right (`3 + 4 × 2 = 14`), formats
//! every result through one contract, keeps a bounded history and a memory
//! register, and never panics: errors are shown on the display and cleared
//! by the next input.
//!
//! # Design Notes
//!
//! - **Typed input**: every key, click and CLI token becomes a [`keypad::KeypadAction`]
//! - **One suite, many hosts**: the [`driver`] checks run against every driver
//! - **Observable display**: history and display slots are readable in the mock DOM
//!
//! # Example
//!
//! ```rust
//! use scientific_calculator::prelude::*;
//!
//! let mut engine = CalculatorEngine::new();
//! engine.input_digit('3');
//! engine.set_operator(Operator::Add);
//! engine.input_digit('4');
//! engine.set_operator(Operator::Multiply);
//! engine.input_digit('2');
//! engine.equals();
//! assert_eq!(engine.current_input(), "14");
//!
//! engine.apply_reciprocal();
//! assert_eq!(engine.current_input(), "0.0714285714");
//!
//! engine.clear_all();
//! engine.input_digit('0');
//! engine.apply_reciprocal();
//! assert_eq!(engine.current_input(), "Error");
//! assert_eq!(engine.view().error.as_deref(), Some("No se puede dividir entre cero"));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod host;
pub mod keypad;
pub mod persistence;
pub mod session;

/// WASM module - always available for testing
/// (Mock DOM allows testing without actual browser bindings)
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{
        format_result, parse_operand, AngleMode, CalcError, CalcResult, CalculatorEngine,
        Constant, DisplayView, LogBase, Operator, Phase, TrigFunction, ERROR_SENTINEL,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver, HistoryItem};
    pub use crate::host::{
        DisplaySlot, DisplaySurface, ExponentPrompt, InMemoryStore, KeyValueStore,
        ScriptedPrompt, StorageError,
    };
    pub use crate::keypad::{key_to_action, token_to_actions, Keypad, KeypadAction};
    pub use crate::persistence::Persistence;
    pub use crate::session::Session;
    pub use crate::wasm::{DomElement, DomEvent, MockDom, WasmDriver};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut engine = CalculatorEngine::new();
        engine.input_constant(Constant::Pi);
        assert_eq!(engine.current_input(), "3.1415926535");
    }

    #[test]
    fn test_session_over_mock_dom() {
        let keypad = Keypad::new();
        let mut session = Session::open(
            EngineConfig::default(),
            InMemoryStore::new(),
            MockDom::calculator(&keypad),
        );
        let mut prompt = ScriptedPrompt::new();
        for token in ["12", "sq"] {
            for action in token_to_actions(token).unwrap() {
                session.press(action, &mut prompt);
            }
        }
        assert_eq!(
            session.display().get_element_text("calc-display"),
            Some("144")
        );
    }

    #[test]
    fn test_drivers_agree() {
        let mut engine = EngineDriver::new();
        let mut wasm = WasmDriver::new();
        for driver in [&mut engine as &mut dyn CalculatorDriver, &mut wasm] {
            driver.enter_sequence("7 ! / 3 =").unwrap();
        }
        assert_eq!(engine.display(), "1680");
        assert_eq!(engine.display(), wasm.display());
        assert_eq!(engine.get_history(), wasm.get_history());
    }

    #[test]
    fn test_error_messages() {
        let mut engine = CalculatorEngine::new();
        engine.input_digit('9');
        engine.toggle_sign();
        engine.apply_log(LogBase::Ten);
        assert_eq!(
            engine.view().error.as_deref(),
            Some("Entrada fuera del dominio de log")
        );
        assert_eq!(engine.current_input(), ERROR_SENTINEL);
    }
}
