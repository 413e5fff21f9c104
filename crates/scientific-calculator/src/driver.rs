//! Unified Calculator Driver
//!
//! Write the behavioural checks once and run them against every front end:
//! the bare engine and the mock-DOM browser driver both implement
//! [`CalculatorDriver`].
//!
//! The same checks run against the engine and the mock-DOM browser driver.

use crate::core::{CalcError, CalcResult, CalculatorEngine};
use crate::host::ScriptedPrompt;
use crate::keypad::{token_to_actions, KeypadAction};

/// Abstract driver trait for calculator interactions
///
/// # Example
///
/// ```rust
/// use scientific_calculator::driver::{CalculatorDriver, EngineDriver};
///
/// let mut driver = EngineDriver::new();
/// driver.enter_sequence("6 x 7 =").unwrap();
/// assert_eq!(driver.display(), "42");
/// ```
pub trait CalculatorDriver {
    /// Performs one keypad action
    fn press(&mut self, action: KeypadAction);

    /// Queues the answer for the next exponent prompt (`None` cancels)
    fn answer_prompt(&mut self, answer: Option<&str>);

    /// Main display text
    fn display(&self) -> String;

    /// Pending expression line
    fn expression(&self) -> String;

    /// Error currently shown, if any
    fn error(&self) -> Option<CalcError>;

    /// Gets history entries (newest first)
    fn get_history(&self) -> Vec<HistoryItem>;

    /// Clears the calculator (C)
    fn clear(&mut self) {
        self.press(KeypadAction::ClearAll);
    }

    /// Presses every action of a whitespace-separated token sequence
    ///
    /// Fails on an unknown token, or with the displayed error if the
    /// sequence ends in one.
    fn enter_sequence(&mut self, tokens: &str) -> CalcResult<()> {
        for token in tokens.split_whitespace() {
            let actions =
                token_to_actions(token).ok_or_else(|| CalcError::InvalidInput(token.to_string()))?;
            for action in actions {
                self.press(action);
            }
        }
        self.error().map_or(Ok(()), Err)
    }
}

/// A simplified history item for driver results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// The expression that was evaluated
    pub expression: String,
    /// The formatted result
    pub result: String,
}

/// Driver talking to the engine directly
#[derive(Debug, Default)]
pub struct EngineDriver {
    engine: CalculatorEngine,
    prompt: ScriptedPrompt,
}

impl EngineDriver {
    /// Creates a driver over a fresh engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver over an existing engine
    #[must_use]
    pub fn with_engine(engine: CalculatorEngine) -> Self {
        Self {
            engine,
            prompt: ScriptedPrompt::new(),
        }
    }

    /// Returns a reference to the underlying engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, action: KeypadAction) {
        self.engine.apply(action, &mut self.prompt);
    }

    fn answer_prompt(&mut self, answer: Option<&str>) {
        let prompt = std::mem::take(&mut self.prompt);
        self.prompt = match answer {
            Some(text) => prompt.answer(text),
            None => prompt.cancel(),
        };
    }

    fn display(&self) -> String {
        self.engine.current_input().to_string()
    }

    fn expression(&self) -> String {
        self.engine.view().expression
    }

    fn error(&self) -> Option<CalcError> {
        self.engine.error().cloned()
    }

    fn get_history(&self) -> Vec<HistoryItem> {
        self.engine
            .history()
            .iter()
            .map(|entry| HistoryItem {
                expression: entry.expression.clone(),
                result: entry.result.clone(),
            })
            .collect()
    }
}

// ===== Shared Behaviour Checks =====
// These checks work with ANY CalculatorDriver implementation

/// Verifies the four basic operations
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    driver.enter_sequence("2 + 3 =").unwrap();
    assert_eq!(driver.display(), "5");
    driver.clear();

    driver.enter_sequence("10 - 4 =").unwrap();
    assert_eq!(driver.display(), "6");
    driver.clear();

    driver.enter_sequence("6 x 7 =").unwrap();
    assert_eq!(driver.display(), "42");
    driver.clear();

    driver.enter_sequence("20 / 4 =").unwrap();
    assert_eq!(driver.display(), "5");
    driver.clear();
}

/// Verifies strict left-to-right chaining
pub fn verify_left_to_right<D: CalculatorDriver>(driver: &mut D) {
    driver.enter_sequence("3 + 4 x").unwrap();
    assert_eq!(driver.display(), "7");
    assert_eq!(driver.expression(), "7 ×");
    driver.enter_sequence("2 =").unwrap();
    assert_eq!(driver.display(), "14");
    driver.clear();

    driver.enter_sequence("2 x 3 ^ 2 =").unwrap();
    assert_eq!(driver.display(), "36");
    driver.clear();
}

/// Verifies unary functions and angle modes
pub fn verify_scientific_functions<D: CalculatorDriver>(driver: &mut D) {
    driver.enter_sequence("deg 30 sin").unwrap();
    assert_eq!(driver.display(), "0.4999999999");

    driver.enter_sequence("60 cos").unwrap();
    assert_eq!(driver.display(), "0.5");

    driver.enter_sequence("rad pi cos").unwrap();
    assert_eq!(driver.display(), "-1");

    driver.enter_sequence("grad 200 cos deg").unwrap();
    assert_eq!(driver.display(), "-1");

    driver.enter_sequence("1000 log").unwrap();
    assert_eq!(driver.display(), "3");

    driver.enter_sequence("5 !").unwrap();
    assert_eq!(driver.display(), "120");

    driver.enter_sequence("16 sqrt").unwrap();
    assert_eq!(driver.display(), "4");

    driver.enter_sequence("4 inv").unwrap();
    assert_eq!(driver.display(), "0.25");

    driver.answer_prompt(Some("10"));
    driver.enter_sequence("2 pow").unwrap();
    assert_eq!(driver.display(), "1024");
    driver.clear();
}

/// Verifies the error path and implicit recovery
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) {
    let result = driver.enter_sequence("5 / 0 =");
    assert!(matches!(result, Err(CalcError::DivisionByZero)));
    assert_eq!(driver.display(), "Error");

    driver.enter_sequence("7").unwrap();
    assert_eq!(driver.display(), "7");

    let result = driver.enter_sequence("neg sqrt");
    assert!(matches!(result, Err(CalcError::DomainError { .. })));

    let result = driver.enter_sequence("2.5 !");
    assert!(matches!(result, Err(CalcError::DomainError { .. })));

    let result = driver.enter_sequence("0 log");
    assert!(matches!(result, Err(CalcError::DomainError { .. })));

    let result = driver.enter_sequence("wat");
    assert!(matches!(result, Err(CalcError::InvalidInput(_))));
    driver.clear();
}

/// Verifies the memory register
pub fn verify_memory<D: CalculatorDriver>(driver: &mut D) {
    driver.enter_sequence("42 ms c mc mr").unwrap();
    assert_eq!(driver.display(), "0");

    driver.enter_sequence("10 m+ 3 m- mr").unwrap();
    assert_eq!(driver.display(), "7");
    driver.enter_sequence("mc").unwrap();
    driver.clear();
}

/// Verifies history tracking
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();

    driver.enter_sequence("1 + 1 =").unwrap();
    driver.enter_sequence("2 + 2 =").unwrap();
    driver.enter_sequence("3 + 3 =").unwrap();

    let history = driver.get_history();
    assert!(history.len() >= 3);
    assert!(history.len() <= 10);

    // Most recent should be first
    assert_eq!(history[0].expression, "3 + 3");
    assert_eq!(history[0].result, "6");

    driver.enter_sequence("h1").unwrap();
    assert_eq!(driver.display(), "4");
    driver.clear();
}

/// Verifies result formatting
pub fn verify_formatting<D: CalculatorDriver>(driver: &mut D) {
    driver.enter_sequence("1 / 3 =").unwrap();
    assert_eq!(driver.display(), "0.3333333333");

    driver.enter_sequence("0.1 + 0.2 =").unwrap();
    assert_eq!(driver.display(), "0.3");

    driver.enter_sequence("100000 x 100000 x 10 =").unwrap();
    assert_eq!(driver.display(), "1e+11");
    driver.clear();
}

/// Complete verification suite - runs every check
pub fn run_full_suite<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_left_to_right(driver);
    verify_scientific_functions(driver);
    verify_error_handling(driver);
    verify_memory(driver);
    verify_history(driver);
    verify_formatting(driver);
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== EngineDriver =====

    #[test]
    fn test_engine_driver_new() {
        let driver = EngineDriver::new();
        assert_eq!(driver.display(), "0");
        assert!(driver.expression().is_empty());
        assert!(driver.get_history().is_empty());
    }

    #[test]
    fn test_engine_driver_with_engine() {
        let mut engine = CalculatorEngine::new();
        engine.input_digit('9');
        let driver = EngineDriver::with_engine(engine);
        assert_eq!(driver.display(), "9");
        assert_eq!(driver.engine().current_input(), "9");
    }

    #[test]
    fn test_enter_sequence_unknown_token() {
        let mut driver = EngineDriver::new();
        let result = driver.enter_sequence("1 foo");
        assert_eq!(result, Err(CalcError::InvalidInput("foo".into())));
        assert_eq!(driver.display(), "1");
    }

    #[test]
    fn test_cancelled_prompt() {
        let mut driver = EngineDriver::new();
        driver.answer_prompt(None);
        driver.enter_sequence("3 pow").unwrap();
        assert_eq!(driver.display(), "3");
    }

    // ===== Shared Behaviour Tests =====

    #[test]
    fn test_unified_basic_arithmetic() {
        verify_basic_arithmetic(&mut EngineDriver::new());
    }

    #[test]
    fn test_unified_left_to_right() {
        verify_left_to_right(&mut EngineDriver::new());
    }

    #[test]
    fn test_unified_scientific_functions() {
        verify_scientific_functions(&mut EngineDriver::new());
    }

    #[test]
    fn test_unified_error_handling() {
        verify_error_handling(&mut EngineDriver::new());
    }

    #[test]
    fn test_unified_memory() {
        verify_memory(&mut EngineDriver::new());
    }

    #[test]
    fn test_unified_history() {
        verify_history(&mut EngineDriver::new());
    }

    #[test]
    fn test_unified_formatting() {
        verify_formatting(&mut EngineDriver::new());
    }

    #[test]
    fn test_full_suite() {
        run_full_suite(&mut EngineDriver::new());
    }

    #[test]
    fn test_history_item_clone() {
        let item = HistoryItem {
            expression: "2 + 2".into(),
            result: "4".into(),
        };
        assert_eq!(item.clone(), item);
    }
}
