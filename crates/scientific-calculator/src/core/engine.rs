//! Keystroke-driven calculator engine
//!
//! Failures never escape a method: they land on the error display.
//!
//! The engine evaluates strictly left to right: choosing a second operator
//! resolves the pending one first, so `3 + 4 × 2` is `14`.
//!
//! ```text
//! AwaitingFirstOperand --operator--> OperatorPending --digit--> AwaitingSecondOperand
//!          ^                              ^                         |      |
//!          |                              +-------operator----------+      |
//!          +---------------digit------------- Result <------equals---------+
//! ```
//!
//! No public method returns an error. Failures put the error sentinel on the
//! display, expose a message through [`CalculatorEngine::error`], and are
//! cleared by [`CalculatorEngine::recover`] or by the next input.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::core::format::{format_result, parse_operand, ERROR_SENTINEL};
use crate::core::history::History;
use crate::core::{
    unary, AngleMode, CalcError, CalcResult, Constant, LogBase, Operator, TrigFunction,
};
use crate::host::ExponentPrompt;

/// An operator waiting for its right operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperation {
    /// Chosen operator
    pub operator: Operator,
    /// Left operand as displayed when the operator was chosen
    pub left: String,
    /// Whether a right operand has been entered since
    pub right_entered: bool,
}

/// Position in the input cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Building the first operand
    AwaitingFirstOperand,
    /// Operator chosen, nothing typed yet
    OperatorPending,
    /// Building the second operand
    AwaitingSecondOperand,
    /// Showing a computed result
    Result,
}

/// Session state of the calculator
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    pub(crate) current_input: String,
    pub(crate) pending: Option<PendingOperation>,
    pub(crate) reset_on_next_input: bool,
    pub(crate) showing_result: bool,
    pub(crate) angle_mode: AngleMode,
    pub(crate) memory: f64,
    pub(crate) history: History,
    pub(crate) error: Option<CalcError>,
}

impl CalculatorState {
    /// Fresh state: display `0`, empty memory and history
    #[must_use]
    pub fn new(history_limit: usize) -> Self {
        Self {
            current_input: "0".to_string(),
            pending: None,
            reset_on_next_input: true,
            showing_result: false,
            angle_mode: AngleMode::default(),
            memory: 0.0,
            history: History::with_capacity(history_limit),
            error: None,
        }
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(History::DEFAULT_MAX_ENTRIES)
    }
}

/// Snapshot of everything a display shows
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DisplayView {
    /// Main number display
    pub main: String,
    /// Pending expression, e.g. `12 ×`
    pub expression: String,
    /// Error message, if an error is showing
    pub error: Option<String>,
    /// `M` when the memory register is non-zero
    pub memory: String,
    /// Angle mode label
    pub angle_mode: String,
}

/// The calculator engine
#[derive(Debug, Clone)]
pub struct CalculatorEngine {
    state: CalculatorState,
    config: EngineConfig,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine {
    /// Creates an engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with a custom configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            state: CalculatorState::new(config.history_limit),
            config,
        }
    }

    /// Resumes an engine from caller-owned state
    #[must_use]
    pub fn from_state(state: CalculatorState, config: EngineConfig) -> Self {
        Self { state, config }
    }

    /// Hands the state back to the caller
    #[must_use]
    pub fn into_state(self) -> CalculatorState {
        self.state
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut CalculatorState {
        &mut self.state
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ===== Accessors =====

    /// Text of the operand being edited
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.state.current_input
    }

    /// Left operand of the pending operation
    #[must_use]
    pub fn previous_input(&self) -> Option<&str> {
        self.state.pending.as_ref().map(|p| p.left.as_str())
    }

    /// Operator awaiting its right operand
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operator> {
        self.state.pending.as_ref().map(|p| p.operator)
    }

    /// Whether the next digit starts a fresh operand
    #[must_use]
    pub fn reset_on_next_input(&self) -> bool {
        self.state.reset_on_next_input
    }

    /// Active angle mode
    #[must_use]
    pub fn angle_mode(&self) -> AngleMode {
        self.state.angle_mode
    }

    /// Memory register value
    #[must_use]
    pub fn memory(&self) -> f64 {
        self.state.memory
    }

    /// Calculation history, newest first
    #[must_use]
    pub fn history(&self) -> &History {
        &self.state.history
    }

    /// Error currently shown, if any
    #[must_use]
    pub fn error(&self) -> Option<&CalcError> {
        self.state.error.as_ref()
    }

    /// Returns true while an error is shown
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.state.error.is_some()
    }

    /// Current position in the input cycle
    #[must_use]
    pub fn phase(&self) -> Phase {
        match &self.state.pending {
            Some(p) if p.right_entered => Phase::AwaitingSecondOperand,
            Some(_) => Phase::OperatorPending,
            None if self.state.showing_result => Phase::Result,
            None => Phase::AwaitingFirstOperand,
        }
    }

    /// Snapshot for display surfaces
    #[must_use]
    pub fn view(&self) -> DisplayView {
        DisplayView {
            main: self.state.current_input.clone(),
            expression: self
                .state
                .pending
                .as_ref()
                .map(|p| format!("{} {}", p.left, p.operator.symbol()))
                .unwrap_or_default(),
            error: self.state.error.as_ref().map(ToString::to_string),
            memory: if self.state.memory == 0.0 {
                String::new()
            } else {
                "M".to_string()
            },
            angle_mode: self.state.angle_mode.label().to_string(),
        }
    }

    // ===== Operand entry =====

    /// Types a digit or decimal point
    ///
    /// A second decimal point in the same operand is ignored, and a lone
    /// leading zero is replaced by the first non-decimal digit. A digit that
    /// would push the operand past the finite range is ignored too.
    pub fn input_digit(&mut self, token: char) {
        if !(token.is_ascii_digit() || token == '.') {
            debug!(?token, "ignoring non-digit token");
            return;
        }
        self.begin_action();

        let state = &mut self.state;
        if state.reset_on_next_input {
            state.current_input = if token == '.' {
                "0.".to_string()
            } else {
                token.to_string()
            };
            state.reset_on_next_input = false;
        } else if token == '.' {
            if state.current_input.contains(['.', 'e']) {
                return;
            }
            state.current_input.push('.');
        } else if state.current_input == "0" {
            state.current_input = token.to_string();
        } else if state.current_input == "-0" {
            state.current_input = format!("-{token}");
        } else {
            let candidate = format!("{}{token}", state.current_input);
            if !parse_operand(&candidate).is_some_and(f64::is_finite) {
                debug!(len = candidate.len(), "operand would overflow, digit ignored");
                return;
            }
            state.current_input = candidate;
        }
        self.mark_operand_entered();
    }

    /// Replaces the operand with a constant
    pub fn input_constant(&mut self, constant: Constant) {
        self.begin_action();
        self.load_value(constant.value());
    }

    /// Flips the sign of the operand being edited
    pub fn toggle_sign(&mut self) {
        self.begin_action();
        let current = &mut self.state.current_input;
        if let Some(stripped) = current.strip_prefix('-') {
            *current = stripped.to_string();
        } else if parse_operand(current).is_some_and(|v| v != 0.0) {
            current.insert(0, '-');
        }
    }

    // ===== Binary operations =====

    /// Chooses an operator, resolving a chained pending operation first
    pub fn set_operator(&mut self, operator: Operator) {
        self.begin_action();

        if self.state.pending.as_ref().is_some_and(|p| p.right_entered) {
            if let Err(error) = self.try_equals() {
                self.fail(error);
                return;
            }
        }

        let left = match self.operand() {
            Ok(value) => format_result(value),
            Err(error) => {
                self.fail(error);
                return;
            }
        };
        debug!(%operator, %left, "operator pending");
        self.state.pending = Some(PendingOperation {
            operator,
            left,
            right_entered: false,
        });
        self.state.reset_on_next_input = true;
        self.state.showing_result = false;
    }

    /// Resolves the pending operation
    ///
    /// Does nothing without a pending operator or before a right operand
    /// has been entered.
    pub fn equals(&mut self) {
        if let Err(error) = self.try_equals() {
            self.fail(error);
        }
    }

    fn try_equals(&mut self) -> CalcResult<()> {
        let Some(pending) = self.state.pending.clone() else {
            return Ok(());
        };
        if !pending.right_entered {
            return Ok(());
        }

        let left = parse_operand(&pending.left)
            .ok_or_else(|| CalcError::InvalidInput(pending.left.clone()))?;
        let right = self.operand()?;
        let value = pending.operator.apply(left, right)?;

        let expression = format!(
            "{} {} {}",
            pending.left,
            pending.operator.symbol(),
            self.state.current_input
        );
        let result = format_result(value);
        debug!(%expression, %result, "resolved");

        self.state.history.record(expression, result.clone());
        self.state.current_input = result;
        self.state.pending = None;
        self.state.reset_on_next_input = true;
        self.state.showing_result = true;
        Ok(())
    }

    /// Raises the operand to an exponent supplied by the prompt
    ///
    /// A cancelled prompt leaves the state untouched.
    pub fn apply_power_with<P>(&mut self, prompt: &mut P)
    where
        P: ExponentPrompt + ?Sized,
    {
        self.begin_action();
        let base_text = self.state.current_input.clone();
        let Some(answer) = prompt.request_exponent(&base_text) else {
            debug!("power prompt cancelled");
            return;
        };
        let answer = answer.trim().to_string();

        let outcome = self.operand().and_then(|base| {
            let exponent = parse_operand(&answer)
                .filter(|v| v.is_finite())
                .ok_or_else(|| CalcError::InvalidInput(answer.clone()))?;
            Operator::Power.apply(base, exponent)
        });
        match outcome {
            Ok(value) => self.record_unary(format!("{base_text} ^ {answer}"), value),
            Err(error) => self.fail(error),
        }
    }

    // ===== Unary functions =====

    /// Applies sin/cos/tan, interpreting the operand in the active angle mode
    pub fn apply_trig(&mut self, function: TrigFunction) {
        let mode = self.state.angle_mode;
        let expression = format!(
            "{}({}{})",
            function.name(),
            self.state.current_input,
            mode.suffix()
        );
        self.apply_unary(expression, |x| unary::trig(function, x, mode));
    }

    /// Base-10 or natural logarithm
    pub fn apply_log(&mut self, base: LogBase) {
        let expression = format!("{}({})", base.name(), self.state.current_input);
        self.apply_unary(expression, |x| unary::log(x, base));
    }

    /// Square root
    pub fn apply_sqrt(&mut self) {
        let expression = format!("√({})", self.state.current_input);
        self.apply_unary(expression, unary::sqrt);
    }

    /// Square
    pub fn apply_square(&mut self) {
        let expression = format!("({})²", self.state.current_input);
        self.apply_unary(expression, unary::square);
    }

    /// Factorial of a non-negative integer up to the configured limit
    pub fn apply_factorial(&mut self) {
        let limit = self.config.factorial_limit;
        let expression = format!("{}!", self.state.current_input);
        self.apply_unary(expression, |x| unary::factorial(x, limit));
    }

    /// Reciprocal `1/x`
    pub fn apply_reciprocal(&mut self) {
        let expression = format!("1/({})", self.state.current_input);
        self.apply_unary(expression, unary::reciprocal);
    }

    fn apply_unary<F>(&mut self, expression: String, function: F)
    where
        F: FnOnce(f64) -> CalcResult<f64>,
    {
        if self.has_error() {
            self.recover();
        }
        match self.operand().and_then(function) {
            Ok(value) => self.record_unary(expression, value),
            Err(error) => self.fail(error),
        }
    }

    fn record_unary(&mut self, expression: String, value: f64) {
        let result = format_result(value);
        debug!(%expression, %result, "function applied");
        self.state.history.record(expression, result.clone());
        self.state.current_input = result;
        self.state.reset_on_next_input = true;
        self.mark_operand_entered();
        self.state.showing_result = self.state.pending.is_none();
    }

    // ===== Memory register =====

    /// Sets the register to zero
    pub fn memory_clear(&mut self) {
        self.state.memory = 0.0;
    }

    /// Loads the register into the operand
    pub fn memory_recall(&mut self) {
        self.begin_action();
        self.load_value(self.state.memory);
    }

    /// Adds the operand to the register
    pub fn memory_add(&mut self) {
        self.update_memory(|memory, value| memory + value);
    }

    /// Subtracts the operand from the register
    pub fn memory_subtract(&mut self) {
        self.update_memory(|memory, value| memory - value);
    }

    /// Stores the operand in the register
    pub fn memory_store(&mut self) {
        self.update_memory(|_, value| value);
    }

    /// The register keeps its old value when the update is not finite
    fn update_memory(&mut self, update: impl FnOnce(f64, f64) -> f64) {
        let Some(value) = self.displayed_value() else {
            return;
        };
        match unary::check_result(update(self.state.memory, value)) {
            Ok(memory) => {
                self.state.memory = memory;
                self.state.reset_on_next_input = true;
            }
            Err(error) => self.fail(error),
        }
    }

    // ===== Clearing =====

    /// Resets operand, pending operation and error; keeps memory and history
    pub fn clear_all(&mut self) {
        let state = &mut self.state;
        state.current_input = "0".to_string();
        state.pending = None;
        state.reset_on_next_input = true;
        state.showing_result = false;
        state.error = None;
    }

    /// Resets only the operand being edited
    pub fn clear_entry(&mut self) {
        self.state.current_input = "0".to_string();
        self.state.reset_on_next_input = true;
        self.state.error = None;
    }

    /// Deletes the last typed character
    pub fn backspace(&mut self) {
        if self.has_error() {
            self.recover();
            return;
        }
        let current = &mut self.state.current_input;
        current.pop();
        let trimmed_len = current.trim_end_matches(['e', '+', '-']).len();
        current.truncate(trimmed_len);
        if current.is_empty() {
            *current = "0".to_string();
        }
        self.state.reset_on_next_input = false;
    }

    /// Leaves the error state and returns to a clean first operand
    ///
    /// Hosts call this after their error display delay; the next input
    /// calls it implicitly.
    pub fn recover(&mut self) {
        if let Some(error) = self.state.error.take() {
            debug!(%error, "recovered from error");
            self.state.current_input = "0".to_string();
            self.state.pending = None;
            self.state.reset_on_next_input = true;
            self.state.showing_result = false;
        }
    }

    // ===== Modes and history =====

    /// Selects the angle unit for trigonometric functions
    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.state.angle_mode = mode;
    }

    /// Advances deg → rad → grad → deg
    pub fn cycle_angle_mode(&mut self) {
        self.state.angle_mode = self.state.angle_mode.next();
    }

    /// Loads the result of a history entry (0 = newest) into the operand
    pub fn recall_history(&mut self, index: usize) {
        let Some(entry) = self.state.history.get(index) else {
            debug!(index, "no history entry to recall");
            return;
        };
        let result = entry.result.clone();
        self.begin_action();
        self.state.current_input = result;
        self.state.reset_on_next_input = true;
        self.mark_operand_entered();
    }

    /// Empties the history
    pub fn clear_history(&mut self) {
        self.state.history.clear();
    }

    // ===== Internals =====

    fn operand(&self) -> CalcResult<f64> {
        parse_operand(&self.state.current_input)
            .ok_or_else(|| CalcError::InvalidInput(self.state.current_input.clone()))
    }

    fn displayed_value(&self) -> Option<f64> {
        if self.has_error() {
            None
        } else {
            parse_operand(&self.state.current_input)
        }
    }

    fn begin_action(&mut self) {
        if self.has_error() {
            self.recover();
        }
    }

    fn mark_operand_entered(&mut self) {
        if let Some(pending) = self.state.pending.as_mut() {
            pending.right_entered = true;
        }
        self.state.showing_result = false;
    }

    fn load_value(&mut self, value: f64) {
        if let Err(error) = unary::check_result(value) {
            self.fail(error);
            return;
        }
        self.state.current_input = format_result(value);
        self.state.reset_on_next_input = true;
        self.mark_operand_entered();
    }

    fn fail(&mut self, error: CalcError) {
        warn!(%error, input = %self.state.current_input, "calculation failed");
        let state = &mut self.state;
        state.current_input = ERROR_SENTINEL.to_string();
        state.pending = None;
        state.reset_on_next_input = true;
        state.showing_result = false;
        state.error = Some(error);
    }
}
