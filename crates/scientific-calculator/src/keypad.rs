//! Keypad actions, button layout and input mappings
//!
//! Every input surface funnels into one action type.
//!
//! Buttons, keyboard keys and CLI tokens all resolve to a [`KeypadAction`],
//! which [`CalculatorEngine::apply`] dispatches to the engine.

use crate::core::{AngleMode, CalculatorEngine, Constant, LogBase, Operator, TrigFunction};
use crate::host::ExponentPrompt;

/// Everything a user can ask the calculator to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Insert a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Choose a binary operator
    Operator(Operator),
    /// Resolve the pending operation
    Equals,
    /// Raise to a power read from the exponent prompt
    PowerPrompt,
    /// sin, cos or tan
    Trig(TrigFunction),
    /// log or ln
    Log(LogBase),
    /// Square root
    Sqrt,
    /// Square
    Square,
    /// Factorial
    Factorial,
    /// Reciprocal
    Reciprocal,
    /// Flip the sign
    ToggleSign,
    /// Insert π or e
    Constant(Constant),
    /// MC
    MemoryClear,
    /// MR
    MemoryRecall,
    /// M+
    MemoryAdd,
    /// M−
    MemorySubtract,
    /// MS
    MemoryStore,
    /// C
    ClearAll,
    /// CE
    ClearEntry,
    /// Delete the last character
    Backspace,
    /// DEG → RAD → GRAD
    CycleAngleMode,
    /// Select an angle mode directly
    SetAngleMode(AngleMode),
    /// Load a history result (0 = newest)
    RecallHistory(usize),
    /// Empty the history
    ClearHistory,
}

impl KeypadAction {
    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::PowerPrompt => "xʸ".to_string(),
            Self::Trig(function) => function.name().to_string(),
            Self::Log(base) => base.name().to_string(),
            Self::Sqrt => "√".to_string(),
            Self::Square => "x²".to_string(),
            Self::Factorial => "n!".to_string(),
            Self::Reciprocal => "1/x".to_string(),
            Self::ToggleSign => "±".to_string(),
            Self::Constant(constant) => constant.name().to_string(),
            Self::MemoryClear => "MC".to_string(),
            Self::MemoryRecall => "MR".to_string(),
            Self::MemoryAdd => "M+".to_string(),
            Self::MemorySubtract => "M−".to_string(),
            Self::MemoryStore => "MS".to_string(),
            Self::ClearAll => "C".to_string(),
            Self::ClearEntry => "CE".to_string(),
            Self::Backspace => "⌫".to_string(),
            Self::CycleAngleMode => "DRG".to_string(),
            Self::SetAngleMode(mode) => mode.label().to_string(),
            Self::RecallHistory(index) => format!("H{index}"),
            Self::ClearHistory => "Borrar historial".to_string(),
        }
    }

    /// DOM element id of the button bound to this action
    #[must_use]
    pub fn element_id(&self) -> String {
        match self {
            Self::Digit(d) => format!("btn-{d}"),
            Self::Operator(op) => format!("btn-{}", operator_name(*op)),
            Self::Trig(function) => format!("btn-{}", function.name()),
            Self::Log(base) => format!("btn-{}", base.name()),
            Self::Constant(Constant::Pi) => "btn-pi".to_string(),
            Self::Constant(Constant::E) => "btn-e".to_string(),
            Self::SetAngleMode(mode) => format!("btn-mode-{}", mode.as_str()),
            Self::RecallHistory(index) => format!("history-{index}"),
            other => format!("btn-{}", other.simple_name()),
        }
    }

    fn simple_name(self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::Equals => "equals",
            Self::PowerPrompt => "power",
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Factorial => "factorial",
            Self::Reciprocal => "reciprocal",
            Self::ToggleSign => "sign",
            Self::MemoryClear => "mc",
            Self::MemoryRecall => "mr",
            Self::MemoryAdd => "mplus",
            Self::MemorySubtract => "mminus",
            Self::MemoryStore => "ms",
            Self::ClearAll => "clear",
            Self::ClearEntry => "clear-entry",
            Self::Backspace => "backspace",
            Self::CycleAngleMode => "angle-mode",
            Self::ClearHistory => "clear-history",
            _ => "action",
        }
    }
}

/// Returns a name for an operator (for element IDs)
const fn operator_name(op: Operator) -> &'static str {
    match op {
        Operator::Add => "plus",
        Operator::Subtract => "minus",
        Operator::Multiply => "times",
        Operator::Divide => "divide",
        Operator::Modulo => "mod",
        Operator::Power => "pow",
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        Self {
            id: action.element_id(),
            action,
            row,
            col,
        }
    }
}

/// Scientific keypad layout
///
/// ```text
/// [ MC ] [ MR ] [ M+ ] [ M− ] [ MS ]
/// [sin ] [cos ] [tan ] [DRG ] [ ⌫  ]
/// [log ] [ ln ] [ √  ] [ x² ] [ xʸ ]
/// [ n! ] [1/x ] [ π  ] [ e  ] [ CE ]
/// [ 7  ] [ 8  ] [ 9  ] [ ÷  ] [ C  ]
/// [ 4  ] [ 5  ] [ 6  ] [ ×  ] [mod ]
/// [ 1  ] [ 2  ] [ 3  ] [ −  ] [ ±  ]
/// [ 0  ] [ .  ] [ =  ] [ +  ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard scientific keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction as A;

        let layout: [&[KeypadAction]; 8] = [
            &[
                A::MemoryClear,
                A::MemoryRecall,
                A::MemoryAdd,
                A::MemorySubtract,
                A::MemoryStore,
            ],
            &[
                A::Trig(TrigFunction::Sin),
                A::Trig(TrigFunction::Cos),
                A::Trig(TrigFunction::Tan),
                A::CycleAngleMode,
                A::Backspace,
            ],
            &[
                A::Log(LogBase::Ten),
                A::Log(LogBase::E),
                A::Sqrt,
                A::Square,
                A::PowerPrompt,
            ],
            &[
                A::Factorial,
                A::Reciprocal,
                A::Constant(Constant::Pi),
                A::Constant(Constant::E),
                A::ClearEntry,
            ],
            &[
                A::Digit(7),
                A::Digit(8),
                A::Digit(9),
                A::Operator(Operator::Divide),
                A::ClearAll,
            ],
            &[
                A::Digit(4),
                A::Digit(5),
                A::Digit(6),
                A::Operator(Operator::Multiply),
                A::Operator(Operator::Modulo),
            ],
            &[
                A::Digit(1),
                A::Digit(2),
                A::Digit(3),
                A::Operator(Operator::Subtract),
                A::ToggleSign,
            ],
            &[A::Digit(0), A::Decimal, A::Equals, A::Operator(Operator::Add)],
        ];

        let buttons = layout
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .iter()
                    .enumerate()
                    .map(move |(col, action)| KeypadButtonDef::new(*action, row, col))
            })
            .collect();

        Self {
            buttons,
            rows: layout.len(),
            cols: layout.iter().map(|r| r.len()).max().unwrap_or(0),
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Resolves a clicked element id to an action
    ///
    /// History list items (`history-N`) are clickable too.
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        if let Some(button) = self.find_button_by_id(element_id) {
            return Some(button.action);
        }
        element_id
            .strip_prefix("history-")
            .and_then(|index| index.parse().ok())
            .map(KeypadAction::RecallHistory)
    }
}

/// Maps a keyboard key to a keypad action
#[must_use]
pub fn key_to_action(key: &str) -> Option<KeypadAction> {
    let action = match key {
        "." | "," => KeypadAction::Decimal,
        "+" => KeypadAction::Operator(Operator::Add),
        "-" => KeypadAction::Operator(Operator::Subtract),
        "*" => KeypadAction::Operator(Operator::Multiply),
        "/" => KeypadAction::Operator(Operator::Divide),
        "%" => KeypadAction::Operator(Operator::Modulo),
        "^" => KeypadAction::Operator(Operator::Power),
        "Enter" | "=" => KeypadAction::Equals,
        "Escape" => KeypadAction::ClearAll,
        "Delete" => KeypadAction::ClearEntry,
        "Backspace" => KeypadAction::Backspace,
        _ => return single_digit(key),
    };
    Some(action)
}

fn single_digit(key: &str) -> Option<KeypadAction> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => digit_action(ch),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn digit_action(ch: char) -> Option<KeypadAction> {
    ch.to_digit(10).map(|d| KeypadAction::Digit(d as u8))
}

/// Translates a command-line token into actions
///
/// A run of digits and decimal points (`12.5`) expands to one action per
/// character. Returns `None` for unknown tokens.
#[must_use]
pub fn token_to_actions(token: &str) -> Option<Vec<KeypadAction>> {
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return token
            .chars()
            .map(|c| {
                if c == '.' {
                    Some(KeypadAction::Decimal)
                } else {
                    digit_action(c)
                }
            })
            .collect();
    }

    let action = match token.to_ascii_lowercase().as_str() {
        "+" => KeypadAction::Operator(Operator::Add),
        "-" | "−" => KeypadAction::Operator(Operator::Subtract),
        "*" | "x" | "×" => KeypadAction::Operator(Operator::Multiply),
        "/" | "÷" => KeypadAction::Operator(Operator::Divide),
        "%" | "mod" => KeypadAction::Operator(Operator::Modulo),
        "^" => KeypadAction::Operator(Operator::Power),
        "=" => KeypadAction::Equals,
        "pow" | "xy" => KeypadAction::PowerPrompt,
        "sin" => KeypadAction::Trig(TrigFunction::Sin),
        "cos" => KeypadAction::Trig(TrigFunction::Cos),
        "tan" => KeypadAction::Trig(TrigFunction::Tan),
        "log" => KeypadAction::Log(LogBase::Ten),
        "ln" => KeypadAction::Log(LogBase::E),
        "sqrt" | "√" => KeypadAction::Sqrt,
        "sq" | "x2" | "x²" => KeypadAction::Square,
        "!" | "fact" => KeypadAction::Factorial,
        "inv" | "1/x" => KeypadAction::Reciprocal,
        "neg" | "±" | "+/-" => KeypadAction::ToggleSign,
        "pi" | "π" => KeypadAction::Constant(Constant::Pi),
        "e" => KeypadAction::Constant(Constant::E),
        "mc" => KeypadAction::MemoryClear,
        "mr" => KeypadAction::MemoryRecall,
        "m+" => KeypadAction::MemoryAdd,
        "m-" | "m−" => KeypadAction::MemorySubtract,
        "ms" => KeypadAction::MemoryStore,
        "c" | "ac" => KeypadAction::ClearAll,
        "ce" => KeypadAction::ClearEntry,
        "bs" | "back" | "⌫" => KeypadAction::Backspace,
        "drg" => KeypadAction::CycleAngleMode,
        "deg" => KeypadAction::SetAngleMode(AngleMode::Deg),
        "rad" => KeypadAction::SetAngleMode(AngleMode::Rad),
        "grad" => KeypadAction::SetAngleMode(AngleMode::Grad),
        "hc" => KeypadAction::ClearHistory,
        other => {
            let index = other.strip_prefix('h')?.parse().ok()?;
            KeypadAction::RecallHistory(index)
        }
    };
    Some(vec![action])
}

impl CalculatorEngine {
    /// Dispatches a keypad action to the matching engine operation
    pub fn apply<P>(&mut self, action: KeypadAction, prompt: &mut P)
    where
        P: ExponentPrompt + ?Sized,
    {
        match action {
            KeypadAction::Digit(d) => {
                if let Some(ch) = char::from_digit(u32::from(d), 10) {
                    self.input_digit(ch);
                }
            }
            KeypadAction::Decimal => self.input_digit('.'),
            KeypadAction::Operator(op) => self.set_operator(op),
            KeypadAction::Equals => self.equals(),
            KeypadAction::PowerPrompt => self.apply_power_with(prompt),
            KeypadAction::Trig(function) => self.apply_trig(function),
            KeypadAction::Log(base) => self.apply_log(base),
            KeypadAction::Sqrt => self.apply_sqrt(),
            KeypadAction::Square => self.apply_square(),
            KeypadAction::Factorial => self.apply_factorial(),
            KeypadAction::Reciprocal => self.apply_reciprocal(),
            KeypadAction::ToggleSign => self.toggle_sign(),
            KeypadAction::Constant(constant) => self.input_constant(constant),
            KeypadAction::MemoryClear => self.memory_clear(),
            KeypadAction::MemoryRecall => self.memory_recall(),
            KeypadAction::MemoryAdd => self.memory_add(),
            KeypadAction::MemorySubtract => self.memory_subtract(),
            KeypadAction::MemoryStore => self.memory_store(),
            KeypadAction::ClearAll => self.clear_all(),
            KeypadAction::ClearEntry => self.clear_entry(),
            KeypadAction::Backspace => self.backspace(),
            KeypadAction::CycleAngleMode => self.cycle_angle_mode(),
            KeypadAction::SetAngleMode(mode) => self.set_angle_mode(mode),
            KeypadAction::RecallHistory(index) => self.recall_history(index),
            KeypadAction::ClearHistory => self.clear_history(),
        }
    }
}
