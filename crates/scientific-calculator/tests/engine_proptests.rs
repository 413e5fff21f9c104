//! Property-based tests for the calculator engine and keypad
//!
//! Random keystroke sequences check invariants that hand-written cases miss.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use proptest::prelude::*;
use scientific_calculator::prelude::*;

// ===== Strategy definitions =====

fn digit_strategy() -> impl Strategy<Value = u8> {
    0u8..=9u8
}

fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop::sample::select(Operator::ALL.to_vec())
}

/// Any action except those that consult the prompt
fn keypad_action_strategy() -> impl Strategy<Value = KeypadAction> {
    prop_oneof![
        4 => digit_strategy().prop_map(KeypadAction::Digit),
        1 => Just(KeypadAction::Decimal),
        2 => operator_strategy().prop_map(KeypadAction::Operator),
        1 => Just(KeypadAction::Equals),
        1 => prop::sample::select(vec![
            KeypadAction::Trig(TrigFunction::Sin),
            KeypadAction::Trig(TrigFunction::Cos),
            KeypadAction::Trig(TrigFunction::Tan),
            KeypadAction::Log(LogBase::Ten),
            KeypadAction::Log(LogBase::E),
            KeypadAction::Sqrt,
            KeypadAction::Square,
            KeypadAction::Factorial,
            KeypadAction::Reciprocal,
            KeypadAction::ToggleSign,
            KeypadAction::Constant(Constant::Pi),
            KeypadAction::Constant(Constant::E),
        ]),
        1 => prop::sample::select(vec![
            KeypadAction::MemoryClear,
            KeypadAction::MemoryRecall,
            KeypadAction::MemoryAdd,
            KeypadAction::MemorySubtract,
            KeypadAction::MemoryStore,
            KeypadAction::ClearAll,
            KeypadAction::ClearEntry,
            KeypadAction::Backspace,
            KeypadAction::CycleAngleMode,
            KeypadAction::RecallHistory(0),
            KeypadAction::ClearHistory,
        ]),
    ]
}

fn run(actions: &[KeypadAction]) -> CalculatorEngine {
    let mut engine = CalculatorEngine::new();
    let mut prompt = ScriptedPrompt::new();
    for action in actions {
        engine.apply(*action, &mut prompt);
    }
    engine
}

fn finite_value_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![-1e300f64..1e300f64, -1e6f64..1e6f64, -1e-6f64..1e-6f64]
}

fn type_number(engine: &mut CalculatorEngine, n: u32) {
    for ch in n.to_string().chars() {
        engine.input_digit(ch);
    }
}

// ===== Engine invariants =====

proptest! {
    /// The operand is always a finite number or the error sentinel
    #[test]
    fn prop_current_input_is_finite_or_error(
        actions in prop::collection::vec(keypad_action_strategy(), 0..60)
    ) {
        let engine = run(&actions);
        let current = engine.current_input();
        if engine.has_error() {
            prop_assert_eq!(current, ERROR_SENTINEL);
        } else {
            let value = parse_operand(current);
            prop_assert!(value.is_some_and(f64::is_finite), "{current} is not finite");
        }
    }

    /// Long digit runs stop short of overflowing, and memory stays finite
    #[test]
    fn prop_long_digit_runs_stay_finite(digit in 1u8..=9u8, len in 300usize..420) {
        let mut engine = CalculatorEngine::new();
        let ch = char::from(b'0' + digit);
        for _ in 0..len {
            engine.input_digit(ch);
        }
        prop_assert!(parse_operand(engine.current_input()).is_some_and(f64::is_finite));
        engine.memory_store();
        prop_assert!(engine.memory().is_finite());
        engine.set_operator(Operator::Add);
        prop_assert!(!engine.view().expression.contains("Infinito"));
    }

    /// Never more than one decimal point
    #[test]
    fn prop_single_decimal_point(
        actions in prop::collection::vec(keypad_action_strategy(), 0..60)
    ) {
        let engine = run(&actions);
        prop_assert!(engine.current_input().matches('.').count() <= 1);
    }

    /// History never exceeds its bound
    #[test]
    fn prop_history_bounded(
        actions in prop::collection::vec(keypad_action_strategy(), 0..200)
    ) {
        let engine = run(&actions);
        prop_assert!(engine.history().len() <= 10);
    }

    /// A pending operator always carries its left operand
    #[test]
    fn prop_pending_operator_has_operand(
        actions in prop::collection::vec(keypad_action_strategy(), 0..60)
    ) {
        let engine = run(&actions);
        prop_assert_eq!(
            engine.pending_operator().is_some(),
            engine.previous_input().is_some()
        );
        if engine.has_error() {
            prop_assert!(engine.pending_operator().is_none());
        }
    }

    /// Recovery always lands on a clean first operand
    #[test]
    fn prop_recover_is_clean(
        actions in prop::collection::vec(keypad_action_strategy(), 0..60)
    ) {
        let mut engine = run(&actions);
        let was_error = engine.has_error();
        engine.recover();
        prop_assert!(!engine.has_error());
        if was_error {
            prop_assert_eq!(engine.current_input(), "0");
            prop_assert_eq!(engine.phase(), Phase::AwaitingFirstOperand);
        }
    }

    /// Integer addition through the keypad matches arithmetic
    #[test]
    fn prop_addition_matches(a in 0u32..100_000, b in 0u32..100_000) {
        let mut engine = CalculatorEngine::new();
        type_number(&mut engine, a);
        engine.set_operator(Operator::Add);
        type_number(&mut engine, b);
        engine.equals();
        prop_assert_eq!(engine.current_input(), (a + b).to_string());
        prop_assert_eq!(
            engine.history().latest().unwrap().expression.clone(),
            format!("{a} + {b}")
        );
    }

    /// Toggling the sign twice restores typed input
    #[test]
    fn prop_toggle_sign_involution(n in 0u32..1_000_000) {
        let mut engine = CalculatorEngine::new();
        type_number(&mut engine, n);
        let before = engine.current_input().to_string();
        engine.toggle_sign();
        engine.toggle_sign();
        prop_assert_eq!(engine.current_input(), before);
    }

    /// Store, clear, recall always yields zero
    #[test]
    fn prop_memory_store_clear_recall(n in 0u32..1_000_000) {
        let mut engine = CalculatorEngine::new();
        type_number(&mut engine, n);
        engine.memory_store();
        engine.memory_clear();
        engine.memory_recall();
        prop_assert_eq!(engine.current_input(), "0");
    }

    /// Dividing by a typed zero is always an error
    #[test]
    fn prop_divide_by_zero(n in 0u32..1_000_000) {
        let mut engine = CalculatorEngine::new();
        type_number(&mut engine, n);
        engine.set_operator(Operator::Divide);
        engine.input_digit('0');
        engine.equals();
        prop_assert_eq!(engine.error(), Some(&CalcError::DivisionByZero));
    }
}

// ===== Formatting =====

proptest! {
    /// Finite results re-parse close to the original value
    #[test]
    fn prop_format_reparses(value in finite_value_strategy()) {
        let text = format_result(value);
        let parsed = parse_operand(&text).unwrap();
        let tolerance = value.abs() * 1e-9 + 1e-10;
        prop_assert!((parsed - value).abs() <= tolerance, "{value} -> {text}");
    }

    /// Plain notation inside the thresholds, at most ten decimals
    #[test]
    fn prop_format_plain_range(value in -1e10f64..1e10f64) {
        prop_assume!(value.abs() >= 1e-10);
        let text = format_result(value);
        prop_assert!(!text.contains('e'), "{text}");
        if let Some((_, fraction)) = text.split_once('.') {
            prop_assert!(fraction.len() <= 10);
            prop_assert!(!fraction.ends_with('0'));
        }
    }

    /// Scientific notation outside the thresholds
    #[test]
    fn prop_format_scientific_range(mantissa in 1.0f64..9.0, exponent in 11i32..300) {
        let text = format_result(mantissa * 10f64.powi(exponent));
        prop_assert!(text.contains("e+"), "{text}");
        let small = format_result(mantissa * 10f64.powi(-exponent));
        prop_assert!(small.contains("e-"), "{small}");
    }
}

// ===== Keypad =====

proptest! {
    /// Every button id resolves back to its action
    #[test]
    fn prop_button_ids_round_trip(index in 0usize..39) {
        let keypad = Keypad::new();
        let button = &keypad.buttons()[index];
        prop_assert_eq!(keypad.handle_click(&button.id), Some(button.action));
        prop_assert!(!button.action.label().is_empty());
    }

    /// A number token expands to one action per character
    #[test]
    fn prop_number_token_expands(n in 0u32..u32::MAX) {
        let token = n.to_string();
        let actions = token_to_actions(&token).unwrap();
        prop_assert_eq!(actions.len(), token.len());
    }

    /// Single digit keys map to digit actions
    #[test]
    fn prop_digit_keys(d in digit_strategy()) {
        prop_assert_eq!(key_to_action(&d.to_string()), Some(KeypadAction::Digit(d)));
    }
}

// ===== Drivers =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The engine and mock-DOM drivers display the same thing
    #[test]
    fn prop_drivers_agree(
        actions in prop::collection::vec(keypad_action_strategy(), 0..30)
    ) {
        let mut engine = EngineDriver::new();
        let mut wasm = WasmDriver::new();
        for action in &actions {
            engine.press(*action);
            wasm.press(*action);
        }
        prop_assert_eq!(engine.display(), wasm.display());
        prop_assert_eq!(engine.expression(), wasm.expression());
        prop_assert_eq!(engine.get_history(), wasm.get_history());
    }
}
