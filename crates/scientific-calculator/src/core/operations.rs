//! Calculator operations with their failure rules
//!
//! Typed operations keep invalid operator states unrepresentable.

use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Binary operator chosen on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
    /// Remainder, sign follows the dividend
    Modulo,
    /// Exponentiation
    Power,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
        Self::Power,
    ];

    /// Returns the operator glyph used in expressions
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Modulo => "mod",
            Self::Power => "^",
        }
    }

    /// Applies the operator to two operands
    ///
    /// The divisor check is an exact comparison against `0.0`.
    pub fn apply(self, left: f64, right: f64) -> CalcResult<f64> {
        let raw = match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => {
                if right == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                left / right
            }
            Self::Modulo => left % right,
            Self::Power => left.powf(right),
        };
        unary::check_result(raw)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unit used to interpret trigonometric inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Degrees (full turn = 360)
    #[default]
    Deg,
    /// Radians
    Rad,
    /// Gradians (full turn = 400)
    Grad,
}

impl AngleMode {
    /// Converts a value in this unit to radians
    #[must_use]
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Deg => value * PI / 180.0,
            Self::Rad => value,
            Self::Grad => value * PI / 200.0,
        }
    }

    /// Next mode in the deg → rad → grad cycle
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Deg => Self::Rad,
            Self::Rad => Self::Grad,
            Self::Grad => Self::Deg,
        }
    }

    /// Storage key value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deg => "deg",
            Self::Rad => "rad",
            Self::Grad => "grad",
        }
    }

    /// Indicator label for the display
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Deg => "DEG",
            Self::Rad => "RAD",
            Self::Grad => "GRAD",
        }
    }

    /// Unit suffix appended to the operand in history expressions
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Deg => "°",
            Self::Rad => " rad",
            Self::Grad => " grad",
        }
    }
}

impl FromStr for AngleMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deg" => Ok(Self::Deg),
            "rad" => Ok(Self::Rad),
            "grad" => Ok(Self::Grad),
            other => Err(CalcError::InvalidInput(other.to_string())),
        }
    }
}

/// Trigonometric function keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrigFunction {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
}

impl TrigFunction {
    /// Function name used in expressions
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
        }
    }
}

/// Logarithm base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogBase {
    /// Common logarithm
    Ten,
    /// Natural logarithm
    E,
}

impl LogBase {
    /// Function name used in expressions
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ten => "log",
            Self::E => "ln",
        }
    }
}

/// Constants that can be entered directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    /// π
    Pi,
    /// Euler's number
    E,
}

impl Constant {
    /// Numeric value
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Pi => PI,
            Self::E => E,
        }
    }

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::E => "e",
        }
    }
}

/// Single-operand functions
pub(crate) mod unary {
    use super::{AngleMode, LogBase, TrigFunction};
    use crate::core::{CalcError, CalcResult};

    /// Rejects NaN and infinite results
    pub fn check_result(value: f64) -> CalcResult<f64> {
        if value.is_nan() {
            Err(CalcError::InvalidResult)
        } else if value.is_infinite() {
            Err(CalcError::Overflow)
        } else {
            Ok(value)
        }
    }

    /// Trigonometric function of `value` interpreted in `mode`
    ///
    /// Tangent is rejected only when the cosine is exactly zero.
    pub fn trig(function: TrigFunction, value: f64, mode: AngleMode) -> CalcResult<f64> {
        let radians = mode.to_radians(value);
        let raw = match function {
            TrigFunction::Sin => radians.sin(),
            TrigFunction::Cos => radians.cos(),
            TrigFunction::Tan => {
                if radians.cos() == 0.0 {
                    return Err(CalcError::UndefinedResult);
                }
                radians.tan()
            }
        };
        check_result(raw)
    }

    /// Logarithm of a positive `value`
    ///
    /// Base ten uses `f64::log10` rather than `ln(x) / ln(10)`: the quotient
    /// lands just below whole numbers (`2.9999999999999996` for 1000), which
    /// the truncating formatter would display as `2.9999999999`.
    pub fn log(value: f64, base: LogBase) -> CalcResult<f64> {
        if value <= 0.0 {
            return Err(CalcError::domain(base.name()));
        }
        let raw = match base {
            LogBase::Ten => value.log10(),
            LogBase::E => value.ln(),
        };
        check_result(raw)
    }

    pub fn sqrt(value: f64) -> CalcResult<f64> {
        if value < 0.0 {
            return Err(CalcError::domain("√"));
        }
        check_result(value.sqrt())
    }

    pub fn square(value: f64) -> CalcResult<f64> {
        check_result(value * value)
    }

    /// Iterative factorial of a non-negative integer no greater than `limit`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn factorial(value: f64, limit: u32) -> CalcResult<f64> {
        if value < 0.0 || value.fract() != 0.0 {
            return Err(CalcError::domain("n!"));
        }
        if value > f64::from(limit) {
            return Err(CalcError::Overflow);
        }
        let n = value as u32;
        let mut acc = 1.0_f64;
        for i in 2..=n {
            acc *= f64::from(i);
        }
        check_result(acc)
    }

    pub fn reciprocal(value: f64) -> CalcResult<f64> {
        if value == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        check_result(1.0 / value)
    }
}

#[cfg(test)]
mod tests {
    use super::unary::*;
    use super::*;
    use proptest::prelude::*;

    // --- Operator ---

    #[test]
    fn test_operator_symbols() {
        let symbols: Vec<&str> = Operator::ALL.iter().map(|op| op.symbol()).collect();
        assert_eq!(symbols, vec!["+", "−", "×", "÷", "mod", "^"]);
    }

    #[test]
    fn test_apply_basic_arithmetic() {
        assert_eq!(Operator::Add.apply(2.0, 3.0), Ok(5.0));
        assert_eq!(Operator::Subtract.apply(3.0, 5.0), Ok(-2.0));
        assert_eq!(Operator::Multiply.apply(-2.0, 3.0), Ok(-6.0));
        assert_eq!(Operator::Divide.apply(6.0, 4.0), Ok(1.5));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(Operator::Divide.apply(5.0, 0.0), Err(CalcError::DivisionByZero));
        assert_eq!(Operator::Divide.apply(5.0, -0.0), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_modulo_sign_follows_dividend() {
        assert_eq!(Operator::Modulo.apply(-7.0, 3.0), Ok(-1.0));
        assert_eq!(Operator::Modulo.apply(7.0, -3.0), Ok(1.0));
    }

    #[test]
    fn test_modulo_by_zero_is_invalid_result() {
        assert_eq!(Operator::Modulo.apply(7.0, 0.0), Err(CalcError::InvalidResult));
    }

    #[test]
    fn test_power_fractional_and_negative_exponents() {
        assert_eq!(Operator::Power.apply(2.0, -1.0), Ok(0.5));
        let root = Operator::Power.apply(9.0, 0.5).unwrap();
        assert!((root - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_power_negative_base_fractional_exp_nan() {
        assert_eq!(Operator::Power.apply(-8.0, 0.5), Err(CalcError::InvalidResult));
    }

    #[test]
    fn test_power_overflow() {
        assert_eq!(Operator::Power.apply(10.0, 400.0), Err(CalcError::Overflow));
    }

    // --- AngleMode ---

    #[test]
    fn test_angle_mode_conversion() {
        assert!((AngleMode::Deg.to_radians(180.0) - PI).abs() < 1e-15);
        assert!((AngleMode::Grad.to_radians(200.0) - PI).abs() < 1e-15);
        assert_eq!(AngleMode::Rad.to_radians(1.25), 1.25);
    }

    #[test]
    fn test_angle_mode_cycle() {
        assert_eq!(AngleMode::Deg.next(), AngleMode::Rad);
        assert_eq!(AngleMode::Rad.next(), AngleMode::Grad);
        assert_eq!(AngleMode::Grad.next(), AngleMode::Deg);
    }

    #[test]
    fn test_angle_mode_from_str() {
        assert_eq!("RAD".parse::<AngleMode>(), Ok(AngleMode::Rad));
        assert_eq!(" grad ".parse::<AngleMode>(), Ok(AngleMode::Grad));
        assert!("turns".parse::<AngleMode>().is_err());
    }

    #[test]
    fn test_angle_mode_serde() {
        let json = serde_json::to_string(&AngleMode::Grad).unwrap();
        assert_eq!(json, "\"grad\"");
    }

    // --- Unary functions ---

    #[test]
    fn test_trig_degrees() {
        let sin30 = trig(TrigFunction::Sin, 30.0, AngleMode::Deg).unwrap();
        assert!((sin30 - 0.5).abs() < 1e-12);
        assert_eq!(trig(TrigFunction::Cos, 0.0, AngleMode::Deg), Ok(1.0));
    }

    #[test]
    fn test_tan_near_asymptote_is_finite() {
        // cos(π/2) is not exactly zero in binary floating point
        let value = trig(TrigFunction::Tan, 90.0, AngleMode::Deg).unwrap();
        assert!(value.abs() > 1e15);
    }

    #[test]
    fn test_log_domain() {
        assert_eq!(log(0.0, LogBase::Ten), Err(CalcError::domain("log")));
        assert_eq!(log(-1.0, LogBase::E), Err(CalcError::domain("ln")));
        assert_eq!(log(1000.0, LogBase::Ten), Ok(3.0));
        assert_eq!(log(1.0, LogBase::E), Ok(0.0));
    }

    #[test]
    fn test_log_ten_exact_on_powers_of_ten() {
        for exponent in 1..=8 {
            let value = 10f64.powi(exponent);
            assert_eq!(log(value, LogBase::Ten), Ok(f64::from(exponent)));
        }
        assert_eq!(
            crate::core::format_result(log(1000.0, LogBase::Ten).unwrap()),
            "3"
        );
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt(4.0), Ok(2.0));
        assert_eq!(sqrt(-4.0), Err(CalcError::domain("√")));
    }

    #[test]
    fn test_square() {
        assert_eq!(square(-3.0), Ok(9.0));
        assert_eq!(square(1e200), Err(CalcError::Overflow));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0.0, 100), Ok(1.0));
        assert_eq!(factorial(5.0, 100), Ok(120.0));
        assert_eq!(factorial(-1.0, 100), Err(CalcError::domain("n!")));
        assert_eq!(factorial(2.5, 100), Err(CalcError::domain("n!")));
        assert_eq!(factorial(101.0, 100), Err(CalcError::Overflow));
        assert!(factorial(100.0, 100).is_ok());
    }

    #[test]
    fn test_reciprocal() {
        assert_eq!(reciprocal(4.0), Ok(0.25));
        assert_eq!(reciprocal(0.0), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_constants() {
        assert_eq!(Constant::Pi.value(), PI);
        assert_eq!(Constant::E.name(), "e");
    }

    proptest! {
        #[test]
        fn prop_add_commutative(a in -1e10f64..1e10f64, b in -1e10f64..1e10f64) {
            prop_assert_eq!(Operator::Add.apply(a, b), Operator::Add.apply(b, a));
        }

        #[test]
        fn prop_divide_by_self(a in -1e10f64..1e10f64) {
            prop_assume!(a != 0.0);
            let result = Operator::Divide.apply(a, a).unwrap();
            prop_assert!((result - 1.0).abs() < 1e-12);
        }

        #[test]
        fn prop_factorial_integers_below_limit_succeed(n in 0u32..=100) {
            prop_assert!(factorial(f64::from(n), 100).is_ok());
        }
    }
}
