//! Calculator core: operations, formatting, history and the keystroke engine.
//!
//! Everything in here is pure in-memory logic. Host capabilities (storage,
//! display, prompts) live in [`crate::host`] and are injected by the caller.

pub mod engine;
pub mod format;
pub mod history;
mod operations;

pub use engine::{CalculatorEngine, CalculatorState, DisplayView, PendingOperation, Phase};
pub use format::{format_result, parse_operand, ERROR_SENTINEL};
pub use operations::{AngleMode, Constant, LogBase, Operator, TrigFunction};

pub(crate) use operations::unary;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types - exhaustive enum ensures all cases handled
///
/// Messages are the text shown on the error display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division (or reciprocal) with a zero divisor
    #[error("No se puede dividir entre cero")]
    DivisionByZero,
    /// Input outside the domain of a function (log, sqrt, factorial)
    #[error("Entrada fuera del dominio de {function}")]
    DomainError {
        /// Name of the rejecting function
        function: &'static str,
    },
    /// Tangent at an asymptote
    #[error("Resultado indefinido")]
    UndefinedResult,
    /// Result exceeds the representable or configured range
    #[error("Desbordamiento")]
    Overflow,
    /// Result is not a number
    #[error("Resultado no válido")]
    InvalidResult,
    /// Text supplied by the user could not be read as a number
    #[error("Entrada no válida: {0}")]
    InvalidInput(String),
}

impl CalcError {
    /// Creates a domain error for the named function
    #[must_use]
    pub const fn domain(function: &'static str) -> Self {
        Self::DomainError { function }
    }
}
