//! Calculator engine
//!
//! A four-function calculator driven one button press at a time. There is no
//! expression parsing and no precedence: `a + b × c =` evaluates left to right.

mod action;
mod engine;
pub mod keypad;
pub mod number;
mod operations;

pub use action::Action;
pub use engine::{Calculator, CalculatorState, DisplayUpdate, Phase, MAX_INPUT_LEN};
pub use keypad::{ButtonDef, Keypad};
pub use operations::{evaluate, Operator};

use serde::Serialize;
use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Arithmetic failures. None of these are raised to the caller of
/// [`Calculator::apply`]; they surface as a sentinel on the display.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum CalcError {
    /// Division with a zero second operand
    #[error("division by zero")]
    DivisionByZero,
    /// Result is not a finite number
    #[error("result is not a finite number")]
    Overflow,
    /// Display text has no numeric prefix
    #[error("not a number: {0:?}")]
    InvalidOperand(String),
}

impl CalcError {
    /// Display string shown in place of a number
    #[must_use]
    pub const fn sentinel(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "Error: Div by 0",
            Self::Overflow => "Error: Overflow",
            Self::InvalidOperand(_) => "Error: Invalid input",
        }
    }

    /// Returns true if `text` is one of the sentinels
    #[must_use]
    pub fn is_sentinel(text: &str) -> bool {
        text.starts_with("Error")
    }
}
