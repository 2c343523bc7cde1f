//! Binary arithmetic on display operands

use serde::{Deserialize, Serialize};

use super::number::parse_operand;
use super::{CalcError, CalcResult};

/// The four binary operators on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Returns the `data-action` attribute value of the operator button
    #[must_use]
    pub const fn data_action(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Looks up an operator by its `data-action` name
    #[must_use]
    pub fn from_data_action(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.data_action() == name)
    }

    /// Applies the operator to two numbers.
    ///
    /// A zero divisor is [`CalcError::DivisionByZero`]; any other non-finite
    /// result is [`CalcError::Overflow`].
    pub fn apply(self, a: f64, b: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
        };
        check_finite(result)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Evaluates `first op second` where both operands are display text.
pub fn evaluate(first: &str, op: Operator, second: &str) -> CalcResult<f64> {
    let a = parse_operand(first)?;
    let b = parse_operand(second)?;
    op.apply(a, b)
}

fn check_finite(result: f64) -> CalcResult<f64> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(CalcError::Overflow)
    }
}
