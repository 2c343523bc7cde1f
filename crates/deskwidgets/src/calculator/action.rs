//! The closed action vocabulary accepted by the engine

use serde::{Deserialize, Serialize};

use super::Operator;

/// A semantic button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// A digit key (0-9)
    Digit(u8),
    /// The decimal point
    DecimalPoint,
    /// One of the four binary operators
    Operator(Operator),
    /// Evaluate the pending operation
    Equals,
    /// Reset everything (AC)
    Clear,
    /// Divide the display by 100
    Percent,
    /// Flip the sign of the display
    Negate,
    /// Delete the last display character
    Backspace,
}

impl Action {
    /// Creates a digit action, rejecting values above 9
    #[must_use]
    pub fn digit(d: u8) -> Option<Self> {
        (d <= 9).then_some(Self::Digit(d))
    }

    /// Returns the `data-action` attribute value, `None` for digits
    /// (digit buttons carry `data-key` instead)
    #[must_use]
    pub const fn data_action(&self) -> Option<&'static str> {
        match self {
            Self::Digit(_) => None,
            Self::DecimalPoint => Some("decimal"),
            Self::Operator(op) => Some(op.data_action()),
            Self::Equals => Some("calculate"),
            Self::Clear => Some("clear"),
            Self::Percent => Some("percentage"),
            Self::Negate => Some("negate"),
            Self::Backspace => Some("backspace"),
        }
    }

    /// Translates a clicked button into an action.
    ///
    /// A button whose text content is a single digit is a digit press
    /// regardless of its `data-action`; otherwise the `data-action` decides.
    #[must_use]
    pub fn from_button(data_action: Option<&str>, content: &str) -> Option<Self> {
        let mut chars = content.trim().chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(d) = c.to_digit(10) {
                return Some(Self::Digit(d as u8));
            }
        }

        match data_action? {
            "decimal" => Some(Self::DecimalPoint),
            "calculate" => Some(Self::Equals),
            "clear" => Some(Self::Clear),
            "percentage" => Some(Self::Percent),
            "negate" => Some(Self::Negate),
            "backspace" => Some(Self::Backspace),
            other => Operator::from_data_action(other).map(Self::Operator),
        }
    }

    /// Returns the keypad label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::DecimalPoint => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "AC".to_string(),
            Self::Percent => "%".to_string(),
            Self::Negate => "±".to_string(),
            Self::Backspace => "⌫".to_string(),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "digit({d})"),
            other => f.write_str(other.data_action().unwrap_or("?")),
        }
    }
}
