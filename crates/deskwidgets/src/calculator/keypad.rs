//! Calculator keypad and keyboard map
//!
//! Layout:
//! ```text
//! [ AC ] [ ± ] [ % ] [ ÷ ]
//! [ 7  ] [ 8 ] [ 9 ] [ × ]
//! [ 4  ] [ 5 ] [ 6 ] [ − ]
//! [ 1  ] [ 2 ] [ 3 ] [ + ]
//! [ 0  ] [ . ] [ ⌫ ] [ = ]
//! ```

use super::{Action, Operator};

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonDef {
    /// The action this button performs
    pub action: Action,
    /// Text shown on the button
    pub label: String,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl ButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: Action, row: usize, col: usize) -> Self {
        Self {
            action,
            label: action.label(),
            id: button_id(action),
            row,
            col,
        }
    }
}

/// DOM element id of the button performing `action`
#[must_use]
pub fn button_id(action: Action) -> String {
    match action {
        Action::Digit(d) => format!("btn-{d}"),
        other => format!("btn-{}", other.data_action().unwrap_or("unknown")),
    }
}

/// The calculator keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<ButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let grid = [
            [
                Action::Clear,
                Action::Negate,
                Action::Percent,
                Action::Operator(Operator::Divide),
            ],
            [
                Action::Digit(7),
                Action::Digit(8),
                Action::Digit(9),
                Action::Operator(Operator::Multiply),
            ],
            [
                Action::Digit(4),
                Action::Digit(5),
                Action::Digit(6),
                Action::Operator(Operator::Subtract),
            ],
            [
                Action::Digit(1),
                Action::Digit(2),
                Action::Digit(3),
                Action::Operator(Operator::Add),
            ],
            [
                Action::Digit(0),
                Action::DecimalPoint,
                Action::Backspace,
                Action::Equals,
            ],
        ];

        let buttons = grid
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .iter()
                    .enumerate()
                    .map(move |(col, action)| ButtonDef::new(*action, row, col))
            })
            .collect();

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[ButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&ButtonDef> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&ButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button performing `action`
    #[must_use]
    pub fn find_button_by_action(&self, action: Action) -> Option<&ButtonDef> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Maps a keyboard key (`KeyboardEvent.key` naming) to an action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<Action> {
        match key {
            "0" => Some(Action::Digit(0)),
            "1" => Some(Action::Digit(1)),
            "2" => Some(Action::Digit(2)),
            "3" => Some(Action::Digit(3)),
            "4" => Some(Action::Digit(4)),
            "5" => Some(Action::Digit(5)),
            "6" => Some(Action::Digit(6)),
            "7" => Some(Action::Digit(7)),
            "8" => Some(Action::Digit(8)),
            "9" => Some(Action::Digit(9)),
            "." => Some(Action::DecimalPoint),
            "+" => Some(Action::Operator(Operator::Add)),
            "-" => Some(Action::Operator(Operator::Subtract)),
            "*" | "x" => Some(Action::Operator(Operator::Multiply)),
            "/" => Some(Action::Operator(Operator::Divide)),
            "Enter" | "=" => Some(Action::Equals),
            "Escape" | "c" | "C" => Some(Action::Clear),
            "%" => Some(Action::Percent),
            "Backspace" => Some(Action::Backspace),
            _ => None,
        }
    }
}
