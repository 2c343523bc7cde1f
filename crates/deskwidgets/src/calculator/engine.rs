//! Calculator state machine
//!
//! State is three pieces on top of the display text: a captured first
//! operand, a pending operator and the "awaiting second operand" flag. The
//! operator keys evaluate eagerly, so `3 + 4 +` shows `7` before `=`.
//!
//! While an error sentinel is on the display the engine is in
//! [`Phase::Error`]. Backspace leaves it alone, a digit or decimal point starts
//! a fresh number from Idle, and any other key returns to Idle without being
//! applied. A sentinel is never parsed as an operand.

use serde::Serialize;
use tracing::{debug, trace};

use super::number::{format_display, format_number, js_number_string, parse_operand};
use super::{evaluate, Action, CalcError, Operator};

/// Typed digits stop being accepted once the display reaches this length
pub const MAX_INPUT_LEN: usize = 15;

/// Complete calculator state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatorState {
    display: String,
    first_operand: Option<String>,
    pending_operator: Option<Operator>,
    awaiting_second_operand: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<CalcError>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            first_operand: None,
            pending_operator: None,
            awaiting_second_operand: false,
            error: None,
        }
    }
}

impl CalculatorState {
    /// Text shown on the display
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Operand captured before the pending operator
    #[must_use]
    pub fn first_operand(&self) -> Option<&str> {
        self.first_operand.as_deref()
    }

    /// Operator waiting for its second operand
    #[must_use]
    pub const fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    /// Whether the next digit starts a new number
    #[must_use]
    pub const fn awaiting_second_operand(&self) -> bool {
        self.awaiting_second_operand
    }

    /// Error currently shown on the display, if any
    #[must_use]
    pub const fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    /// Returns true for the initial state
    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    /// Classifies the state
    #[must_use]
    pub fn phase(&self) -> Phase {
        if let Some(err) = &self.error {
            return Phase::Error { error: err.clone() };
        }
        match (&self.first_operand, self.pending_operator) {
            (Some(first), Some(op)) => Phase::OperatorPending {
                first_operand: first.clone(),
                operator: op,
                awaiting_second_operand: self.awaiting_second_operand,
            },
            _ => Phase::Idle,
        }
    }
}

/// Coarse state of the machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// No operation in flight
    Idle,
    /// An operator has been accepted
    OperatorPending {
        /// Left-hand operand
        first_operand: String,
        /// Operator waiting for its right-hand operand
        operator: Operator,
        /// True until the first key of the second operand
        awaiting_second_operand: bool,
    },
    /// An error sentinel is displayed
    Error {
        /// The failure behind the sentinel
        error: CalcError,
    },
}

/// Result of applying one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayUpdate {
    /// Display text after the action
    pub display: String,
    /// Whether the display text changed
    pub changed: bool,
}

/// The calculator engine. One instance per calculator widget.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: CalculatorState,
}

impl Calculator {
    /// Creates an engine in the Idle state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.state.display
    }

    /// Returns to Idle
    pub fn reset(&mut self) {
        self.state = CalculatorState::default();
    }

    /// Applies every action in order and returns the final display
    pub fn apply_all<I>(&mut self, actions: I) -> DisplayUpdate
    where
        I: IntoIterator<Item = Action>,
    {
        let before = self.state.display.clone();
        for action in actions {
            self.apply(action);
        }
        DisplayUpdate {
            changed: before != self.state.display,
            display: self.state.display.clone(),
        }
    }

    /// Applies one action and returns the new display
    pub fn apply(&mut self, action: Action) -> DisplayUpdate {
        let before = self.state.display.clone();

        if self.state.error.is_some() {
            self.recover(action);
        } else {
            self.dispatch(action);
        }

        trace!(
            %action,
            phase = ?self.state.phase(),
            display = %self.state.display,
            "applied"
        );
        DisplayUpdate {
            changed: before != self.state.display,
            display: self.state.display.clone(),
        }
    }

    fn recover(&mut self, action: Action) {
        match action {
            Action::Backspace => {}
            Action::Digit(_) | Action::DecimalPoint => {
                self.reset();
                self.dispatch(action);
            }
            other => {
                debug!(action = %other, "clearing error");
                self.reset();
            }
        }
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Digit(d) => self.input_digit(d),
            Action::DecimalPoint => self.input_decimal(),
            Action::Operator(op) => self.input_operator(op),
            Action::Equals => self.equals(),
            Action::Clear => self.reset(),
            Action::Percent => self.percent(),
            Action::Negate => self.negate(),
            Action::Backspace => self.backspace(),
        }
    }

    fn input_digit(&mut self, d: u8) {
        let Some(c) = char::from_digit(u32::from(d), 10) else {
            return;
        };
        if self.state.display == "0" || self.state.awaiting_second_operand {
            self.set_display(&c.to_string());
            self.state.awaiting_second_operand = false;
        } else if self.state.display.len() < MAX_INPUT_LEN {
            let next = format!("{}{c}", self.state.display);
            self.set_display(&next);
        }
    }

    fn input_decimal(&mut self) {
        if self.state.awaiting_second_operand {
            self.set_display("0.");
            self.state.awaiting_second_operand = false;
        } else if !self.state.display.contains('.') {
            let next = format!("{}.", self.state.display);
            self.set_display(&next);
        }
    }

    fn input_operator(&mut self, op: Operator) {
        let chained = match (&self.state.first_operand, self.state.pending_operator) {
            (Some(first), Some(pending)) if !self.state.awaiting_second_operand => {
                Some(evaluate(first, pending, &self.state.display))
            }
            _ => None,
        };

        match chained {
            Some(Ok(value)) => {
                self.state.display = format_number(value);
                self.state.first_operand = Some(js_number_string(value));
            }
            Some(Err(err)) => {
                self.fail(err);
                return;
            }
            None => self.state.first_operand = Some(self.state.display.clone()),
        }
        self.state.pending_operator = Some(op);
        self.state.awaiting_second_operand = true;
    }

    fn equals(&mut self) {
        let (Some(first), Some(op)) = (&self.state.first_operand, self.state.pending_operator)
        else {
            return;
        };
        match evaluate(first, op, &self.state.display) {
            Ok(value) => {
                self.state.display = format_number(value);
                self.state.first_operand = None;
                self.state.pending_operator = None;
                self.state.awaiting_second_operand = false;
            }
            Err(err) => self.fail(err),
        }
    }

    fn percent(&mut self) {
        match parse_operand(&self.state.display) {
            Ok(value) => {
                let value = value / 100.0;
                self.state.display = format_number(value);
                if self.state.awaiting_second_operand {
                    self.state.first_operand = Some(js_number_string(value));
                }
            }
            Err(err) => self.fail(err),
        }
    }

    fn negate(&mut self) {
        match parse_operand(&self.state.display) {
            Ok(value) => self.state.display = format_number(value * -1.0),
            Err(err) => self.fail(err),
        }
    }

    fn backspace(&mut self) {
        if self.state.display == "0" || self.state.awaiting_second_operand {
            return;
        }
        let mut next = self.state.display.clone();
        next.pop();
        if next.is_empty() || next == "-" {
            self.state.display = "0".to_string();
        } else {
            self.set_display(&next);
        }
    }

    fn set_display(&mut self, text: &str) {
        self.state.display = format_display(text);
    }

    fn fail(&mut self, err: CalcError) {
        debug!(error = %err, "calculation failed");
        self.state = CalculatorState {
            display: err.sentinel().to_string(),
            error: Some(err),
            ..CalculatorState::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ADD: Action = Action::Operator(Operator::Add);
    const SUB: Action = Action::Operator(Operator::Subtract);
    const MUL: Action = Action::Operator(Operator::Multiply);
    const DIV: Action = Action::Operator(Operator::Divide);

    fn digits(text: &str) -> Vec<Action> {
        text.chars()
            .map(|c| match c {
                '.' => Action::DecimalPoint,
                c => Action::Digit(c.to_digit(10).unwrap() as u8),
            })
            .collect()
    }

    fn run(actions: &[Action]) -> Calculator {
        let mut calc = Calculator::new();
        calc.apply_all(actions.iter().copied());
        calc
    }

    // ===== Idle =====

    #[test]
    fn test_new_is_idle() {
        let calc = Calculator::new();
        assert_eq!(calc.display(), "0");
        assert!(calc.state().is_idle());
        assert_eq!(calc.state().phase(), Phase::Idle);
    }

    // ===== Digits =====

    #[test]
    fn test_digit_replaces_leading_zero() {
        let calc = run(&digits("07"));
        assert_eq!(calc.display(), "7");
    }

    #[test]
    fn test_digits_append() {
        let calc = run(&digits("1234"));
        assert_eq!(calc.display(), "1234");
    }

    #[test]
    fn test_digits_capped_at_fifteen() {
        let calc = run(&digits("12345678901234567890"));
        assert_eq!(calc.display(), "123456789012345");
    }

    #[test]
    fn test_digit_after_operator_starts_fresh() {
        let calc = run(&[Action::Digit(8), ADD, Action::Digit(2)]);
        assert_eq!(calc.display(), "2");
        assert!(!calc.state().awaiting_second_operand());
        assert_eq!(calc.state().first_operand(), Some("8"));
    }

    #[test]
    fn test_digit_after_equals_appends() {
        let calc = run(&[Action::Digit(2), ADD, Action::Digit(3), Action::Equals, Action::Digit(1)]);
        assert_eq!(calc.display(), "51");
    }

    // ===== Decimal point =====

    #[test]
    fn test_decimal_from_zero() {
        let calc = run(&[Action::DecimalPoint, Action::Digit(5)]);
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn test_decimal_is_idempotent() {
        let mut calc = run(&digits("3."));
        let update = calc.apply(Action::DecimalPoint);
        assert_eq!(update.display, "3.");
        assert!(!update.changed);
    }

    #[test]
    fn test_decimal_while_awaiting() {
        let calc = run(&[Action::Digit(4), MUL, Action::DecimalPoint]);
        assert_eq!(calc.display(), "0.");
        assert!(!calc.state().awaiting_second_operand());
    }

    #[test]
    fn test_decimal_on_full_display_goes_exponential() {
        let calc = run(&digits("123456789012345."));
        assert_eq!(calc.display(), "1.23456789e+14");
    }

    // ===== Operators =====

    #[test]
    fn test_operator_captures_first_operand() {
        let calc = run(&[Action::Digit(9), SUB]);
        assert_eq!(
            calc.state().phase(),
            Phase::OperatorPending {
                first_operand: "9".into(),
                operator: Operator::Subtract,
                awaiting_second_operand: true,
            }
        );
        assert_eq!(calc.display(), "9");
    }

    #[test]
    fn test_chained_operator_evaluates() {
        let calc = run(&[Action::Digit(3), ADD, Action::Digit(4), ADD]);
        assert_eq!(calc.display(), "7");
        assert_eq!(calc.state().first_operand(), Some("7"));
        assert_eq!(calc.state().pending_operator(), Some(Operator::Add));
    }

    #[test]
    fn test_operator_switch_while_awaiting() {
        let calc = run(&[Action::Digit(6), ADD, MUL, Action::Digit(7), Action::Equals]);
        assert_eq!(calc.display(), "42");
    }

    #[test]
    fn test_left_associative_no_precedence() {
        let mut actions = vec![Action::Digit(2), ADD, Action::Digit(3), MUL, Action::Digit(4)];
        actions.push(Action::Equals);
        assert_eq!(run(&actions).display(), "20");
    }

    #[test]
    fn test_chained_result_keeps_full_precision() {
        let mut actions = digits(".1");
        actions.push(ADD);
        actions.extend(digits(".2"));
        actions.push(ADD);
        let calc = run(&actions);
        assert_eq!(calc.display(), "3.00000000e-1");
        assert_eq!(calc.state().first_operand(), Some("0.30000000000000004"));
    }

    #[test]
    fn test_zero_intermediate_still_chains() {
        let actions = [
            Action::Digit(5),
            SUB,
            Action::Digit(5),
            SUB,
            Action::Digit(3),
            Action::Equals,
        ];
        assert_eq!(run(&actions).display(), "-3");
    }

    // ===== Equals =====

    #[test]
    fn test_equals_resets_operation() {
        let calc = run(&[Action::Digit(9), DIV, Action::Digit(4), Action::Equals]);
        assert_eq!(calc.display(), "2.25");
        assert_eq!(calc.state().first_operand(), None);
        assert_eq!(calc.state().pending_operator(), None);
        assert!(!calc.state().awaiting_second_operand());
    }

    #[test]
    fn test_equals_without_operator_is_noop() {
        let mut calc = run(&digits("12"));
        let update = calc.apply(Action::Equals);
        assert_eq!(update.display, "12");
        assert!(!update.changed);
    }

    #[test]
    fn test_equals_reuses_display_when_awaiting() {
        let calc = run(&[Action::Digit(5), ADD, Action::Equals]);
        assert_eq!(calc.display(), "10");
    }

    // ===== Division by zero =====

    #[test]
    fn test_division_by_zero_shows_sentinel() {
        let calc = run(&[Action::Digit(5), DIV, Action::Digit(0), Action::Equals]);
        assert_eq!(calc.display(), "Error: Div by 0");
        assert_eq!(
            calc.state().phase(),
            Phase::Error {
                error: CalcError::DivisionByZero
            }
        );
    }

    #[test]
    fn test_chained_division_by_zero() {
        let calc = run(&[Action::Digit(5), DIV, Action::Digit(0), ADD]);
        assert_eq!(calc.display(), "Error: Div by 0");
        assert_eq!(calc.state().first_operand(), None);
        assert_eq!(calc.state().pending_operator(), None);
    }

    #[test]
    fn test_digit_after_error_starts_fresh() {
        let calc = run(&[Action::Digit(5), DIV, Action::Digit(0), Action::Equals, Action::Digit(7)]);
        assert_eq!(calc.display(), "7");
        assert_eq!(calc.state().error(), None);
    }

    #[test]
    fn test_decimal_after_error() {
        let calc = run(&[Action::Digit(1), DIV, Action::Digit(0), Action::Equals, Action::DecimalPoint]);
        assert_eq!(calc.display(), "0.");
    }

    #[test]
    fn test_operator_after_error_returns_to_idle() {
        let calc = run(&[Action::Digit(1), DIV, Action::Digit(0), Action::Equals, ADD]);
        assert!(calc.state().is_idle());
    }

    #[test]
    fn test_backspace_on_error_is_noop() {
        let mut calc = run(&[Action::Digit(1), DIV, Action::Digit(0), Action::Equals]);
        let update = calc.apply(Action::Backspace);
        assert_eq!(update.display, "Error: Div by 0");
        assert!(!update.changed);
    }

    #[test]
    fn test_overflow_shows_sentinel() {
        let mut calc = run(&[Action::Digit(9)]);
        for _ in 0..400 {
            calc.apply(MUL);
            if calc.state().error().is_some() {
                break;
            }
            calc.apply_all(digits("10"));
        }
        assert_eq!(calc.display(), "Error: Overflow");
        assert_eq!(calc.state().error(), Some(&CalcError::Overflow));
    }

    // ===== Clear =====

    #[test]
    fn test_clear_from_pending() {
        let mut calc = run(&[Action::Digit(3), ADD, Action::Digit(4)]);
        calc.apply(Action::Clear);
        assert!(calc.state().is_idle());
    }

    // ===== Percent =====

    #[test]
    fn test_percent() {
        let calc = run(&[Action::Digit(5), Action::Digit(0), Action::Percent]);
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn test_percent_while_awaiting_updates_operand() {
        let calc = run(&[Action::Digit(5), Action::Digit(0), ADD, Action::Percent]);
        assert_eq!(calc.display(), "0.5");
        assert_eq!(calc.state().first_operand(), Some("0.5"));
        assert!(calc.state().awaiting_second_operand());
    }

    #[test]
    fn test_percent_mid_entry_leaves_operand() {
        let calc = run(&[Action::Digit(8), ADD, Action::Digit(5), Action::Digit(0), Action::Percent]);
        assert_eq!(calc.display(), "0.5");
        assert_eq!(calc.state().first_operand(), Some("8"));
    }

    // ===== Negate =====

    #[test]
    fn test_negate() {
        let calc = run(&[Action::Digit(7), Action::Negate]);
        assert_eq!(calc.display(), "-7");
    }

    #[test]
    fn test_negate_zero_stays_zero() {
        let calc = run(&[Action::Negate]);
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_negate_keeps_other_state() {
        let calc = run(&[Action::Digit(7), ADD, Action::Negate]);
        assert_eq!(calc.display(), "-7");
        assert_eq!(calc.state().first_operand(), Some("7"));
        assert!(calc.state().awaiting_second_operand());
    }

    // ===== Backspace =====

    #[test]
    fn test_backspace_removes_last() {
        let calc = run(&[Action::Digit(1), Action::Digit(2), Action::Digit(3), Action::Backspace]);
        assert_eq!(calc.display(), "12");
    }

    #[test]
    fn test_backspace_to_zero() {
        let calc = run(&[Action::Digit(4), Action::Backspace]);
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_backspace_leaves_lone_minus_as_zero() {
        let calc = run(&[Action::Digit(4), Action::Negate, Action::Backspace]);
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_backspace_while_awaiting_is_noop() {
        let calc = run(&[Action::Digit(4), Action::Digit(2), ADD, Action::Backspace]);
        assert_eq!(calc.display(), "42");
    }

    #[test]
    fn test_backspace_on_zero_is_noop() {
        let mut calc = Calculator::new();
        assert!(!calc.apply(Action::Backspace).changed);
    }

    // ===== Serialization =====

    #[test]
    fn test_state_serializes() {
        let calc = run(&[Action::Digit(3), ADD]);
        let json = serde_json::to_value(calc.state()).unwrap();
        assert_eq!(json["display"], "3");
        assert_eq!(json["first_operand"], "3");
        assert_eq!(json["pending_operator"], "add");
        assert_eq!(json["awaiting_second_operand"], true);
        assert!(json.get("error").is_none());
    }

    // ===== Properties =====

    fn action_strategy() -> impl Strategy<Value = Action> {
        prop_oneof![
            (0u8..=9).prop_map(Action::Digit),
            Just(Action::DecimalPoint),
            Just(ADD),
            Just(SUB),
            Just(MUL),
            Just(DIV),
            Just(Action::Equals),
            Just(Action::Clear),
            Just(Action::Percent),
            Just(Action::Negate),
            Just(Action::Backspace),
        ]
    }

    proptest! {
        /// Typed digits concatenate, truncated at 15 characters
        #[test]
        fn prop_digit_sequence(first in 1u8..=9, rest in proptest::collection::vec(0u8..=9, 0..30)) {
            let mut calc = Calculator::new();
            let mut typed = first.to_string();
            calc.apply(Action::Digit(first));
            for d in rest {
                calc.apply(Action::Digit(d));
                typed.push(char::from(b'0' + d));
            }
            typed.truncate(MAX_INPUT_LEN);
            prop_assert_eq!(calc.display(), typed.as_str());
        }

        /// Clear returns to Idle from any reachable state
        #[test]
        fn prop_clear_returns_to_idle(actions in proptest::collection::vec(action_strategy(), 0..40)) {
            let mut calc = Calculator::new();
            calc.apply_all(actions);
            calc.apply(Action::Clear);
            prop_assert!(calc.state().is_idle());
        }

        /// An operator is never pending without a first operand
        #[test]
        fn prop_operator_implies_operand(actions in proptest::collection::vec(action_strategy(), 0..40)) {
            let mut calc = Calculator::new();
            for action in actions {
                calc.apply(action);
                let state = calc.state();
                prop_assert_eq!(state.pending_operator().is_some(), state.first_operand().is_some());
                if state.awaiting_second_operand() {
                    prop_assert!(state.pending_operator().is_some());
                }
                if matches!(action, Action::Digit(_) | Action::DecimalPoint) {
                    prop_assert!(!state.awaiting_second_operand());
                }
            }
        }

        /// The display is always a number, an exponential rendering or a sentinel
        #[test]
        fn prop_display_is_well_formed(actions in proptest::collection::vec(action_strategy(), 0..40)) {
            let mut calc = Calculator::new();
            calc.apply_all(actions);
            let display = calc.display();
            prop_assert!(
                CalcError::is_sentinel(display) || parse_operand(display).is_ok(),
                "bad display {:?}", display
            );
        }

        /// a + b + c = is (a + b) + c
        #[test]
        fn prop_chained_addition(a in 1u32..100_000, b in 1u32..100_000, c in 1u32..100_000) {
            let mut actions = digits(&a.to_string());
            actions.push(ADD);
            actions.extend(digits(&b.to_string()));
            actions.push(ADD);
            actions.extend(digits(&c.to_string()));
            actions.push(Action::Equals);
            let calc = run(&actions);
            let expected = u64::from(a) + u64::from(b) + u64::from(c);
            prop_assert_eq!(calc.display(), expected.to_string());
        }

        /// Backspace drops exactly one character
        #[test]
        fn prop_backspace(text in "[1-9][0-9]{0,8}(\\.[0-9]{0,4})?") {
            let mut calc = run(&digits(&text));
            prop_assume!(calc.display() == text);
            calc.apply(Action::Backspace);
            let mut expected = text.clone();
            expected.pop();
            if expected.is_empty() {
                expected = "0".into();
            }
            prop_assert_eq!(calc.display(), expected.as_str());
        }

        /// Negating twice restores the value
        #[test]
        fn prop_double_negate(text in "[1-9][0-9]{0,8}(\\.[0-9]{1,4})?") {
            let mut calc = run(&digits(&text));
            let original = parse_operand(calc.display()).unwrap();
            calc.apply(Action::Negate);
            calc.apply(Action::Negate);
            prop_assert_eq!(parse_operand(calc.display()).unwrap(), original);
        }
    }
}
