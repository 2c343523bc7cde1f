//! Property-based tests for the calculator engine
//!
//! Arbitrary key sequences must never panic and must always leave the
//! display showing either a number or an error sentinel.

use deskwidgets::calculator::number::{js_number_string, parse_float_prefix};
use deskwidgets::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Subtract),
        Just(Operator::Multiply),
        Just(Operator::Divide),
    ]
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0u8..=9).prop_map(Action::Digit),
        1 => Just(Action::DecimalPoint),
        2 => operator_strategy().prop_map(Action::Operator),
        1 => Just(Action::Equals),
        1 => Just(Action::Clear),
        1 => Just(Action::Percent),
        1 => Just(Action::Negate),
        1 => Just(Action::Backspace),
    ]
}

/// Key presses that type `n`
fn type_number(n: u32) -> Vec<Action> {
    n.to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| Action::Digit(d as u8))
        .collect()
}

fn run(actions: impl IntoIterator<Item = Action>) -> Calculator {
    let mut calc = Calculator::new();
    calc.apply_all(actions);
    calc
}

// ===== Engine invariants =====

proptest! {
    /// Display is a number or a sentinel, never empty
    #[test]
    fn prop_display_always_readable(actions in prop::collection::vec(action_strategy(), 0..60)) {
        let calc = run(actions);
        let display = calc.display();
        prop_assert!(!display.is_empty());
        if CalcError::is_sentinel(display) {
            prop_assert!(calc.state().error().is_some());
        } else {
            prop_assert!(parse_float_prefix(display).is_some(), "unreadable display {display:?}");
            prop_assert!(calc.state().error().is_none());
        }
    }

    /// AC always returns to the initial state
    #[test]
    fn prop_clear_resets(actions in prop::collection::vec(action_strategy(), 0..60)) {
        let mut calc = run(actions);
        calc.apply(Action::Clear);
        prop_assert!(calc.state().is_idle());
        prop_assert_eq!(calc.display(), "0");
    }

    /// A digit after any sequence that ended in an error starts a fresh number
    #[test]
    fn prop_digit_recovers_from_error(d in 1u8..=9, a in 0u32..1000) {
        let mut actions = type_number(a);
        actions.extend([Action::Operator(Operator::Divide), Action::Digit(0), Action::Equals]);
        let mut calc = run(actions);
        prop_assert_eq!(calc.display(), "Error: Div by 0");
        calc.apply(Action::Digit(d));
        prop_assert_eq!(calc.display(), d.to_string());
        prop_assert_eq!(calc.state().phase(), Phase::Idle);
    }

    /// Small integer arithmetic matches f64 arithmetic exactly
    #[test]
    fn prop_integer_arithmetic(a in 0u32..10_000, b in 1u32..10_000, op in operator_strategy()) {
        let mut actions = type_number(a);
        actions.push(Action::Operator(op));
        actions.extend(type_number(b));
        actions.push(Action::Equals);
        let calc = run(actions);

        let (x, y) = (f64::from(a), f64::from(b));
        let expected = match op {
            Operator::Add => x + y,
            Operator::Subtract => x - y,
            Operator::Multiply => x * y,
            Operator::Divide => x / y,
        };
        prop_assert_eq!(calc.display(), deskwidgets::calculator::number::format_number(expected));
    }

    /// Chained operators evaluate left to right with no precedence
    #[test]
    fn prop_chain_is_left_to_right(a in 1u32..100, b in 1u32..100, c in 1u32..100) {
        let mut actions = type_number(a);
        actions.push(Action::Operator(Operator::Add));
        actions.extend(type_number(b));
        actions.push(Action::Operator(Operator::Multiply));
        actions.extend(type_number(c));
        actions.push(Action::Equals);
        let calc = run(actions);
        prop_assert_eq!(calc.display(), js_number_string(f64::from((a + b) * c)));
    }

    /// Negate twice restores the display of a typed integer
    #[test]
    fn prop_double_negate(a in 1u32..1_000_000) {
        let mut actions = type_number(a);
        actions.extend([Action::Negate, Action::Negate]);
        let calc = run(actions);
        prop_assert_eq!(calc.display(), a.to_string());
    }

    /// Backspace undoes the last typed digit
    #[test]
    fn prop_backspace_undoes_digit(a in 1u32..100_000, d in 0u8..=9) {
        let mut actions = type_number(a);
        actions.extend([Action::Digit(d), Action::Backspace]);
        let calc = run(actions);
        prop_assert_eq!(calc.display(), a.to_string());
    }

    /// Typed input never grows past the input limit
    #[test]
    fn prop_input_is_bounded(digits in prop::collection::vec(1u8..=9, 0..40)) {
        let calc = run(digits.into_iter().map(Action::Digit));
        prop_assert!(calc.display().len() <= deskwidgets::calculator::MAX_INPUT_LEN);
    }
}

// ===== Keyboard and button translation =====

proptest! {
    /// Every keypad button maps back to its own action through the DOM attributes
    #[test]
    fn prop_button_round_trip(index in 0usize..20) {
        let keypad = Keypad::new();
        let button = &keypad.buttons()[index];
        let content = match button.action {
            Action::Digit(_) => button.label.as_str(),
            _ => "",
        };
        let action = Action::from_button(button.action.data_action(), content);
        prop_assert_eq!(action, Some(button.action));
    }

    /// Single-character keys outside the calculator alphabet are ignored
    #[test]
    fn prop_unmapped_keys_ignored(c in "[a-bd-wyzA-BD-Z!@#&()_]") {
        prop_assert_eq!(Keypad::key_to_action(&c), None);
    }
}
