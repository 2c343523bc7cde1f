//! Calculator page adapter

use tracing::{debug, trace};

use crate::calculator::{Action, Calculator, Keypad};
use crate::dom::{DomElement, DomEvent, MockDom};

/// Class applied to a button while it is highlighted
pub const ACTIVE_KEY_CLASS: &str = "active-key";

/// How long a key press highlights its button
pub const DEFAULT_HIGHLIGHT_MS: u64 = 100;

const DISPLAY_ID: &str = "display";
const KEYS_ID: &str = "keys";

/// What a dispatched event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Action applied, `None` when the event was ignored
    pub action: Option<Action>,
    /// Display text after the event
    pub display: String,
    /// Whether the browser default for the event should be suppressed
    pub prevent_default: bool,
}

/// Calculator bound to a mock DOM page
#[derive(Debug)]
pub struct CalculatorView {
    calculator: Calculator,
    keypad: Keypad,
    dom: MockDom,
    highlight_ms: u64,
    /// (button id, expiry in ms)
    highlights: Vec<(String, u64)>,
}

impl CalculatorView {
    /// Builds the display and keypad elements
    #[must_use]
    pub fn mount(highlight_ms: u64) -> Self {
        let keypad = Keypad::new();

        let buttons = keypad.buttons().iter().map(|def| {
            let button = DomElement::new("button")
                .with_id(&def.id)
                .with_text(&def.label)
                .with_attr("data-row", &def.row.to_string())
                .with_attr("data-col", &def.col.to_string());
            // digits carry their literal, everything else its action name
            match (def.action, def.action.data_action()) {
                (Action::Digit(d), _) => button.with_attr("data-key", &d.to_string()),
                (_, Some(name)) => button.with_attr("data-action", name),
                (_, None) => button,
            }
        });

        let mut dom = MockDom::new();
        dom.mount(
            DomElement::new("div")
                .with_id("calculator")
                .with_class("calculator")
                .with_children([
                    DomElement::new("div")
                        .with_id(DISPLAY_ID)
                        .with_class("calculator-screen")
                        .with_text("0"),
                    DomElement::new("div")
                        .with_id(KEYS_ID)
                        .with_class("calculator-keys")
                        .with_children(buttons),
                ]),
        );

        debug!(buttons = keypad.button_count(), "calculator mounted");
        Self {
            calculator: Calculator::new(),
            keypad,
            dom,
            highlight_ms,
            highlights: Vec::new(),
        }
    }

    /// The page
    #[must_use]
    pub const fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// The engine
    #[must_use]
    pub const fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// The keypad layout
    #[must_use]
    pub const fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Text currently in the display element
    #[must_use]
    pub fn display(&self) -> &str {
        self.dom.get_element_text(DISPLAY_ID).unwrap_or_default()
    }

    /// Ids of buttons currently highlighted
    pub fn highlighted(&self) -> impl Iterator<Item = &str> {
        self.highlights.iter().map(|(id, _)| id.as_str())
    }

    /// Handles one DOM event at time `now_ms`
    pub fn dispatch(&mut self, event: &DomEvent, now_ms: u64) -> DispatchOutcome {
        self.dom.record_event(event.clone());
        self.advance(now_ms);

        let (action, from_key) = match event {
            DomEvent::Click { element_id } => (self.button_action(element_id), false),
            DomEvent::KeyDown { key, ctrl, .. } => {
                // leave shortcuts such as Ctrl+C to the browser
                let action = if *ctrl { None } else { Keypad::key_to_action(key) };
                (action, true)
            }
        };

        let Some(action) = action else {
            trace!(?event, "ignored");
            return self.outcome(None, false);
        };

        let update = self.calculator.apply(action);
        self.dom.set_element_text(DISPLAY_ID, &update.display);
        if from_key {
            self.highlight(action, now_ms);
        }
        self.outcome(Some(action), from_key)
    }

    /// Removes highlights that have expired by `now_ms`
    pub fn advance(&mut self, now_ms: u64) {
        let dom = &mut self.dom;
        self.highlights.retain(|(id, expires)| {
            if *expires <= now_ms {
                dom.toggle_class(id, ACTIVE_KEY_CLASS, false);
                false
            } else {
                true
            }
        });
    }

    fn button_action(&self, element_id: &str) -> Option<Action> {
        let element = self.dom.get_element(element_id)?;
        if element.tag != "button" {
            return None;
        }
        Action::from_button(element.get_attr("data-action"), &element.text_content)
    }

    fn highlight(&mut self, action: Action, now_ms: u64) {
        let Some(button) = self.keypad.find_button_by_action(action) else {
            return;
        };
        let id = button.id.clone();
        self.dom.toggle_class(&id, ACTIVE_KEY_CLASS, true);
        let expires = now_ms + self.highlight_ms;
        // pressing again extends the existing highlight
        match self.highlights.iter_mut().find(|(h, _)| *h == id) {
            Some(entry) => entry.1 = expires,
            None => self.highlights.push((id, expires)),
        }
    }

    fn outcome(&self, action: Option<Action>, prevent_default: bool) -> DispatchOutcome {
        DispatchOutcome {
            action,
            display: self.display().to_string(),
            prevent_default,
        }
    }
}

impl Default for CalculatorView {
    fn default() -> Self {
        Self::mount(DEFAULT_HIGHLIGHT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Operator;

    fn click_all(view: &mut CalculatorView, ids: &[&str]) {
        for id in ids {
            view.dispatch(&DomEvent::click(id), 0);
        }
    }

    #[test]
    fn test_mount_builds_page() {
        let view = CalculatorView::default();
        let dom = view.dom();
        assert_eq!(view.display(), "0");
        assert_eq!(dom.get_element(KEYS_ID).unwrap().children.len(), 20);
        let five = dom.get_element("btn-5").unwrap();
        assert_eq!(five.get_attr("data-key"), Some("5"));
        assert_eq!(five.get_attr("data-action"), None);
        // the keypad container and the id lookup see the same button
        assert_eq!(dom.get_element(KEYS_ID).unwrap().children[9], *five);
        let eq = dom.get_element("btn-calculate").unwrap();
        assert_eq!(eq.get_attr("data-action"), Some("calculate"));
        assert_eq!(eq.text_content, "=");
    }

    #[test]
    fn test_clicks_drive_engine() {
        let mut view = CalculatorView::default();
        click_all(&mut view, &["btn-1", "btn-2", "btn-add", "btn-3", "btn-calculate"]);
        assert_eq!(view.display(), "15");
        assert_eq!(view.calculator().display(), "15");
    }

    #[test]
    fn test_click_outside_button_is_ignored() {
        let mut view = CalculatorView::default();
        let out = view.dispatch(&DomEvent::click(DISPLAY_ID), 0);
        assert_eq!(out.action, None);
        let out = view.dispatch(&DomEvent::click("nowhere"), 0);
        assert_eq!(out.action, None);
        assert!(!out.prevent_default);
        assert_eq!(view.dom().events().len(), 2);
    }

    #[test]
    fn test_key_press_prevents_default_and_highlights() {
        let mut view = CalculatorView::default();
        let out = view.dispatch(&DomEvent::key_down("7"), 1000);
        assert_eq!(out.action, Some(Action::Digit(7)));
        assert!(out.prevent_default);
        assert_eq!(out.display, "7");
        assert!(view.dom().get_element("btn-7").unwrap().has_class(ACTIVE_KEY_CLASS));

        view.advance(1099);
        assert!(view.dom().get_element("btn-7").unwrap().has_class(ACTIVE_KEY_CLASS));
        view.advance(1100);
        assert!(!view.dom().get_element("btn-7").unwrap().has_class(ACTIVE_KEY_CLASS));
        assert_eq!(view.highlighted().count(), 0);
    }

    #[test]
    fn test_backspace_key_highlights_backspace_button() {
        let mut view = CalculatorView::default();
        view.dispatch(&DomEvent::key_down("4"), 0);
        view.dispatch(&DomEvent::key_down("2"), 0);
        let out = view.dispatch(&DomEvent::key_down("Backspace"), 500);
        assert!(out.prevent_default);
        assert_eq!(out.display, "4");
        assert!(view.highlighted().any(|id| id == "btn-backspace"));
    }

    #[test]
    fn test_unknown_key_has_no_side_effect() {
        let mut view = CalculatorView::default();
        view.dispatch(&DomEvent::key_down("9"), 0);
        let out = view.dispatch(&DomEvent::key_down("Tab"), 500);
        assert_eq!(out.action, None);
        assert!(!out.prevent_default);
        assert_eq!(out.display, "9");
        assert_eq!(view.highlighted().count(), 0);
    }

    #[test]
    fn test_ctrl_shortcuts_pass_through() {
        let mut view = CalculatorView::default();
        view.dispatch(&DomEvent::key_down("5"), 0);
        let out = view.dispatch(&DomEvent::key_down_with_modifiers("c", true, false), 0);
        assert_eq!(out.action, None);
        assert_eq!(out.display, "5");
    }

    #[test]
    fn test_operator_key_highlights_operator_button() {
        let mut view = CalculatorView::default();
        let out = view.dispatch(&DomEvent::key_down("*"), 0);
        assert_eq!(out.action, Some(Action::Operator(Operator::Multiply)));
        assert!(view.dom().get_element("btn-multiply").unwrap().has_class(ACTIVE_KEY_CLASS));
    }

    #[test]
    fn test_repeat_press_extends_highlight() {
        let mut view = CalculatorView::mount(100);
        view.dispatch(&DomEvent::key_down("1"), 0);
        view.dispatch(&DomEvent::key_down("1"), 80);
        view.advance(150);
        assert!(view.dom().get_element("btn-1").unwrap().has_class(ACTIVE_KEY_CLASS));
        view.advance(180);
        assert!(!view.dom().get_element("btn-1").unwrap().has_class(ACTIVE_KEY_CLASS));
    }

    #[test]
    fn test_division_by_zero_shows_sentinel() {
        let mut view = CalculatorView::default();
        click_all(&mut view, &["btn-5", "btn-divide", "btn-0", "btn-calculate"]);
        assert_eq!(view.display(), "Error: Div by 0");
    }
}
