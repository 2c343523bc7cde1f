//! Key scripts and terminal key translation
//!
//! A key script is plain text where every character is a key press and
//! `{Name}` is either a named key (`{Enter}`, `{Escape}`, `{Backspace}`) or a
//! button action clicked directly (`{negate}`, `{percentage}`, ...).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use deskwidgets::calculator::keypad::button_id;
use deskwidgets::calculator::Action;
use deskwidgets::dom::DomEvent;

use crate::error::{CliError, CliResult};

const NAMED_KEYS: [&str; 3] = ["Enter", "Escape", "Backspace"];

/// Parses a key script into DOM events
pub fn parse_script(script: &str) -> CliResult<Vec<DomEvent>> {
    let mut events = Vec::new();
    let mut chars = script.char_indices();

    while let Some((offset, c)) = chars.next() {
        if c != '{' {
            events.push(DomEvent::key_down(c.encode_utf8(&mut [0; 4])));
            continue;
        }

        let mut name = String::new();
        let mut closed = false;
        for (_, c) in chars.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }
            name.push(c);
        }
        if !closed {
            return Err(CliError::script(offset, "unclosed '{'"));
        }
        events.push(named_event(&name).ok_or_else(|| {
            CliError::script(offset, format!("unknown key or action {{{name}}}"))
        })?);
    }
    Ok(events)
}

fn named_event(name: &str) -> Option<DomEvent> {
    if NAMED_KEYS.contains(&name) {
        return Some(DomEvent::key_down(name));
    }
    // a non-digit label keeps from_button on the data-action path
    let action = Action::from_button(Some(name), "")?;
    Some(DomEvent::click(&button_id(action)))
}

/// What a terminal key press means to the interactive front-ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalKey {
    /// Leave the program
    Quit,
    /// Forward to the widget as a DOM event
    Event(DomEvent),
    /// Nothing to do
    Ignore,
}

/// Translates a crossterm key event
#[must_use]
pub fn translate(event: KeyEvent) -> TerminalKey {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c' | 'q') => TerminalKey::Quit,
            _ => TerminalKey::Ignore,
        };
    }

    let key = match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        // no keyboard key negates; borrow Tab for it
        KeyCode::Tab => return TerminalKey::Event(DomEvent::click(&button_id(Action::Negate))),
        _ => return TerminalKey::Ignore,
    };
    TerminalKey::Event(DomEvent::KeyDown {
        key,
        ctrl: false,
        shift: modifiers.contains(KeyModifiers::SHIFT),
    })
}
