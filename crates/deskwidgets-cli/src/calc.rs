//! `deskwidgets calc`

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use deskwidgets::adapter::{CalculatorView, DispatchOutcome};
use deskwidgets::dom::DomEvent;
use tracing::info;

use crate::commands::CalcArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::face::render_calculator;
use crate::keys::{parse_script, translate, TerminalKey};
use crate::output::Printer;
use crate::terminal::Session;

/// Simulated time between scripted key presses
const SCRIPT_STEP_MS: u64 = 50;

/// Runs the calc command
pub fn run(config: &CliConfig, args: &CalcArgs) -> CliResult<()> {
    match &args.keys {
        Some(script) => run_script(config, args, script),
        None => run_interactive(config),
    }
}

/// Dispatches `events` in order, one scripted step apart
pub fn play(view: &mut CalculatorView, events: &[DomEvent]) -> Vec<DispatchOutcome> {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| view.dispatch(event, i as u64 * SCRIPT_STEP_MS))
        .collect()
}

fn event_label(event: &DomEvent) -> String {
    match event {
        DomEvent::KeyDown { key, .. } => key.clone(),
        DomEvent::Click { element_id } => format!("#{element_id}"),
    }
}

fn run_script(config: &CliConfig, args: &CalcArgs, script: &str) -> CliResult<()> {
    let events = parse_script(script)?;
    let mut view = CalculatorView::mount(config.widgets.calculator.highlight_ms);
    let printer = Printer::new(config);
    let outcomes = play(&mut view, &events);
    info!(keys = events.len(), display = %view.display(), "script finished");

    if args.trace {
        for (i, (event, outcome)) in events.iter().zip(&outcomes).enumerate() {
            let mut label = event_label(event);
            if outcome.action.is_none() {
                label.push_str(" (ignored)");
            }
            printer.step(i + 1, &label, &outcome.display)?;
        }
    }

    if args.json {
        let state = serde_json::to_string_pretty(view.calculator().state())?;
        printer.result(&state)
    } else {
        printer.result(view.display())
    }
}

fn run_interactive(config: &CliConfig) -> CliResult<()> {
    let mut view = CalculatorView::mount(config.widgets.calculator.highlight_ms);
    let mut session = Session::enter()?;
    let start = Instant::now();
    let help = [
        String::new(),
        "digits . + - * / = %   Enter =   Esc AC   Backspace   Tab ±".to_string(),
        "Ctrl+C / Ctrl+Q quit".to_string(),
    ];

    loop {
        let mut screen = render_calculator(&view);
        screen.extend(help.iter().cloned());
        session.draw(&screen)?;

        let now_ms = start.elapsed().as_millis() as u64;
        if event::poll(Duration::from_millis(25))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match translate(key) {
                    TerminalKey::Quit => break,
                    TerminalKey::Event(dom_event) => {
                        view.dispatch(&dom_event, now_ms);
                    }
                    TerminalKey::Ignore => {}
                }
            }
        }
        view.advance(start.elapsed().as_millis() as u64);
    }

    drop(session);
    info!(display = %view.display(), "calculator closed");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn run_keys(script: &str) -> (CalculatorView, Vec<DispatchOutcome>) {
        let mut view = CalculatorView::default();
        let events = parse_script(script).unwrap();
        let outcomes = play(&mut view, &events);
        (view, outcomes)
    }

    #[test]
    fn test_chained_script() {
        let (view, outcomes) = run_keys("3+4+5=");
        assert_eq!(view.display(), "12");
        assert_eq!(outcomes[3].display, "7");
    }

    #[test]
    fn test_named_keys_in_script() {
        let (view, _) = run_keys("12{Backspace}{negate}");
        assert_eq!(view.display(), "-1");
        let (view, _) = run_keys("99{Escape}");
        assert_eq!(view.display(), "0");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let (view, outcomes) = run_keys("7 a8");
        assert_eq!(view.display(), "78");
        assert!(outcomes[1].action.is_none());
        assert!(outcomes[2].action.is_none());
    }

    #[test]
    fn test_division_by_zero_script() {
        let (view, _) = run_keys("5/0=");
        assert_eq!(view.display(), "Error: Div by 0");
        assert!(view.calculator().state().error().is_some());
    }

    #[test]
    fn test_event_label() {
        assert_eq!(event_label(&DomEvent::key_down("Enter")), "Enter");
        assert_eq!(event_label(&DomEvent::click("btn-negate")), "#btn-negate");
    }
}
