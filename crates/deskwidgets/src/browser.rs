//! Browser WASM bindings
//!
//! The page keeps ownership of the real DOM and its event listeners; these
//! types only translate what the listeners see into engine calls and hand
//! back what to render.

use wasm_bindgen::prelude::*;

use crate::calculator::{Action, Calculator, Keypad};
use crate::clock::{ClockRenderer, DigitalReadout, TrailStyle, WallTime};

fn install_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Calculator engine exposed to JavaScript
#[derive(Debug, Default)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    calculator: Calculator,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Create a new browser calculator
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        install_panic_hook();
        Self::default()
    }

    /// Current display text
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.calculator.display().to_string()
    }

    /// Handles a button click from its `data-action` and text content.
    ///
    /// Returns the new display text, or `None` if the button is unknown.
    pub fn press(&mut self, data_action: Option<String>, content: &str) -> Option<String> {
        let action = Action::from_button(data_action.as_deref(), content)?;
        Some(self.calculator.apply(action).display)
    }

    /// Handles a `keydown` key. Returns the new display text when the key was
    /// consumed; the caller should then call `preventDefault`.
    pub fn key(&mut self, key: &str) -> Option<String> {
        let action = Keypad::key_to_action(key)?;
        Some(self.calculator.apply(action).display)
    }

    /// Id of the button to highlight for `key`
    #[wasm_bindgen(js_name = buttonForKey)]
    pub fn button_for_key(&self, key: &str) -> Option<String> {
        let action = Keypad::key_to_action(key)?;
        Some(crate::calculator::keypad::button_id(action))
    }

    /// Returns to the initial state
    pub fn clear(&mut self) -> String {
        self.calculator.reset();
        self.display()
    }
}

/// Clock renderer exposed to JavaScript
#[derive(Debug, Default)]
#[wasm_bindgen]
pub struct BrowserClock {
    renderer: ClockRenderer,
}

#[wasm_bindgen]
impl BrowserClock {
    /// Create a clock with a trail of `trail_length` dots
    #[wasm_bindgen(constructor)]
    pub fn new(trail_length: Option<usize>) -> Self {
        install_panic_hook();
        let style = TrailStyle {
            length: trail_length.unwrap_or(TrailStyle::default().length),
            ..TrailStyle::default()
        };
        Self {
            renderer: ClockRenderer::new(style),
        }
    }

    /// Computes the frame for the current local time.
    ///
    /// Layout: `[hour, minute, second, angle0, radius0, opacity0, ...]`, trail
    /// dots oldest first.
    pub fn frame(&mut self) -> Vec<f64> {
        let frame = self.renderer.tick(now());
        let mut out = Vec::with_capacity(3 + frame.dots.len() * 3);
        out.extend([frame.angles.hour, frame.angles.minute, frame.angles.second]);
        for dot in &frame.dots {
            out.extend([dot.angle, dot.radius, dot.opacity]);
        }
        out
    }

    /// Current local time as `HH:MM:SS`
    pub fn readout(&self) -> String {
        DigitalReadout::at(now()).to_string()
    }
}

fn now() -> WallTime {
    let date = js_sys::Date::new_0();
    let ms = u64::from(date.get_hours()) * 3_600_000
        + u64::from(date.get_minutes()) * 60_000
        + u64::from(date.get_seconds()) * 1000
        + u64::from(date.get_milliseconds());
    WallTime::from_millis_of_day(ms)
}
