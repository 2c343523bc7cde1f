//! DOM adapters
//!
//! Thin translation layers between [`MockDom`](crate::dom::MockDom) events
//! and the pure widget cores. No arithmetic or clock math lives here.

mod calculator;
mod clock;

pub use calculator::{CalculatorView, DispatchOutcome, ACTIVE_KEY_CLASS, DEFAULT_HIGHLIGHT_MS};
pub use clock::ClockView;
