//! deskwidgets - a button calculator and a sweeping analog clock
//!
//! Both widgets are split into a pure core and a thin adapter:
//!
//! - [`calculator`] owns the arithmetic state machine. One entry point,
//!   [`Calculator::apply`](calculator::Calculator::apply), consumes a closed
//!   [`Action`](calculator::Action) vocabulary and returns the new display.
//! - [`clock`] computes hand angles, the fading second-hand trail, the digital
//!   readout and the dial layout from an injectable [`TimeSource`](clock::TimeSource),
//!   driven by a [`FrameSource`](clock::FrameSource) scheduler.
//! - [`dom`] and [`adapter`] wire both cores to an in-memory DOM so the event
//!   translation layer is testable without a browser.
//!
//! # Example
//!
//! ```rust
//! use deskwidgets::prelude::*;
//!
//! let mut calc = Calculator::new();
//! for action in [
//!     Action::Digit(3),
//!     Action::Operator(Operator::Add),
//!     Action::Digit(4),
//!     Action::Operator(Operator::Add),
//! ] {
//!     calc.apply(action);
//! }
//! // Chained evaluation: `3 + 4 +` already shows 7
//! assert_eq!(calc.display(), "7");
//!
//! let angles = HandAngles::at(WallTime::new(0, 0, 0, 0).unwrap());
//! assert_eq!(angles.second, -90.0);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod adapter;
pub mod calculator;
pub mod clock;
pub mod dom;

#[cfg(feature = "wasm")]
pub mod browser;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::adapter::{CalculatorView, ClockView, DispatchOutcome};
    pub use crate::calculator::{
        Action, ButtonDef, CalcError, CalcResult, Calculator, CalculatorState, DisplayUpdate,
        Keypad, Operator, Phase,
    };
    pub use crate::clock::{
        CancelHandle, ClockError, ClockFrame, ClockLoop, ClockRenderer, ClockSink, Dial,
        DialGeometry, DigitalReadout, FakeTimeSource, FrameSource, HandAngles, IntervalTimer,
        ScriptedFrames, SystemTimeSource, ThreadFrameSource, TimeSource, Trail, TrailDot,
        TrailStyle, WallTime,
    };
    pub use crate::dom::{DomElement, DomEvent, MockDom};
}
