//! Analog clock renderer
//!
//! Everything here is presentational math over a [`WallTime`]: hand angles,
//! a fading second-hand trail, a zero-padded digital readout and the one-time
//! dial layout. Time comes from an injectable [`TimeSource`] and ticks from a
//! [`FrameSource`], so tests can drive fixed timestamps.

mod dial;
mod hands;
mod readout;
mod renderer;
mod schedule;
mod time;
mod trail;

pub use dial::{Dial, DialGeometry, Numeral, Tick};
pub use hands::HandAngles;
pub use readout::DigitalReadout;
pub use renderer::{ClockFrame, ClockRenderer};
pub use schedule::{
    CancelHandle, ClockLoop, ClockSink, FrameSource, IntervalTimer, LoopStats, ScriptedFrames,
    ThreadFrameSource,
};
pub use time::{FakeTimeSource, SystemTimeSource, TimeSource, WallTime};
pub use trail::{Trail, TrailDot, TrailStyle};

use thiserror::Error;

/// Errors that can occur with clock operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// A time component is out of range
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// Component name
        field: &'static str,
        /// Rejected value
        value: u32,
    },
    /// Text is not `HH:MM[:SS[.mmm]]`
    #[error("invalid time format: {0:?} (expected HH:MM[:SS[.mmm]])")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_error_display() {
        let err = ClockError::OutOfRange {
            field: "hour",
            value: 24,
        };
        assert_eq!(err.to_string(), "hour out of range: 24");
        assert!(ClockError::InvalidFormat("x".into())
            .to_string()
            .contains("HH:MM"));
    }
}
