//! Per-frame clock computation

use serde::Serialize;
use tracing::trace;

use super::{HandAngles, Trail, TrailDot, TrailStyle, WallTime};

/// Everything needed to draw one animation frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockFrame {
    /// Time the frame was computed for
    pub time: WallTime,
    /// Hand rotations
    pub angles: HandAngles,
    /// Trail dots, oldest first
    pub dots: Vec<TrailDot>,
}

/// Computes frames. The trail is the only state carried between ticks.
#[derive(Debug, Clone)]
pub struct ClockRenderer {
    trail: Trail,
    style: TrailStyle,
}

impl Default for ClockRenderer {
    fn default() -> Self {
        Self::new(TrailStyle::default())
    }
}

impl ClockRenderer {
    /// Creates a renderer with an empty trail sized by `style.length`
    #[must_use]
    pub fn new(style: TrailStyle) -> Self {
        Self {
            trail: Trail::new(style.length),
            style,
        }
    }

    /// Trail styling in use
    #[must_use]
    pub const fn style(&self) -> &TrailStyle {
        &self.style
    }

    /// Current trail
    #[must_use]
    pub const fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Computes the frame for `time` and records its second angle in the trail
    pub fn tick(&mut self, time: WallTime) -> ClockFrame {
        let angles = HandAngles::at(time);
        self.trail.push(angles.second);
        let dots = self.trail.dots(&self.style);
        trace!(%time, second = angles.second, dots = dots.len(), "clock tick");
        ClockFrame { time, angles, dots }
    }
}
