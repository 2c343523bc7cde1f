//! Second-hand afterimage trail

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default number of retained trail points
pub const DEFAULT_TRAIL_LENGTH: usize = 10;

/// How trail dots are laid out and shaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailStyle {
    /// Retained points
    pub length: usize,
    /// Radius of the newest possible dot, in face pixels
    pub outer_radius: f64,
    /// Radius lost per step of age
    pub radius_step: f64,
    /// Opacity of the oldest dot
    pub min_opacity: f64,
    /// Dot diameter, in face pixels
    pub dot_size: f64,
    /// Dot color as RGB
    pub color: [u8; 3],
}

impl Default for TrailStyle {
    fn default() -> Self {
        Self {
            length: DEFAULT_TRAIL_LENGTH,
            outer_radius: 140.0,
            radius_step: 4.0,
            min_opacity: 0.1,
            dot_size: 4.0,
            color: [255, 0, 0],
        }
    }
}

impl TrailStyle {
    /// CSS color for a dot at `opacity`
    #[must_use]
    pub fn css_color(&self, opacity: f64) -> String {
        let [r, g, b] = self.color;
        format!("rgba({r}, {g}, {b}, {opacity})")
    }
}

/// One rendered trail point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailDot {
    /// Second-hand angle the point was recorded at, degrees
    pub angle: f64,
    /// Distance from the face center
    pub radius: f64,
    /// 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f64,
}

impl TrailDot {
    /// CSS transform placing the dot relative to the face center
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("rotate({}deg) translateX({}px)", self.angle, self.radius)
    }
}

/// Bounded FIFO of recent second-hand angles, oldest first
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<f64>,
    capacity: usize,
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_LENGTH)
    }
}

impl Trail {
    /// Creates an empty trail holding at most `capacity` points (minimum 1)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends an angle, evicting the oldest once full
    pub fn push(&mut self, angle: f64) {
        self.points.push_back(angle);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Retained points
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True before the first push
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum retained points
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained angles, oldest first
    pub fn angles(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().copied()
    }

    /// Drops all points
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Lays out every retained point.
    ///
    /// Index 0 is the oldest point: it sits closest to the center and is the
    /// faintest.
    #[must_use]
    pub fn dots(&self, style: &TrailStyle) -> Vec<TrailDot> {
        let cap = self.capacity as f64;
        self.points
            .iter()
            .enumerate()
            .map(|(idx, &angle)| {
                let idx = idx as f64;
                TrailDot {
                    angle,
                    radius: style.outer_radius - style.radius_step * (cap - idx),
                    opacity: style.min_opacity + (1.0 - style.min_opacity) * idx / cap,
                }
            })
            .collect()
    }
}
