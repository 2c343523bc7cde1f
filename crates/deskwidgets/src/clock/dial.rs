//! Dial layout: tick marks and numerals, built once

use serde::{Deserialize, Serialize};

/// Fixed geometry of the clock face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialGeometry {
    /// Face center (both axes), in face pixels
    pub center: f64,
    /// Radius the numerals sit on
    pub numeral_radius: f64,
    /// Number of tick marks around the face
    pub ticks: usize,
    /// Every n-th tick is major
    pub major_every: usize,
}

impl Default for DialGeometry {
    fn default() -> Self {
        Self {
            center: 150.0,
            numeral_radius: 120.0,
            ticks: 60,
            major_every: 5,
        }
    }
}

/// A tick mark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Position 0..ticks, clockwise from 12
    pub index: usize,
    /// Rotation in degrees
    pub rotation: f64,
    /// Hour marks are major
    pub major: bool,
}

/// An hour numeral
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Numeral {
    /// 1..=12
    pub value: u8,
    /// Horizontal position of the label center
    pub x: f64,
    /// Vertical position of the label center (grows downward)
    pub y: f64,
}

/// The static dial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dial {
    /// Tick marks, in index order
    pub ticks: Vec<Tick>,
    /// Numerals 1..=12
    pub numerals: Vec<Numeral>,
}

impl Dial {
    /// Lays out ticks and numerals for `geometry`
    #[must_use]
    pub fn build(geometry: &DialGeometry) -> Self {
        let step = if geometry.ticks == 0 {
            0.0
        } else {
            360.0 / geometry.ticks as f64
        };
        let major_every = geometry.major_every.max(1);
        let ticks = (0..geometry.ticks)
            .map(|index| Tick {
                index,
                rotation: index as f64 * step,
                major: index % major_every == 0,
            })
            .collect();

        // "12" at -90 degrees, i.e. straight up
        let numerals = (1..=12u8)
            .map(|value| {
                let angle = (f64::from(value) * 30.0 - 90.0).to_radians();
                Numeral {
                    value,
                    x: geometry.center + geometry.numeral_radius * angle.cos(),
                    y: geometry.center + geometry.numeral_radius * angle.sin(),
                }
            })
            .collect();

        Self { ticks, numerals }
    }
}
