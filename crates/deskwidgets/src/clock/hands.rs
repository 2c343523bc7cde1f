//! Hand angles

use serde::{Deserialize, Serialize};

use super::WallTime;

/// Rotation of the three hands, in degrees.
///
/// Zero points at 3 o'clock; every angle is offset by -90 so that a value of
/// -90 points at 12.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandAngles {
    /// Hour hand
    pub hour: f64,
    /// Minute hand
    pub minute: f64,
    /// Second hand
    pub second: f64,
}

impl HandAngles {
    /// Computes the hand angles for `time`
    #[must_use]
    pub fn at(time: WallTime) -> Self {
        let seconds = f64::from(time.second) + f64::from(time.millis) / 1000.0;
        let minutes = f64::from(time.minute) + seconds / 60.0;
        let hours = f64::from(time.hour % 12) + minutes / 60.0;
        Self {
            hour: hours * 30.0 - 90.0,
            minute: minutes * 6.0 - 90.0,
            second: seconds * 6.0 - 90.0,
        }
    }

    /// Same angles folded into `[0, 360)`
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            hour: self.hour.rem_euclid(360.0),
            minute: self.minute.rem_euclid(360.0),
            second: self.second.rem_euclid(360.0),
        }
    }
}
