//! Digital readout

use serde::{Deserialize, Serialize};

use super::WallTime;

/// Zero-padded 24-hour `HH`, `MM`, `SS` fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalReadout {
    /// Two-digit hours
    pub hours: String,
    /// Two-digit minutes
    pub minutes: String,
    /// Two-digit seconds
    pub seconds: String,
}

impl DigitalReadout {
    /// Formats `time`
    #[must_use]
    pub fn at(time: WallTime) -> Self {
        Self {
            hours: format!("{:02}", time.hour),
            minutes: format!("{:02}", time.minute),
            seconds: format!("{:02}", time.second),
        }
    }
}

impl std::fmt::Display for DigitalReadout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}
