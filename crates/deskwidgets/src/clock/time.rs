//! Wall-clock time and injectable time sources

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use super::ClockError;

const MS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Local time of day, millisecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WallTime {
    /// Hour, 0-23
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
    /// Second, 0-59
    pub second: u8,
    /// Millisecond, 0-999
    pub millis: u16,
}

impl WallTime {
    /// Midnight
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
        millis: 0,
    };

    /// Creates a validated time of day
    pub fn new(hour: u8, minute: u8, second: u8, millis: u16) -> Result<Self, ClockError> {
        check("hour", u32::from(hour), 23)?;
        check("minute", u32::from(minute), 59)?;
        check("second", u32::from(second), 59)?;
        check("millis", u32::from(millis), 999)?;
        Ok(Self {
            hour,
            minute,
            second,
            millis,
        })
    }

    /// Builds a time from milliseconds since midnight, wrapping at 24h
    #[must_use]
    pub const fn from_millis_of_day(ms: u64) -> Self {
        let ms = ms % MS_PER_DAY;
        Self {
            hour: (ms / 3_600_000) as u8,
            minute: (ms / 60_000 % 60) as u8,
            second: (ms / 1000 % 60) as u8,
            millis: (ms % 1000) as u16,
        }
    }

    /// Milliseconds since midnight
    #[must_use]
    pub const fn millis_of_day(&self) -> u64 {
        self.hour as u64 * 3_600_000
            + self.minute as u64 * 60_000
            + self.second as u64 * 1000
            + self.millis as u64
    }

    /// Parses `HH:MM`, `HH:MM:SS` or `HH:MM:SS.mmm`
    pub fn parse(text: &str) -> Result<Self, ClockError> {
        let invalid = || ClockError::InvalidFormat(text.to_string());
        let (clock, millis) = match text.split_once('.') {
            Some((clock, frac)) => {
                if frac.is_empty() || frac.len() > 3 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                // ".5" is half a second
                let padded = format!("{frac:0<3}");
                (clock, padded.parse::<u16>().map_err(|_| invalid())?)
            }
            None => (text, 0),
        };

        let mut parts = clock.split(':');
        let mut field = || -> Result<Option<u8>, ClockError> {
            parts
                .next()
                .map(|p| {
                    if p.is_empty() || p.len() > 2 {
                        return Err(invalid());
                    }
                    p.parse::<u8>().map_err(|_| invalid())
                })
                .transpose()
        };
        let hour = field()?.ok_or_else(invalid)?;
        let minute = field()?.ok_or_else(invalid)?;
        let second = field()?.unwrap_or(0);
        if field()?.is_some() {
            return Err(invalid());
        }
        Self::new(hour, minute, second, millis)
    }
}

impl std::fmt::Display for WallTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hour, self.minute, self.second, self.millis
        )
    }
}

fn check(field: &'static str, value: u32, max: u32) -> Result<(), ClockError> {
    if value > max {
        Err(ClockError::OutOfRange { field, value })
    } else {
        Ok(())
    }
}

/// Provides the current time of day
pub trait TimeSource {
    /// Current local time of day
    fn now(&self) -> WallTime;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> WallTime {
        (**self).now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> WallTime {
        (**self).now()
    }
}

/// Local system time via `chrono`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> WallTime {
        let now = chrono::Local::now();
        WallTime {
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
            // leap seconds report 1000..=1999
            millis: (now.timestamp_subsec_millis().min(999)) as u16,
        }
    }
}

/// Fake time source for deterministic tests.
///
/// Starts paused at the given time. When running, it advances with real
/// elapsed time from the moment it was resumed.
#[derive(Debug)]
pub struct FakeTimeSource {
    /// Fake milliseconds since midnight at `anchor`
    current_ms: AtomicU64,
    paused: AtomicBool,
    anchor: std::sync::Mutex<Instant>,
}

impl FakeTimeSource {
    /// Creates a paused source fixed at `time`
    #[must_use]
    pub fn fixed(time: WallTime) -> Self {
        Self {
            current_ms: AtomicU64::new(time.millis_of_day()),
            paused: AtomicBool::new(true),
            anchor: std::sync::Mutex::new(Instant::now()),
        }
    }

    /// Creates a source that starts at `time` and keeps running
    #[must_use]
    pub fn running_from(time: WallTime) -> Self {
        let source = Self::fixed(time);
        source.resume();
        source
    }

    /// Jumps to `time`
    pub fn set(&self, time: WallTime) {
        self.current_ms.store(time.millis_of_day(), Ordering::SeqCst);
        self.reanchor();
    }

    /// Moves the clock forward by `ms`, wrapping at midnight
    pub fn advance(&self, ms: u64) {
        let now = self.elapsed_ms();
        self.current_ms
            .store((now + ms) % MS_PER_DAY, Ordering::SeqCst);
        self.reanchor();
    }

    /// Freezes the clock at its current time
    pub fn pause(&self) {
        let now = self.elapsed_ms();
        self.current_ms.store(now, Ordering::SeqCst);
        self.paused.store(true, Ordering::SeqCst);
    }

    /// Lets the clock follow real elapsed time again
    pub fn resume(&self) {
        self.reanchor();
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Check if clock is paused
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn reanchor(&self) {
        if let Ok(mut anchor) = self.anchor.lock() {
            *anchor = Instant::now();
        }
    }

    fn elapsed_ms(&self) -> u64 {
        let base = self.current_ms.load(Ordering::SeqCst);
        if self.is_paused() {
            return base;
        }
        let real = self
            .anchor
            .lock()
            .map(|anchor| anchor.elapsed().as_millis() as u64)
            .unwrap_or(0);
        (base + real) % MS_PER_DAY
    }
}

impl TimeSource for FakeTimeSource {
    fn now(&self) -> WallTime {
        WallTime::from_millis_of_day(self.elapsed_ms())
    }
}
