//! Frame and interval scheduling
//!
//! Two independent cadences drive the clock: the animation frame (hands and
//! trail) and a fixed interval (digital readout). They share a monotonic
//! millisecond timeline supplied by a [`FrameSource`] but are never aligned.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, trace};

use super::{ClockFrame, ClockRenderer, DigitalReadout, TimeSource, TrailStyle};

/// Default animation frame period (about 60 frames per second)
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Default readout period
pub const DEFAULT_READOUT_INTERVAL_MS: u64 = 1000;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Creates a handle that is not cancelled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops every source sharing this handle
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// True once [`CancelHandle::cancel`] has been called
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Supplies animation frame timestamps
pub trait FrameSource {
    /// Waits for the next frame and returns its monotonic timestamp in
    /// milliseconds, or `None` once the source is finished or cancelled
    fn next_frame(&mut self) -> Option<u64>;
}

/// Fixed-period timer polled against a monotonic timeline
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period_ms: u64,
    next_due: Option<u64>,
}

impl IntervalTimer {
    /// Creates a timer firing every `period_ms` (minimum 1)
    #[must_use]
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            next_due: None,
        }
    }

    /// Period in milliseconds
    #[must_use]
    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Returns true when the timer is due at `now_ms`.
    ///
    /// The first poll always fires. Missed periods collapse into one firing.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.next_due {
            Some(due) if now_ms < due => false,
            Some(due) => {
                let missed = (now_ms - due) / self.period_ms;
                self.next_due = Some(due + (missed + 1) * self.period_ms);
                true
            }
            None => {
                self.next_due = Some(now_ms + self.period_ms);
                true
            }
        }
    }

    /// Forgets the schedule; the next poll fires
    pub fn reset(&mut self) {
        self.next_due = None;
    }
}

/// Real-time frame source that sleeps between frames
#[derive(Debug)]
pub struct ThreadFrameSource {
    interval: Duration,
    start: Instant,
    emitted: u64,
    limit: Option<u64>,
    cancel: CancelHandle,
}

impl ThreadFrameSource {
    /// Creates a source producing a frame every `interval_ms`
    #[must_use]
    pub fn new(interval_ms: u64, cancel: CancelHandle) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms.max(1)),
            start: Instant::now(),
            emitted: 0,
            limit: None,
            cancel,
        }
    }

    /// Stops after `frames` frames
    #[must_use]
    pub const fn with_limit(mut self, frames: u64) -> Self {
        self.limit = Some(frames);
        self
    }

    /// Frames produced so far
    #[must_use]
    pub const fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl FrameSource for ThreadFrameSource {
    fn next_frame(&mut self) -> Option<u64> {
        if self.cancel.is_cancelled() || self.limit.is_some_and(|l| self.emitted >= l) {
            return None;
        }
        if self.emitted > 0 {
            let deadline = self.interval * u32::try_from(self.emitted).unwrap_or(u32::MAX);
            let elapsed = self.start.elapsed();
            if deadline > elapsed {
                std::thread::sleep(deadline - elapsed);
            }
            // cancelled while sleeping
            if self.cancel.is_cancelled() {
                return None;
            }
        }
        self.emitted += 1;
        Some(self.start.elapsed().as_millis() as u64)
    }
}

/// Replays a fixed list of timestamps
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrames {
    frames: VecDeque<u64>,
    cancel: CancelHandle,
}

impl ScriptedFrames {
    /// Replays `frames` in order
    pub fn new(frames: impl IntoIterator<Item = u64>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            cancel: CancelHandle::new(),
        }
    }

    /// `count` frames spaced `interval_ms` apart, starting at 0
    #[must_use]
    pub fn every(interval_ms: u64, count: usize) -> Self {
        Self::new((0..count as u64).map(|i| i * interval_ms))
    }

    /// Handle that ends the replay early
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

impl FrameSource for ScriptedFrames {
    fn next_frame(&mut self) -> Option<u64> {
        if self.cancel.is_cancelled() {
            return None;
        }
        self.frames.pop_front()
    }
}

/// Receives clock output
pub trait ClockSink {
    /// Called on every animation frame
    fn on_frame(&mut self, frame: &ClockFrame);

    /// Called when the readout interval fires
    fn on_readout(&mut self, readout: &DigitalReadout);
}

/// Counts of what a loop has produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoopStats {
    /// Frames rendered
    pub frames: u64,
    /// Readouts emitted
    pub readouts: u64,
}

/// Drives a [`ClockRenderer`] from a time source and a frame source
#[derive(Debug)]
pub struct ClockLoop<T> {
    time: T,
    renderer: ClockRenderer,
    readout_timer: IntervalTimer,
    stats: LoopStats,
}

impl<T: TimeSource> ClockLoop<T> {
    /// Creates a loop reading `time`, emitting readouts every `readout_interval_ms`
    pub fn new(time: T, style: TrailStyle, readout_interval_ms: u64) -> Self {
        Self {
            time,
            renderer: ClockRenderer::new(style),
            readout_timer: IntervalTimer::new(readout_interval_ms),
            stats: LoopStats::default(),
        }
    }

    /// Renderer state
    #[must_use]
    pub const fn renderer(&self) -> &ClockRenderer {
        &self.renderer
    }

    /// What has been produced so far
    #[must_use]
    pub const fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Handles one frame at monotonic time `now_ms`
    pub fn step(&mut self, now_ms: u64, sink: &mut impl ClockSink) {
        let time = self.time.now();
        let frame = self.renderer.tick(time);
        sink.on_frame(&frame);
        self.stats.frames += 1;

        if self.readout_timer.poll(now_ms) {
            let readout = DigitalReadout::at(time);
            trace!(%readout, "readout");
            sink.on_readout(&readout);
            self.stats.readouts += 1;
        }
    }

    /// Runs until `frames` is exhausted or cancelled
    pub fn run(&mut self, frames: &mut impl FrameSource, sink: &mut impl ClockSink) -> LoopStats {
        while let Some(now_ms) = frames.next_frame() {
            self.step(now_ms, sink);
        }
        debug!(
            frames = self.stats.frames,
            readouts = self.stats.readouts,
            "clock loop finished"
        );
        self.stats
    }
}
