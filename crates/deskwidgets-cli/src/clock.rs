//! `deskwidgets clock`

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use deskwidgets::clock::{
    CancelHandle, ClockFrame, ClockLoop, ClockSink, DialGeometry, DigitalReadout, FakeTimeSource,
    FrameSource, SystemTimeSource, ThreadFrameSource, TimeSource, TrailStyle, WallTime,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::commands::ClockArgs;
use crate::config::{CliConfig, ClockSettings};
use crate::error::{CliError, CliResult};
use crate::face::render_face;
use crate::keys::{translate, TerminalKey};
use crate::output::Printer;
use crate::terminal::Session;

/// One JSON line of `clock --json`
#[derive(Debug, Serialize)]
struct FrameRecord<'a> {
    frame: &'a ClockFrame,
    #[serde(skip_serializing_if = "Option::is_none")]
    readout: Option<&'a DigitalReadout>,
}

/// Where frames go. `readout` is set only on the step the readout fired.
trait FaceOutput {
    fn emit(&mut self, frame: &ClockFrame, readout: Option<&DigitalReadout>) -> CliResult<()>;
}

/// Buffers each frame until its step is over, so it goes out together with
/// a readout fired on the same step
struct FaceSink<'a, O> {
    output: &'a mut O,
    pending: Option<ClockFrame>,
    readout: Option<DigitalReadout>,
    error: Option<CliError>,
    cancel: CancelHandle,
}

impl<O: FaceOutput> ClockSink for FaceSink<'_, O> {
    fn on_frame(&mut self, frame: &ClockFrame) {
        self.pending = Some(frame.clone());
    }

    fn on_readout(&mut self, readout: &DigitalReadout) {
        self.readout = Some(readout.clone());
    }
}

impl<O: FaceOutput> FaceSink<'_, O> {
    fn flush(&mut self) {
        let Some(frame) = self.pending.take() else {
            return;
        };
        if self.error.is_some() {
            return;
        }
        let readout = self.readout.take();
        if let Err(e) = self.output.emit(&frame, readout.as_ref()) {
            warn!(error = %e, "output failed, stopping clock");
            self.error = Some(e);
            self.cancel.cancel();
        }
    }
}

/// Runs the clock command
pub fn run(config: &CliConfig, args: &ClockArgs) -> CliResult<()> {
    let settings = &config.widgets.clock;
    let style = TrailStyle {
        length: settings.trail_length,
        ..TrailStyle::default()
    };
    let frames = if args.once { Some(1) } else { args.frames };
    if frames == Some(0) {
        return Err(CliError::invalid_argument("--frames must be at least 1"));
    }

    let time: Arc<dyn TimeSource + Send + Sync> = match &args.at {
        Some(text) => {
            let start = WallTime::parse(text)?;
            debug!(%start, "pinned start time");
            if args.once {
                Arc::new(FakeTimeSource::fixed(start))
            } else {
                Arc::new(FakeTimeSource::running_from(start))
            }
        }
        None => Arc::new(SystemTimeSource),
    };

    let printer = Printer::new(config);
    if args.json {
        let mut output = JsonOutput { printer: &printer };
        drive(settings, style, time, frames.or(Some(1)), &mut output, None)
    } else if args.once {
        let mut output = PlainOutput {
            printer: &printer,
            rows: settings.face_size,
            last: None,
        };
        drive(settings, style, time, frames, &mut output, None)
    } else {
        let cancel = CancelHandle::new();
        let mut output = ScreenOutput {
            session: Session::enter()?,
            rows: settings.face_size,
            last: None,
        };
        let keys = spawn_key_watcher(cancel.clone());
        let result = drive(settings, style, time, frames, &mut output, Some(cancel.clone()));
        cancel.cancel();
        drop(output);
        let _ = keys.join();
        result
    }
}

fn drive<O: FaceOutput>(
    settings: &ClockSettings,
    style: TrailStyle,
    time: Arc<dyn TimeSource + Send + Sync>,
    frames: Option<u64>,
    output: &mut O,
    cancel: Option<CancelHandle>,
) -> CliResult<()> {
    let cancel = cancel.unwrap_or_default();
    let mut source = ThreadFrameSource::new(settings.frame_interval_ms, cancel.clone());
    if let Some(limit) = frames {
        source = source.with_limit(limit);
    }

    let mut clock = ClockLoop::new(time, style, settings.readout_interval_ms);
    let mut sink = FaceSink {
        output,
        pending: None,
        readout: None,
        error: None,
        cancel,
    };

    while let Some(now_ms) = source.next_frame() {
        clock.step(now_ms, &mut sink);
        sink.flush();
    }

    let stats = clock.stats();
    info!(frames = stats.frames, readouts = stats.readouts, "clock stopped");
    sink.error.map_or(Ok(()), Err)
}

fn spawn_key_watcher(cancel: CancelHandle) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        while !cancel.is_cancelled() {
            match event::poll(Duration::from_millis(50)) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(_) => break,
            }
            let Ok(Event::Key(key)) = event::read() else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                || translate(key) == TerminalKey::Quit;
            if quit {
                cancel.cancel();
            }
        }
    })
}

struct JsonOutput<'a> {
    printer: &'a Printer,
}

impl FaceOutput for JsonOutput<'_> {
    fn emit(&mut self, frame: &ClockFrame, readout: Option<&DigitalReadout>) -> CliResult<()> {
        let line = serde_json::to_string(&FrameRecord { frame, readout })?;
        self.printer.lines(&[line])
    }
}

/// Keeps showing the latest readout between firings
fn hold(last: &mut Option<DigitalReadout>, fresh: Option<&DigitalReadout>) {
    if let Some(readout) = fresh {
        *last = Some(readout.clone());
    }
}

struct PlainOutput<'a> {
    printer: &'a Printer,
    rows: usize,
    last: Option<DigitalReadout>,
}

impl FaceOutput for PlainOutput<'_> {
    fn emit(&mut self, frame: &ClockFrame, readout: Option<&DigitalReadout>) -> CliResult<()> {
        hold(&mut self.last, readout);
        let lines = render_face(frame, self.last.as_ref(), self.rows, &DialGeometry::default());
        self.printer.lines(&lines)
    }
}

struct ScreenOutput {
    session: Session,
    rows: usize,
    last: Option<DigitalReadout>,
}

impl FaceOutput for ScreenOutput {
    fn emit(&mut self, frame: &ClockFrame, readout: Option<&DigitalReadout>) -> CliResult<()> {
        hold(&mut self.last, readout);
        let mut lines = render_face(
            frame,
            self.last.as_ref(),
            self.rows,
            &DialGeometry::default(),
        );
        lines.push(String::new());
        lines.push("q / Esc / Ctrl+C quit".to_string());
        self.session.draw(&lines)
    }
}
