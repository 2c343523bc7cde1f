//! Clock page adapter

use tracing::debug;

use crate::clock::{ClockFrame, ClockSink, Dial, DialGeometry, DigitalReadout, TrailStyle};
use crate::dom::{DomElement, MockDom};

const HAND_IDS: [&str; 3] = ["hour-hand", "minute-hand", "second-hand"];
const TRAIL_ID: &str = "trail";
const TICKS_ID: &str = "ticks";
const NUMBERS_ID: &str = "numbers";
const READOUT_IDS: [&str; 3] = ["hours", "minutes", "seconds"];

/// Clock face bound to a mock DOM page
#[derive(Debug)]
pub struct ClockView {
    dom: MockDom,
    style: TrailStyle,
}

impl ClockView {
    /// Builds the dial, hands, trail container and readout once
    #[must_use]
    pub fn mount(geometry: &DialGeometry, style: TrailStyle) -> Self {
        let dial = Dial::build(geometry);

        let ticks = dial.ticks.iter().map(|tick| {
            let mut el = DomElement::new("div")
                .with_class("tick")
                .with_style("transform", &format!("rotate({}deg)", tick.rotation));
            el.toggle_class("big", tick.major);
            el
        });
        let numerals = dial.numerals.iter().map(|numeral| {
            DomElement::new("div")
                .with_class("number")
                .with_text(&numeral.value.to_string())
                .with_style("left", &format!("{}px", numeral.x))
                .with_style("top", &format!("{}px", numeral.y))
        });
        let hands = HAND_IDS.iter().map(|id| {
            DomElement::new("div")
                .with_id(id)
                .with_class("hand")
                .with_style("transform", "rotate(-90deg)")
        });
        let trail = DomElement::new("div")
            .with_id(TRAIL_ID)
            .with_style("position", "absolute")
            .with_style("pointer-events", "none");

        let face = DomElement::new("div")
            .with_id("clock")
            .with_class("clock")
            .with_children([
                DomElement::new("div")
                    .with_id(TICKS_ID)
                    .with_class("ticks")
                    .with_children(ticks),
                DomElement::new("div")
                    .with_id(NUMBERS_ID)
                    .with_class("numbers")
                    .with_children(numerals),
            ])
            .with_children(hands)
            .with_children([trail]);
        let digital = DomElement::new("div")
            .with_id("digital")
            .with_class("digital")
            .with_children(
                READOUT_IDS
                    .iter()
                    .map(|id| DomElement::new("span").with_id(id).with_text("00")),
            );

        let mut dom = MockDom::new();
        dom.mount(face);
        dom.mount(digital);

        debug!(
            ticks = dial.ticks.len(),
            numerals = dial.numerals.len(),
            "clock mounted"
        );
        Self { dom, style }
    }

    /// The page
    #[must_use]
    pub const fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Readout text as `HH:MM:SS`
    #[must_use]
    pub fn readout_text(&self) -> String {
        let field = |id| self.dom.get_element_text(id).unwrap_or_default();
        format!("{}:{}:{}", field("hours"), field("minutes"), field("seconds"))
    }
}

impl Default for ClockView {
    fn default() -> Self {
        Self::mount(&DialGeometry::default(), TrailStyle::default())
    }
}

impl ClockSink for ClockView {
    fn on_frame(&mut self, frame: &ClockFrame) {
        let angles = [frame.angles.hour, frame.angles.minute, frame.angles.second];
        for (id, angle) in HAND_IDS.iter().zip(angles) {
            self.dom
                .set_element_style(id, "transform", &format!("rotate({angle}deg)"));
        }

        let size = format!("{}px", self.style.dot_size);
        let dots = frame
            .dots
            .iter()
            .map(|dot| {
                DomElement::new("div")
                    .with_class("trail-dot")
                    .with_style("width", &size)
                    .with_style("height", &size)
                    .with_style("background", &self.style.css_color(dot.opacity))
                    .with_style("transform", &dot.css_transform())
            })
            .collect();
        self.dom.replace_children(TRAIL_ID, dots);
    }

    fn on_readout(&mut self, readout: &DigitalReadout) {
        let fields = [&readout.hours, &readout.minutes, &readout.seconds];
        for (id, text) in READOUT_IDS.iter().zip(fields) {
            self.dom.set_element_text(id, text);
        }
    }
}
