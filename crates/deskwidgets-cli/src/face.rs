//! Character-grid rendering of the clock face and calculator keypad

use deskwidgets::adapter::{CalculatorView, ACTIVE_KEY_CLASS};
use deskwidgets::clock::{ClockFrame, Dial, DialGeometry, DigitalReadout};

/// Hand lengths in face pixels (hour, minute, second)
const HAND_LENGTHS: [f64; 3] = [70.0, 100.0, 125.0];
const HAND_GLYPHS: [char; 3] = ['#', '=', '*'];

/// Fixed-size character canvas addressed in face pixels
#[derive(Debug)]
struct Grid {
    cells: Vec<Vec<char>>,
    rows: usize,
    cols: usize,
    extent: f64,
}

impl Grid {
    fn new(rows: usize, extent: f64) -> Self {
        // terminal cells are roughly twice as tall as wide
        let cols = rows * 2;
        Self {
            cells: vec![vec![' '; cols]; rows],
            rows,
            cols,
            extent,
        }
    }

    fn cell(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let col = (x / self.extent * (self.cols - 1) as f64).round();
        let row = (y / self.extent * (self.rows - 1) as f64).round();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    fn plot(&mut self, x: f64, y: f64, glyph: char) {
        if let Some((row, col)) = self.cell(x, y) {
            self.cells[row][col] = glyph;
        }
    }

    fn text(&mut self, x: f64, y: f64, text: &str) {
        let Some((row, col)) = self.cell(x, y) else {
            return;
        };
        let len = text.chars().count();
        let start = col.saturating_sub(len / 2);
        for (i, c) in text.chars().enumerate() {
            if let Some(cell) = self.cells[row].get_mut(start + i) {
                *cell = c;
            }
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.cells
            .into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}

fn polar(center: f64, angle_deg: f64, radius: f64) -> (f64, f64) {
    let a = angle_deg.to_radians();
    (center + radius * a.cos(), center + radius * a.sin())
}

fn trail_glyph(opacity: f64) -> char {
    if opacity < 0.4 {
        '.'
    } else if opacity < 0.7 {
        ':'
    } else {
        'o'
    }
}

/// Draws `frame` on a face `rows` tall, with the readout underneath if given
#[must_use]
pub fn render_face(
    frame: &ClockFrame,
    readout: Option<&DigitalReadout>,
    rows: usize,
    geometry: &DialGeometry,
) -> Vec<String> {
    let center = geometry.center;
    let mut grid = Grid::new(rows, center * 2.0);
    let dial = Dial::build(geometry);

    // tick rotation 0 is 12 o'clock
    for tick in dial.ticks.iter().filter(|t| t.major) {
        let (x, y) = polar(center, tick.rotation - 90.0, center * 0.95);
        grid.plot(x, y, '\'');
    }
    for dot in &frame.dots {
        let (x, y) = polar(center, dot.angle, dot.radius * 0.9);
        grid.plot(x, y, trail_glyph(dot.opacity));
    }

    let angles = [frame.angles.hour, frame.angles.minute, frame.angles.second];
    for ((angle, length), glyph) in angles.into_iter().zip(HAND_LENGTHS).zip(HAND_GLYPHS) {
        let steps = (length / 4.0) as usize;
        for step in 1..=steps {
            let (x, y) = polar(center, angle, length * step as f64 / steps as f64);
            grid.plot(x, y, glyph);
        }
    }

    for numeral in &dial.numerals {
        grid.text(numeral.x, numeral.y, &numeral.value.to_string());
    }
    grid.plot(center, center, 'O');

    let width = grid.cols;
    let mut lines = grid.into_lines();
    if let Some(readout) = readout {
        lines.push(String::new());
        lines.push(format!("{:^width$}", readout.to_string()).trim_end().to_string());
    }
    lines
}

/// Draws the calculator display and keypad from the page state.
///
/// Highlighted buttons are wrapped in `>` `<`.
#[must_use]
pub fn render_calculator(view: &CalculatorView) -> Vec<String> {
    const CELL: usize = 6;
    let (rows, cols) = view.keypad().dimensions();
    let inner = CELL * cols;

    let mut lines = Vec::with_capacity(rows + 4);
    lines.push(format!("+{}+", "-".repeat(inner)));
    lines.push(format!("|{:>inner$}|", view.display()));
    lines.push(format!("+{}+", "-".repeat(inner)));
    for row in 0..rows {
        let mut line = String::from("|");
        for col in 0..cols {
            let Some(button) = view.keypad().get_button_at(row, col) else {
                line.push_str(&" ".repeat(CELL));
                continue;
            };
            let active = view
                .dom()
                .get_element(&button.id)
                .is_some_and(|el| el.has_class(ACTIVE_KEY_CLASS));
            let label = if active {
                format!(">{}<", button.label)
            } else {
                format!("[{}]", button.label)
            };
            line.push_str(&format!("{label:^CELL$}"));
        }
        line.push('|');
        lines.push(line);
    }
    lines.push(format!("+{}+", "-".repeat(inner)));
    lines
}
