//! Raw-mode terminal session

use std::io::{IsTerminal, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Alternate screen in raw mode, restored on drop
#[derive(Debug)]
pub struct Session {
    out: Stdout,
}

impl Session {
    /// Enters raw mode on the alternate screen
    pub fn enter() -> CliResult<Self> {
        let mut out = std::io::stdout();
        if !out.is_terminal() {
            return Err(CliError::terminal(
                "stdout is not a terminal (use --keys, --once or --json)",
            ));
        }
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        debug!("terminal session started");
        Ok(Self { out })
    }

    /// Replaces the screen contents with `lines`
    pub fn draw(&mut self, lines: &[String]) -> CliResult<()> {
        queue!(self.out, Clear(ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(self.out, MoveTo(0, row), Print(line))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        debug!("terminal session restored");
    }
}
