//! Result printing

use console::{style, Term};

use crate::config::CliConfig;
use crate::error::CliResult;

/// Writes results to stdout and notes to stderr
#[derive(Debug)]
pub struct Printer {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Printer {
    /// Create a printer honoring the CLI color and verbosity settings
    #[must_use]
    pub fn new(config: &CliConfig) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color: config.color.should_color(),
            quiet: config.verbosity.is_quiet(),
        }
    }

    /// Prints a result line. Results are printed even in quiet mode.
    pub fn result(&self, text: &str) -> CliResult<()> {
        let line = if self.use_color {
            style(text).bold().to_string()
        } else {
            text.to_string()
        };
        self.out.write_line(&line)?;
        Ok(())
    }

    /// Prints raw lines unstyled
    pub fn lines(&self, lines: &[String]) -> CliResult<()> {
        for line in lines {
            self.out.write_line(line)?;
        }
        Ok(())
    }

    /// Prints one step of a traced key script
    pub fn step(&self, index: usize, label: &str, display: &str) -> CliResult<()> {
        let line = if self.use_color {
            format!(
                "{} {:<12} {}",
                style(format!("{index:>3}")).dim(),
                style(label).cyan(),
                display
            )
        } else {
            format!("{index:>3} {label:<12} {display}")
        };
        self.out.write_line(&line)?;
        Ok(())
    }

    /// Prints a note to stderr unless quiet
    pub fn note(&self, text: &str) -> CliResult<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.use_color {
            style(text).dim().to_string()
        } else {
            text.to_string()
        };
        self.err.write_line(&line)?;
        Ok(())
    }
}
