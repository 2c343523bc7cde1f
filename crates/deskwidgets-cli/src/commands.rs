//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// deskwidgets: a button calculator and a sweeping analog clock for the terminal
#[derive(Parser, Debug)]
#[command(name = "deskwidgets")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Widget configuration file (YAML)
    #[arg(long, global = true, env = "DESKWIDGETS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the calculator
    Calc(CalcArgs),

    /// Run the analog clock
    Clock(ClockArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the calc command
#[derive(Parser, Debug, Default)]
pub struct CalcArgs {
    /// Key script to run instead of the interactive keypad.
    ///
    /// Each character is a key press; `{Enter}`, `{Escape}`, `{Backspace}`
    /// name special keys and `{negate}` (or any other button action) clicks
    /// that button.
    #[arg(short, long, value_name = "SCRIPT")]
    pub keys: Option<String>,

    /// Print the display after every key
    #[arg(long, requires = "keys")]
    pub trace: bool,

    /// Print the final calculator state as JSON
    #[arg(long, requires = "keys")]
    pub json: bool,
}

/// Arguments for the clock command
#[derive(Parser, Debug, Default)]
pub struct ClockArgs {
    /// Render a single frame and exit
    #[arg(long)]
    pub once: bool,

    /// Pin the start time (HH:MM[:SS[.mmm]]) instead of reading the system clock
    #[arg(long, value_name = "TIME")]
    pub at: Option<String>,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Print frames as JSON lines instead of drawing the face
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug, Default)]
pub struct ConfigArgs {
    /// Print the effective configuration as YAML
    #[arg(long)]
    pub show: bool,

    /// Show the built-in defaults
    #[arg(long, conflicts_with = "show")]
    pub default: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
