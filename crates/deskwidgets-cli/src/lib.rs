//! deskwidgets CLI library
//!
//! Terminal front-ends for the `deskwidgets` calculator and clock: an
//! interactive keypad, a scripted key runner, and an ASCII analog face.

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![warn(missing_docs)]

pub mod calc;
pub mod clock;
mod commands;
mod config;
mod error;
pub mod face;
pub mod keys;
pub mod logging;
mod output;
mod terminal;

pub use commands::{CalcArgs, Cli, ClockArgs, ColorArg, Commands, ConfigArgs};
pub use config::{
    CalculatorSettings, CliConfig, ClockSettings, ColorChoice, Verbosity, WidgetsConfig,
    DEFAULT_CONFIG_FILE, MIN_FACE_SIZE,
};
pub use error::{CliError, CliResult};
pub use output::Printer;
