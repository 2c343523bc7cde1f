//! CLI configuration
//!
//! Widget settings come from a YAML file: `--config <path>` if given,
//! otherwise `deskwidgets.yaml` in the working directory if present,
//! otherwise built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// File picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "deskwidgets.yaml";

/// Smallest clock face the terminal renderer accepts, in rows
pub const MIN_FACE_SIZE: usize = 11;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Default log filter for this level
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// Calculator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorSettings {
    /// How long a key press highlights its button
    pub highlight_ms: u64,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            highlight_ms: deskwidgets::adapter::DEFAULT_HIGHLIGHT_MS,
        }
    }
}

/// Clock settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockSettings {
    /// Retained trail dots
    pub trail_length: usize,
    /// Animation frame period
    pub frame_interval_ms: u64,
    /// Digital readout period
    pub readout_interval_ms: u64,
    /// Terminal face height in rows
    pub face_size: usize,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            trail_length: deskwidgets::clock::Trail::default().capacity(),
            frame_interval_ms: 16,
            readout_interval_ms: 1000,
            face_size: 21,
        }
    }
}

/// Widget configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetsConfig {
    /// Calculator settings
    pub calculator: CalculatorSettings,
    /// Clock settings
    pub clock: ClockSettings,
}

impl WidgetsConfig {
    /// Parses and validates YAML
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        let config: Self = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Renders as YAML
    pub fn to_yaml(&self) -> CliResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Loads from `path`, or from [`DEFAULT_CONFIG_FILE`] if present, or
    /// falls back to defaults
    pub fn load(path: Option<&Path>) -> CliResult<(Self, Option<PathBuf>)> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => {
                let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
                candidate.is_file().then_some(candidate)
            }
        };

        let Some(path) = path else {
            debug!("no config file, using defaults");
            return Ok((Self::default(), None));
        };

        let text = std::fs::read_to_string(&path).map_err(|e| {
            CliError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml(&text)
            .map_err(|e| CliError::config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "loaded config");
        Ok((config, Some(path)))
    }

    /// Rejects values the widgets cannot work with
    pub fn validate(&self) -> CliResult<()> {
        let clock = &self.clock;
        if clock.trail_length == 0 {
            return Err(CliError::config("clock.trail_length must be at least 1"));
        }
        if clock.frame_interval_ms == 0 {
            return Err(CliError::config("clock.frame_interval_ms must be at least 1"));
        }
        if clock.readout_interval_ms == 0 {
            return Err(CliError::config(
                "clock.readout_interval_ms must be at least 1",
            ));
        }
        if clock.face_size < MIN_FACE_SIZE {
            return Err(CliError::config(format!(
                "clock.face_size must be at least {MIN_FACE_SIZE}"
            )));
        }
        Ok(())
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Widget settings
    pub widgets: WidgetsConfig,
    /// File the widget settings came from
    pub source: Option<PathBuf>,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set widget settings and where they came from
    #[must_use]
    pub fn with_widgets(mut self, widgets: WidgetsConfig, source: Option<PathBuf>) -> Self {
        self.widgets = widgets;
        self.source = source;
        self
    }
}
