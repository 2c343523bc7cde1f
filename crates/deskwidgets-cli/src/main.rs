//! deskwidgets: calculator and analog clock for the terminal
//!
//! ## Usage
//!
//! ```bash
//! deskwidgets calc                        # Interactive keypad
//! deskwidgets calc --keys '3+4+5='        # Scripted keys, prints 12
//! deskwidgets clock                       # Live analog face
//! deskwidgets clock --once --at 10:09:30  # One frame at a pinned time
//! deskwidgets config                      # Where the configuration came from
//! deskwidgets config --show               # Effective configuration
//! ```

use clap::Parser;
use deskwidgets_cli::{
    calc, clock, logging, Cli, CliConfig, CliResult, ColorChoice, Commands, ConfigArgs, Printer,
    Verbosity, WidgetsConfig,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    logging::init(config.verbosity);

    match cli.command {
        Commands::Calc(args) => calc::run(&config, &args),
        Commands::Clock(args) => clock::run(&config, &args),
        Commands::Config(args) => run_config(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();
    let (widgets, source) = WidgetsConfig::load(cli.config.as_deref())?;

    Ok(CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_widgets(widgets, source))
}

fn run_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    let printer = Printer::new(config);
    if args.default {
        return printer.result(WidgetsConfig::default().to_yaml()?.trim_end());
    }

    let source = config
        .source
        .as_ref()
        .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());
    if !args.show {
        return printer.result(&source);
    }

    printer.note(&format!("# {source}"))?;
    printer.result(config.widgets.to_yaml()?.trim_end())
}
