//! # Pile Capacity CLI
//!
//! Terminal front-end for `pile_core`: reads a soil profile from a file or
//! asks for it interactively, runs the capacity calculation and prints the
//! per-layer table (or JSON).
//!
//! ```text
//! pile calc profile.toml
//! pile calc profile.json --format json
//! pile interactive
//! pile disclaimer
//! ```

mod config;
mod interactive;
mod logging;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use pile_core::calculations::pile::{calculate, PileCapacityResult};
use pile_core::report::{render_json, render_report, COHESION_MULTIPLIER_HELP, DISCLAIMER};
use pile_core::{CalcError, ProfileInput};
use thiserror::Error;

use crate::config::{Config, OutputFormat};
use crate::interactive::Prompter;

/// Errors surfaced by the command-line front-end.
#[derive(Error, Debug)]
pub enum CliError {
    /// Calculation or profile error from the engine
    #[error(transparent)]
    Calc(#[from] CalcError),

    /// Config file could not be parsed
    #[error("Config error in '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Terminal or file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input ended before the profile was complete
    #[error("Input ended before the profile was complete")]
    EndOfInput,
}

#[derive(Parser, Debug)]
#[command(name = "pile", version, about = "Single pile axial capacity from SPT blow counts")]
struct Cli {
    /// Config file (defaults to ./pile.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// No log output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate capacity for a profile file (.json or .toml)
    Calc {
        profile: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Enter the profile at the prompt
    Interactive {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show the disclaimer and the cohesion multiplier help
    Disclaimer,
}

#[derive(Args, Debug, Default)]
struct OutputArgs {
    /// Output format (overrides config)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Decimal places in the table (overrides config)
    #[arg(long)]
    precision: Option<usize>,

    /// Leave out the kip column
    #[arg(long)]
    no_kips: bool,
}

impl OutputArgs {
    fn apply(&self, cfg: &mut Config) {
        if let Some(format) = self.format {
            cfg.output.format = format;
        }
        if let Some(precision) = self.precision {
            cfg.output.precision = precision;
        }
        if self.no_kips {
            cfg.output.show_kips = false;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(logging::level_from_flags(cli.verbose, cli.quiet)) {
        eprintln!("Logger already initialized: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("run failed: {e}");
            eprintln!("Error: {e}");
            if let CliError::Calc(calc) = &e {
                if let Ok(json) = serde_json::to_string_pretty(calc) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{json}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut cfg = config::load_or_default(cli.config.as_deref())?;

    let (input, output) = match cli.command {
        Command::Disclaimer => {
            println!("{DISCLAIMER}");
            println!();
            println!("{COHESION_MULTIPLIER_HELP}");
            return Ok(());
        }
        Command::Calc { profile, output } => {
            info!("reading profile {}", profile.display());
            let input = ProfileInput::load(&profile)?.into_input(&cfg.defaults)?;
            (input, output)
        }
        Command::Interactive { output } => {
            println!("{DISCLAIMER}");
            println!();
            let stdin = io::stdin();
            let input = Prompter::new(stdin.lock(), io::stdout()).collect(&cfg.defaults)?;
            println!();
            (input, output)
        }
    };

    output.apply(&mut cfg);
    let result = calculate(&input)?;
    print_result(&result, &cfg)?;
    Ok(())
}

fn print_result(result: &PileCapacityResult, cfg: &Config) -> Result<(), CliError> {
    match cfg.output.format {
        OutputFormat::Table => {
            print!("{}", render_report(result, &cfg.output.report_options(), Utc::now()));
        }
        OutputFormat::Json => println!("{}", render_json(result)?),
    }
    Ok(())
}
