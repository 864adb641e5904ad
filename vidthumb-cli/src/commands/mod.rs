//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Checks that ffprobe and ffmpeg are installed.
pub mod check;

/// Extracts a midpoint thumbnail, printing the resulting image path.
pub mod extract;

/// Prints the probed duration and its midpoint.
pub mod probe;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::config::{describe, resolve_config};

/// Runs the parsed command line, returning the process exit code.
pub fn run(cli: &Cli) -> Result<i32> {
    let config = resolve_config(&cli.config)?;
    log::debug!("Using {}", describe(&config));

    match &cli.command {
        Commands::Extract(args) => extract::run_extract(&config, args),
        Commands::Probe(args) => probe::run_probe(&config, args),
        Commands::Check => check::run_check(&config),
    }
}
