// vidthumb-cli/src/main.rs
//
// Entry point for the `vidthumb` binary: parses arguments, sets up logging,
// runs the selected command and maps the outcome to a process exit code.

use clap::Parser;
use std::process;

use vidthumb_cli::logging::init_logging;
use vidthumb_cli::{Cli, run};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
