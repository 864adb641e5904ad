// vidthumb-cli/src/lib.rs
//
// Library portion of the vidthumb CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, ConfigArgs, ExtractArgs, ProbeArgs};
pub use commands::run;
