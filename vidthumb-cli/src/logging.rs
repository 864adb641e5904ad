// ============================================================================
// vidthumb-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console or File Logging for the CLI
//
// Console logging goes to stderr through env_logger, so stdout carries only
// command results (the image path for `extract`). RUST_LOG overrides the
// level chosen from --verbose. With --log-file, records go to a file through
// the core library's log4rs setup instead.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::LevelFilter;

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Log file to write to: `target` itself, or a timestamped file inside it
/// when `target` is an existing directory.
pub fn log_file_path(target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(format!("vidthumb_{}.log", get_timestamp()))
    } else {
        target.to_path_buf()
    }
}

/// Installs the global logger for this run.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    match log_file {
        Some(target) => {
            let path = log_file_path(target);
            vidthumb_core::logging::setup_file_logging(&path, level)
                .with_context(|| format!("failed to set up log file {}", path.display()))
        }
        None => env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_timestamp_secs()
            .target(env_logger::Target::Stderr)
            .try_init()
            .context("failed to initialize console logging"),
    }
}
