//! File logging for long-running hosts.
//!
//! The library itself only emits records through the `log` facade. Hosts
//! that want a persistent log (a worker generating thumbnails for uploads,
//! for instance) can route those records to a file with
//! [`setup_file_logging`].

use anyhow::Result;
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Logger, Root},
    encode::pattern::PatternEncoder,
};
use std::path::Path;

/// Line format used in log files. The target column tells probe records
/// from extraction records.
pub const FILE_LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}";

/// Crates whose records are written at the requested level.
pub const VIDTHUMB_TARGETS: [&str; 2] = ["vidthumb_core", "vidthumb_cli"];

/// Installs a log4rs logger that appends to `log_file`.
///
/// Records from [`VIDTHUMB_TARGETS`] are kept down to `log_level`. Other
/// crates in the host only reach the file at `warn` or above, so a debug log
/// of a thumbnail worker is not drowned by its dependencies.
///
/// Creates the parent directory if needed. Fails if a global logger is
/// already installed.
pub fn setup_file_logging(log_file: &Path, log_level: LevelFilter) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_LOG_PATTERN)))
        .append(true)
        .build(log_file)?;

    let mut builder = Config::builder().appender(Appender::builder().build("file", Box::new(file_appender)));
    for target in VIDTHUMB_TARGETS {
        builder = builder.logger(Logger::builder().build(target, log_level));
    }
    let config = builder.build(
        Root::builder()
            .appender("file")
            .build(log_level.min(LevelFilter::Warn)),
    )?;

    log4rs::init_config(config)?;

    Ok(())
}
