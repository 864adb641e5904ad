// ============================================================================
// vidthumb-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module owns everything that starts a child process: the shared
// timeout-aware runner and the availability checks behind `vidthumb check`.
// The probe and the extractor build their command lines elsewhere and hand
// them to `command::run_with_timeout`.

use crate::config::ThumbnailConfig;

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// Timeout-aware process execution shared by the probe and the encoder
pub mod command;

pub use command::{CommandError, CommandOutput, run_with_timeout};

/// Upper bound for a `-version` call.
const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Availability report for one external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub name: String,
    pub path: PathBuf,
    pub available: bool,
    /// First line of `-version` output when the tool ran.
    pub version: Option<String>,
}

/// Reports availability and version of the tool at `path`.
pub fn check_tool(name: &str, path: &Path) -> ToolStatus {
    let mut cmd = Command::new(path);
    cmd.arg("-version");

    match run_with_timeout(&mut cmd, VERSION_CHECK_TIMEOUT) {
        Ok(output) => ToolStatus {
            name: name.to_string(),
            path: path.to_path_buf(),
            available: true,
            version: output
                .stdout
                .lines()
                .chain(output.stderr.lines())
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string),
        },
        Err(e) => {
            log::debug!("{} unavailable: {}", name, e);
            ToolStatus {
                name: name.to_string(),
                path: path.to_path_buf(),
                available: false,
                version: None,
            }
        }
    }
}

/// Checks both tools an extraction needs, ffprobe first.
pub fn check_tools(config: &ThumbnailConfig) -> Vec<ToolStatus> {
    vec![
        check_tool("ffprobe", &config.ffprobe_path),
        check_tool("ffmpeg", &config.ffmpeg_path),
    ]
}
