// ============================================================================
// vidthumb-core/src/probe.rs
// ============================================================================
//
// DURATION PROBE: Reading a Clip's Length from ffprobe
//
// ffprobe is run with nothing but the file path, which makes it print its
// human-readable summary. The first line mentioning "Duration" carries the
// container duration, e.g.
//
//   Duration: 00:01:23.45, start: 0.000000, bitrate: 1205 kb/s
//
// KEY COMPONENTS:
// - parse_probe_output: pure scanning of captured output
// - DurationProbe: runs ffprobe and applies the sentinel rules
// - DurationSource: seam used by the extractor, so tests can supply text
//   without spawning processes

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ThumbnailConfig;
use crate::error::ProbeError;
use crate::external::command::run_with_timeout;

/// Duration reported when ffprobe cannot be run or prints no duration.
pub const SENTINEL_DURATION: &str = "00:00:00";

/// Marker token that identifies the duration line.
const DURATION_MARKER: &str = "Duration";

static DURATION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Duration:\s([0-9:]+)\.[0-9]+,").expect("duration pattern is valid"));

/// Extracts the `H:MM:SS` part of the first duration line in `output`.
///
/// # Errors
///
/// * `ProbeError::MarkerAbsent` - no line mentions `Duration`
/// * `ProbeError::PatternMismatch` - the first such line is not of the form
///   `Duration: <digits and colons>.<fraction>,`
///
/// # Examples
///
/// ```
/// use vidthumb_core::probe::parse_probe_output;
///
/// let output = "Input #0, mov,mp4 from 'clip.mp4':\n  Duration: 01:02:03.45, start: 0.000000\n";
/// assert_eq!(parse_probe_output(output).unwrap(), "01:02:03");
/// ```
pub fn parse_probe_output(output: &str) -> Result<String, ProbeError> {
    let line = output
        .lines()
        .find(|line| line.contains(DURATION_MARKER))
        .ok_or(ProbeError::MarkerAbsent)?
        .trim();

    DURATION_LINE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ProbeError::PatternMismatch {
            line: line.to_string(),
        })
}

/// Anything that can report a clip's duration as `H:MM:SS` text.
pub trait DurationSource {
    /// Duration text for the file at `path`. A source that cannot tell
    /// should answer [`SENTINEL_DURATION`] rather than fail.
    fn duration_text(&self, path: &Path) -> Result<String, ProbeError>;
}

/// Runs ffprobe against a file to read its duration.
#[derive(Debug, Clone)]
pub struct DurationProbe {
    ffprobe_path: PathBuf,
    timeout: Duration,
}

impl DurationProbe {
    pub fn new(ffprobe_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ThumbnailConfig) -> Self {
        Self::new(config.ffprobe_path.clone(), config.probe_timeout)
    }

    /// Runs ffprobe and scans its output without recovering anything.
    pub fn inspect(&self, path: &Path) -> Result<String, ProbeError> {
        let mut cmd = Command::new(&self.ffprobe_path);
        cmd.arg(path);

        let output = run_with_timeout(&mut cmd, self.timeout)?;

        parse_probe_output(&output.combined())
    }

    /// Duration text for `path`.
    ///
    /// A probe that cannot start, times out, or prints no duration yields
    /// [`SENTINEL_DURATION`]. A duration line in an unexpected format is
    /// returned as `ProbeError::PatternMismatch`.
    pub fn probe(&self, path: &Path) -> Result<String, ProbeError> {
        match self.inspect(path) {
            Ok(text) => {
                debug!("Probed duration {} for {}", text, path.display());
                Ok(text)
            }
            Err(e @ ProbeError::PatternMismatch { .. }) => Err(e),
            Err(e) => {
                warn!("Could not probe {}: {}", path.display(), e);
                Ok(SENTINEL_DURATION.to_string())
            }
        }
    }
}

impl Default for DurationProbe {
    fn default() -> Self {
        Self::from_config(&ThumbnailConfig::default())
    }
}

impl DurationSource for DurationProbe {
    fn duration_text(&self, path: &Path) -> Result<String, ProbeError> {
        self.probe(path)
    }
}
