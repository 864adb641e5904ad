// ============================================================================
// vidthumb-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Core Library
//
// KEY COMPONENTS:
// - CoreError: configuration loading and I/O failures
// - ProbeError: failures while reading a duration out of ffprobe
// - TimecodeParseError: text that is not a strict HH:MM:SS duration
// - ThumbnailError: every way a single extraction can end on the fallback
//
// Only CoreError is ever returned to library consumers as an error value from
// setup code. ThumbnailError is recovered at the boundary of
// `ThumbnailExtractor::extract`, which always yields a path.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::external::command::CommandError;

/// Errors raised by configuration loading and setup code.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse configuration file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for fallible setup operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Failures while extracting a duration from ffprobe.
///
/// `DurationProbe::probe` recovers everything except `PatternMismatch` into
/// the sentinel duration `00:00:00`.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to start {program}: {source}")]
    SpawnFailure {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("error waiting for {program}: {source}")]
    WaitFailure {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} did not finish within {} seconds", timeout.as_secs_f64())]
    Timeout { program: String, timeout: Duration },

    #[error("no duration information in probe output")]
    MarkerAbsent,

    #[error("duration line does not match the expected format: {line}")]
    PatternMismatch { line: String },
}

impl From<CommandError> for ProbeError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Spawn { program, source } => ProbeError::SpawnFailure { program, source },
            CommandError::Wait { program, source } => ProbeError::WaitFailure { program, source },
            CommandError::Timeout { program, timeout } => ProbeError::Timeout { program, timeout },
        }
    }
}

/// Text that is not a strict `HH:MM:SS` duration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{text}' is not a valid HH:MM:SS duration")]
pub struct TimecodeParseError {
    pub text: String,
}

impl TimecodeParseError {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

/// Every reason a thumbnail extraction ends on the fallback image.
#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("invalid asset path: {0}")]
    InvalidAssetPath(String),

    #[error("probe failed: {0}")]
    ProbeFailed(ProbeError),

    #[error("duration line does not match the expected format: {line}")]
    DurationPatternMismatch { line: String },

    #[error(transparent)]
    DurationParseFailure(#[from] TimecodeParseError),

    #[error("clip has zero duration")]
    ZeroDuration,

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start encoder {program}: {source}")]
    EncodeSpawnFailure {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("encoder did not finish within {} seconds", timeout.as_secs_f64())]
    EncodeTimeout { timeout: Duration },

    #[error("encoder failed ({status}): {detail}")]
    EncodeExecutionFailure { status: String, detail: String },
}

impl From<ProbeError> for ThumbnailError {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::PatternMismatch { line } => ThumbnailError::DurationPatternMismatch { line },
            other => ThumbnailError::ProbeFailed(other),
        }
    }
}
