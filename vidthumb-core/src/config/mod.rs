//! Configuration for thumbnail extraction.
//!
//! The storage root is passed in explicitly instead of being read from any
//! process-wide setting, so an extractor can be built and tested anywhere.

mod builder;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub use builder::ThumbnailConfigBuilder;

// Default constants

/// Default ffprobe executable, looked up on `PATH`.
pub const DEFAULT_FFPROBE: &str = "ffprobe";

/// Default ffmpeg executable, looked up on `PATH`.
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Reading a container header is quick; anything slower is stuck.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// A single-frame seek and decode on a large file can take a while, but an
/// encoder still running after two minutes is treated as hung.
pub const DEFAULT_ENCODE_TIMEOUT: Duration = Duration::from_secs(120);

/// Settings shared by every extraction.
///
/// # Examples
///
/// ```rust
/// use vidthumb_core::ThumbnailConfig;
/// use std::path::PathBuf;
///
/// let config = ThumbnailConfig::new(PathBuf::from("/srv/media"));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Absolute base directory that asset and image paths are relative to
    pub storage_root: PathBuf,

    /// ffprobe executable used to read durations
    pub ffprobe_path: PathBuf,

    /// ffmpeg executable used to extract the frame
    pub ffmpeg_path: PathBuf,

    /// Maximum run time for ffprobe (whole seconds in config files)
    #[serde(with = "duration_secs")]
    pub probe_timeout: Duration,

    /// Maximum run time for ffmpeg (whole seconds in config files)
    #[serde(with = "duration_secs")]
    pub encode_timeout: Duration,
}

/// The working directory, or an empty path (rejected by `validate`) when it
/// cannot be determined.
fn default_storage_root() -> PathBuf {
    std::env::current_dir().unwrap_or_default()
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            storage_root: default_storage_root(),
            ffprobe_path: PathBuf::from(DEFAULT_FFPROBE),
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            encode_timeout: DEFAULT_ENCODE_TIMEOUT,
        }
    }
}

impl ThumbnailConfig {
    /// Creates a configuration with default tools and timeouts.
    pub fn new(storage_root: PathBuf) -> Self {
        Self {
            storage_root,
            ..Self::default()
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take their
    /// defaults, so a file without `storage_root` uses the working directory.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Checks that the configuration can be used for extraction.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.storage_root.is_absolute() {
            return Err(CoreError::Config(format!(
                "storage root must be an absolute path, got '{}'",
                self.storage_root.display()
            )));
        }

        if self.ffprobe_path.as_os_str().is_empty() {
            return Err(CoreError::Config("ffprobe path is empty".to_string()));
        }

        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err(CoreError::Config("ffmpeg path is empty".to_string()));
        }

        if self.probe_timeout.is_zero() {
            return Err(CoreError::Config("probe timeout must be greater than zero".to_string()));
        }

        if self.encode_timeout.is_zero() {
            return Err(CoreError::Config("encode timeout must be greater than zero".to_string()));
        }

        Ok(())
    }
}

/// Serde helpers to (de)serialize `Duration` as whole seconds.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
