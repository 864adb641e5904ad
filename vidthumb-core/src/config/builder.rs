// ============================================================================
// vidthumb-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for ThumbnailConfig
//
// Fluent construction of ThumbnailConfig with defaults for everything but the
// storage root. `build` does not validate; call `ThumbnailConfig::validate`
// before handing the result to an extractor.

// ---- Standard library imports ----
use std::path::PathBuf;
use std::time::Duration;

// ---- Internal crate imports ----
use super::ThumbnailConfig;

/// Builder for creating ThumbnailConfig instances.
///
/// # Examples
///
/// ```rust
/// use vidthumb_core::config::ThumbnailConfigBuilder;
/// use std::path::PathBuf;
/// use std::time::Duration;
///
/// let config = ThumbnailConfigBuilder::new()
///     .storage_root(PathBuf::from("/srv/media"))
///     .ffmpeg_path(PathBuf::from("/usr/local/bin/ffmpeg"))
///     .encode_timeout(Duration::from_secs(60))
///     .build();
///
/// assert_eq!(config.encode_timeout, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThumbnailConfigBuilder {
    config: ThumbnailConfig,
}

impl ThumbnailConfigBuilder {
    /// Creates a builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration, e.g. one loaded from a file.
    pub fn from_config(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    pub fn storage_root(mut self, root: PathBuf) -> Self {
        self.config.storage_root = root;
        self
    }

    pub fn ffprobe_path(mut self, path: PathBuf) -> Self {
        self.config.ffprobe_path = path;
        self
    }

    pub fn ffmpeg_path(mut self, path: PathBuf) -> Self {
        self.config.ffmpeg_path = path;
        self
    }

    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.config.probe_timeout = timeout;
        self
    }

    pub fn encode_timeout(mut self, timeout: Duration) -> Self {
        self.config.encode_timeout = timeout;
        self
    }

    /// Builds the ThumbnailConfig.
    pub fn build(self) -> ThumbnailConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_FFPROBE, DEFAULT_PROBE_TIMEOUT};

    #[test]
    fn test_builder_defaults() {
        let config = ThumbnailConfigBuilder::new().build();
        assert_eq!(config, ThumbnailConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ThumbnailConfigBuilder::new()
            .storage_root(PathBuf::from("/srv/media"))
            .ffmpeg_path(PathBuf::from("/opt/bin/ffmpeg"))
            .encode_timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.storage_root, PathBuf::from("/srv/media"));
        assert_eq!(config.ffmpeg_path, PathBuf::from("/opt/bin/ffmpeg"));
        assert_eq!(config.ffprobe_path, PathBuf::from(DEFAULT_FFPROBE));
        assert_eq!(config.encode_timeout, Duration::from_secs(5));
        assert_eq!(config.probe_timeout, DEFAULT_PROBE_TIMEOUT);
    }

    #[test]
    fn test_builder_from_config_keeps_values() {
        let base = ThumbnailConfig::new(PathBuf::from("/data"));
        let config = ThumbnailConfigBuilder::from_config(base.clone())
            .probe_timeout(Duration::from_secs(3))
            .build();

        assert_eq!(config.storage_root, base.storage_root);
        assert_eq!(config.probe_timeout, Duration::from_secs(3));
    }
}
