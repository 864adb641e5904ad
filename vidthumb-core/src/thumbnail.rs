// ============================================================================
// vidthumb-core/src/thumbnail.rs
// ============================================================================
//
// MIDPOINT THUMBNAILS: Extracting One Frame from the Middle of a Clip
//
// Each extraction walks a fixed sequence:
//
//   RESOLVING_PATH -> PROBING_DURATION -> COMPUTING_MIDPOINT -> ENCODING
//
// and ends either on the requested output image or on the caller's fallback
// image. Every failure along the way is a ThumbnailError, and `extract`
// turns all of them into the fallback path. There are no retries, and a
// partially written image from a failed encode is left where it is.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

use ffmpeg_sidecar::command::FfmpegCommand;
use log::{debug, info, warn};

use crate::config::ThumbnailConfig;
use crate::error::ThumbnailError;
use crate::external::command::{CommandError, run_with_timeout};
use crate::probe::{DurationProbe, DurationSource};
use crate::timecode::Timecode;

/// Image extension used for derived thumbnail names.
pub const THUMBNAIL_EXTENSION: &str = "jpg";

/// A stored video, as seen by the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAsset {
    url: String,
    name: String,
}

impl SourceAsset {
    /// `url` is relative to the storage root and may start with `/`.
    /// `name` is the asset's public name, used to derive image names.
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root-relative image path derived from the asset name:
    /// `videos/clip.mp4` becomes `videos/clip.jpg`.
    pub fn default_thumbnail_path(&self) -> PathBuf {
        Path::new(&self.name).with_extension(THUMBNAIL_EXTENSION)
    }
}

/// Joins a root-relative path onto `root`.
///
/// A leading `/` and `.` components are ignored. `..` components, and paths
/// that name nothing once those are removed, are rejected.
pub fn resolve_under_root(root: &Path, relative: &Path) -> Result<PathBuf, ThumbnailError> {
    let mut resolved = root.to_path_buf();
    let mut named = false;

    for component in relative.components() {
        match component {
            Component::RootDir | Component::CurDir => {}
            Component::Normal(part) => {
                resolved.push(part);
                named = true;
            }
            Component::ParentDir | Component::Prefix(_) => {
                return Err(ThumbnailError::InvalidAssetPath(format!(
                    "'{}' leaves the storage root",
                    relative.display()
                )));
            }
        }
    }

    if !named {
        return Err(ThumbnailError::InvalidAssetPath(format!(
            "'{}' does not name a file",
            relative.display()
        )));
    }

    Ok(resolved)
}

/// Extracts the midpoint frame of stored videos.
///
/// # Examples
///
/// ```rust,no_run
/// use vidthumb_core::{SourceAsset, ThumbnailConfig, ThumbnailExtractor};
/// use std::path::{Path, PathBuf};
///
/// let extractor = ThumbnailExtractor::new(ThumbnailConfig::new(PathBuf::from("/srv/media")));
/// let asset = SourceAsset::new("/uploads/clip.mp4", "uploads/clip.mp4");
///
/// let image = extractor.extract(
///     &asset,
///     Path::new("static/video-placeholder.png"),
///     &asset.default_thumbnail_path(),
/// );
/// println!("thumbnail: {}", image.display());
/// ```
#[derive(Debug, Clone)]
pub struct ThumbnailExtractor<P = DurationProbe> {
    config: ThumbnailConfig,
    probe: P,
}

impl ThumbnailExtractor<DurationProbe> {
    /// Creates an extractor that reads durations with ffprobe.
    pub fn new(config: ThumbnailConfig) -> Self {
        let probe = DurationProbe::from_config(&config);
        Self { config, probe }
    }
}

impl<P: DurationSource> ThumbnailExtractor<P> {
    /// Creates an extractor with a custom duration source.
    pub fn with_probe(config: ThumbnailConfig, probe: P) -> Self {
        Self { config, probe }
    }

    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    /// Extracts the midpoint frame of `asset` into `output_image_path`.
    ///
    /// Returns `output_image_path` when a frame was written, and
    /// `fallback_path` in every other case. Both are root-relative and
    /// returned unchanged.
    pub fn extract(&self, asset: &SourceAsset, fallback_path: &Path, output_image_path: &Path) -> PathBuf {
        match self.try_extract(asset, output_image_path) {
            Ok(path) => {
                info!("Thumbnail for {} written to {}", asset.name(), path.display());
                path
            }
            Err(e) => {
                warn!(
                    "Thumbnail for {} failed, using {}: {}",
                    asset.name(),
                    fallback_path.display(),
                    e
                );
                fallback_path.to_path_buf()
            }
        }
    }

    /// Like [`extract`](Self::extract), but reports why no frame was written.
    pub fn try_extract(&self, asset: &SourceAsset, output_image_path: &Path) -> Result<PathBuf, ThumbnailError> {
        // RESOLVING_PATH
        let source = resolve_under_root(&self.config.storage_root, Path::new(asset.url()))?;
        let target = resolve_under_root(&self.config.storage_root, output_image_path)?;

        // PROBING_DURATION
        let duration_text = self.probe.duration_text(&source)?;
        let duration = Timecode::parse(&duration_text)?;
        if duration.is_zero() {
            return Err(ThumbnailError::ZeroDuration);
        }

        // COMPUTING_MIDPOINT
        let timestamp = duration.midpoint().render();
        debug!(
            "Duration of {} is {}, seeking to {}",
            source.display(),
            duration,
            timestamp
        );

        // ENCODING
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| ThumbnailError::OutputDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        self.encode_frame(&timestamp, &source, &target)?;

        Ok(output_image_path.to_path_buf())
    }

    fn encode_command(&self, timestamp: &str, source: &Path, target: &Path) -> Command {
        let mut ffmpeg = FfmpegCommand::new();
        ffmpeg
            .hide_banner()
            .overwrite()
            .seek(timestamp)
            .input(source)
            .args(["-frames:v", "1"])
            .output(target);

        let mut cmd = Command::new(&self.config.ffmpeg_path);
        cmd.args(ffmpeg.get_args());
        cmd
    }

    fn encode_frame(&self, timestamp: &str, source: &Path, target: &Path) -> Result<(), ThumbnailError> {
        let mut cmd = self.encode_command(timestamp, source, target);

        let output = run_with_timeout(&mut cmd, self.config.encode_timeout).map_err(|e| match e {
            CommandError::Spawn { program, source } => ThumbnailError::EncodeSpawnFailure { program, source },
            CommandError::Timeout { timeout, .. } => ThumbnailError::EncodeTimeout { timeout },
            CommandError::Wait { source, .. } => ThumbnailError::EncodeExecutionFailure {
                status: "unknown".to_string(),
                detail: source.to_string(),
            },
        })?;

        if !output.status.success() {
            return Err(ThumbnailError::EncodeExecutionFailure {
                status: output.status.to_string(),
                detail: output.stderr_tail().to_string(),
            });
        }

        if !target.is_file() {
            return Err(ThumbnailError::EncodeExecutionFailure {
                status: output.status.to_string(),
                detail: format!("no image written to {}", target.display()),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use std::time::Duration;

    /// Duration source that answers with fixed text.
    struct FixedDuration(&'static str);

    impl DurationSource for FixedDuration {
        fn duration_text(&self, _path: &Path) -> Result<String, ProbeError> {
            Ok(self.0.to_string())
        }
    }

    struct MismatchedDuration;

    impl DurationSource for MismatchedDuration {
        fn duration_text(&self, _path: &Path) -> Result<String, ProbeError> {
            Err(ProbeError::PatternMismatch {
                line: "Duration: N/A, start: 0.000000".to_string(),
            })
        }
    }

    fn config_without_ffmpeg(root: &Path) -> ThumbnailConfig {
        ThumbnailConfig {
            storage_root: root.to_path_buf(),
            ffmpeg_path: PathBuf::from("/nonexistent/ffmpeg"),
            encode_timeout: Duration::from_secs(2),
            ..ThumbnailConfig::default()
        }
    }

    #[test]
    fn test_resolve_under_root() {
        let root = Path::new("/srv/media");
        assert_eq!(
            resolve_under_root(root, Path::new("/videos/clip.mp4")).unwrap(),
            PathBuf::from("/srv/media/videos/clip.mp4")
        );
        assert_eq!(
            resolve_under_root(root, Path::new("./videos/clip.mp4")).unwrap(),
            PathBuf::from("/srv/media/videos/clip.mp4")
        );
        assert!(matches!(
            resolve_under_root(root, Path::new("../etc/passwd")),
            Err(ThumbnailError::InvalidAssetPath(_))
        ));
        assert!(matches!(
            resolve_under_root(root, Path::new("videos/../../x.mp4")),
            Err(ThumbnailError::InvalidAssetPath(_))
        ));
        assert!(matches!(
            resolve_under_root(root, Path::new("/")),
            Err(ThumbnailError::InvalidAssetPath(_))
        ));
        assert!(matches!(
            resolve_under_root(root, Path::new("")),
            Err(ThumbnailError::InvalidAssetPath(_))
        ));
    }

    #[test]
    fn test_default_thumbnail_path() {
        assert_eq!(
            SourceAsset::new("/videos/clip.mp4", "videos/clip.mp4").default_thumbnail_path(),
            PathBuf::from("videos/clip.jpg")
        );
        assert_eq!(
            SourceAsset::new("/clip", "clip").default_thumbnail_path(),
            PathBuf::from("clip.jpg")
        );
    }

    #[test]
    fn test_zero_duration_falls_back() {
        let root = tempfile::tempdir().unwrap();
        let extractor =
            ThumbnailExtractor::with_probe(config_without_ffmpeg(root.path()), FixedDuration("00:00:00"));
        let asset = SourceAsset::new("/clip.mp4", "clip.mp4");

        assert!(matches!(
            extractor.try_extract(&asset, Path::new("clip.jpg")),
            Err(ThumbnailError::ZeroDuration)
        ));
        assert_eq!(
            extractor.extract(&asset, Path::new("fallback.png"), Path::new("clip.jpg")),
            PathBuf::from("fallback.png")
        );
    }

    #[test]
    fn test_unparseable_duration_falls_back() {
        let root = tempfile::tempdir().unwrap();
        let extractor = ThumbnailExtractor::with_probe(config_without_ffmpeg(root.path()), FixedDuration("bad"));
        let asset = SourceAsset::new("/clip.mp4", "clip.mp4");

        assert!(matches!(
            extractor.try_extract(&asset, Path::new("clip.jpg")),
            Err(ThumbnailError::DurationParseFailure(_))
        ));
        assert_eq!(
            extractor.extract(&asset, Path::new("fallback.png"), Path::new("clip.jpg")),
            PathBuf::from("fallback.png")
        );
    }

    #[test]
    fn test_pattern_mismatch_falls_back() {
        let root = tempfile::tempdir().unwrap();
        let extractor = ThumbnailExtractor::with_probe(config_without_ffmpeg(root.path()), MismatchedDuration);
        let asset = SourceAsset::new("/clip.mp4", "clip.mp4");

        assert!(matches!(
            extractor.try_extract(&asset, Path::new("clip.jpg")),
            Err(ThumbnailError::DurationPatternMismatch { .. })
        ));
        assert_eq!(
            extractor.extract(&asset, Path::new("fallback.png"), Path::new("clip.jpg")),
            PathBuf::from("fallback.png")
        );
    }

    #[test]
    fn test_missing_encoder_falls_back_without_output() {
        let root = tempfile::tempdir().unwrap();
        let extractor =
            ThumbnailExtractor::with_probe(config_without_ffmpeg(root.path()), FixedDuration("00:10:00"));
        let asset = SourceAsset::new("/videos/clip.mp4", "videos/clip.mp4");
        let output = Path::new("thumbs/clip.jpg");

        assert!(matches!(
            extractor.try_extract(&asset, output),
            Err(ThumbnailError::EncodeSpawnFailure { .. })
        ));
        assert_eq!(
            extractor.extract(&asset, Path::new("fallback.png"), output),
            PathBuf::from("fallback.png")
        );
        assert!(!root.path().join(output).exists());
    }

    #[test]
    fn test_escaping_output_path_falls_back() {
        let root = tempfile::tempdir().unwrap();
        let extractor =
            ThumbnailExtractor::with_probe(config_without_ffmpeg(root.path()), FixedDuration("00:10:00"));
        let asset = SourceAsset::new("/clip.mp4", "clip.mp4");

        assert!(matches!(
            extractor.try_extract(&asset, Path::new("../outside.jpg")),
            Err(ThumbnailError::InvalidAssetPath(_))
        ));
    }

    #[test]
    fn test_encode_command_arguments() {
        let extractor = ThumbnailExtractor::with_probe(
            config_without_ffmpeg(Path::new("/srv/media")),
            FixedDuration("00:10:00"),
        );
        let cmd = extractor.encode_command(
            "00:05:00",
            Path::new("/srv/media/clip.mp4"),
            Path::new("/srv/media/clip.jpg"),
        );

        assert_eq!(cmd.get_program(), Path::new("/nonexistent/ffmpeg").as_os_str());
        let args: Vec<String> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();

        let seek = args.iter().position(|a| a == "-ss").expect("seek flag");
        assert_eq!(args[seek + 1], "00:05:00");
        let input = args.iter().position(|a| a == "-i").expect("input flag");
        assert!(seek < input, "seek must precede the input: {args:?}");
        assert_eq!(args[input + 1], "/srv/media/clip.mp4");
        let frames = args.iter().position(|a| a == "-frames:v").expect("frame count");
        assert_eq!(args[frames + 1], "1");
        assert!(args.iter().any(|a| a == "-y"));
        assert_eq!(args.last().map(String::as_str), Some("/srv/media/clip.jpg"));
    }

    #[cfg(unix)]
    #[test]
    fn test_encode_command_keeps_non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let extractor = ThumbnailExtractor::with_probe(
            config_without_ffmpeg(Path::new("/srv/media")),
            FixedDuration("00:10:00"),
        );
        let source = Path::new(OsStr::from_bytes(b"/srv/media/caf\xe9.mp4"));
        let target = Path::new(OsStr::from_bytes(b"/srv/media/caf\xe9.jpg"));
        let cmd = extractor.encode_command("00:05:00", source, target);

        let args: Vec<&OsStr> = cmd.get_args().collect();
        let input = args.iter().position(|a| *a == "-i").expect("input flag");
        assert_eq!(args[input + 1], source.as_os_str());
        assert_eq!(args.last().copied(), Some(target.as_os_str()));
    }
}
