//! Core library for extracting a thumbnail from the middle of a video clip.
//!
//! The duration is read from ffprobe's summary output, halved, and handed to
//! ffmpeg as a seek position for a single-frame extraction. Whenever any of
//! that fails the caller's placeholder image is returned instead, so an
//! extraction always produces a usable path.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidthumb_core::{SourceAsset, ThumbnailConfig, extract_thumbnail};
//! use std::path::{Path, PathBuf};
//!
//! let config = ThumbnailConfig::new(PathBuf::from("/srv/media"));
//! config.validate().unwrap();
//!
//! let asset = SourceAsset::new("/uploads/holiday.mp4", "uploads/holiday.mp4");
//! let image = extract_thumbnail(
//!     &config,
//!     &asset,
//!     Path::new("static/video.png"),
//!     Path::new("uploads/holiday.jpg"),
//! );
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod logging;
pub mod probe;
pub mod thumbnail;
pub mod timecode;

// Re-exports for public API
pub use config::{ThumbnailConfig, ThumbnailConfigBuilder};
pub use error::{CoreError, CoreResult, ProbeError, ThumbnailError, TimecodeParseError};
pub use external::{ToolStatus, check_tool, check_tools};
pub use probe::{DurationProbe, DurationSource, SENTINEL_DURATION, parse_probe_output};
pub use thumbnail::{SourceAsset, ThumbnailExtractor, resolve_under_root};
pub use timecode::{Midpoint, Timecode};

use std::path::{Path, PathBuf};

/// Extracts the midpoint frame of `asset` with a one-off extractor.
///
/// Returns `output_image_path` on success and `fallback_path` otherwise.
pub fn extract_thumbnail(
    config: &ThumbnailConfig,
    asset: &SourceAsset,
    fallback_path: &Path,
    output_image_path: &Path,
) -> PathBuf {
    ThumbnailExtractor::new(config.clone()).extract(asset, fallback_path, output_image_path)
}
