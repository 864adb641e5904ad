// vidthumb-cli/src/config.rs
//
// Builds the core ThumbnailConfig from the config file, environment and
// command-line flags, in increasing order of precedence.

use std::time::Duration;

use vidthumb_core::{CoreResult, ThumbnailConfig, ThumbnailConfigBuilder};

use crate::cli::ConfigArgs;

/// Resolves and validates the configuration for this run.
///
/// Without a config file or `--root`, the current directory is the storage
/// root.
pub fn resolve_config(args: &ConfigArgs) -> CoreResult<ThumbnailConfig> {
    let base = match &args.config {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            ThumbnailConfig::from_json_file(path)?
        }
        None => ThumbnailConfig::default(),
    };

    let mut builder = ThumbnailConfigBuilder::from_config(base);
    if let Some(root) = &args.root {
        builder = builder.storage_root(root.clone());
    }
    if let Some(ffprobe) = &args.ffprobe {
        builder = builder.ffprobe_path(ffprobe.clone());
    }
    if let Some(ffmpeg) = &args.ffmpeg {
        builder = builder.ffmpeg_path(ffmpeg.clone());
    }
    if let Some(secs) = args.probe_timeout {
        builder = builder.probe_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = args.encode_timeout {
        builder = builder.encode_timeout(Duration::from_secs(secs));
    }

    let config = builder.build();
    config.validate()?;
    Ok(config)
}

/// One-line summary of the resolved configuration for debug logs.
pub fn describe(config: &ThumbnailConfig) -> String {
    format!(
        "root={} ffprobe={} ffmpeg={}",
        config.storage_root.display(),
        config.ffprobe_path.display(),
        config.ffmpeg_path.display()
    )
}
