// vidthumb-cli/src/commands/probe.rs
//
// The `probe` command: shows what the extractor would see for a video
// without running ffmpeg.

use std::path::Path;

use anyhow::{Context, Result};
use vidthumb_core::{DurationProbe, ThumbnailConfig, Timecode, resolve_under_root};

use crate::cli::ProbeArgs;

pub fn run_probe(config: &ThumbnailConfig, args: &ProbeArgs) -> Result<i32> {
    let path = resolve_under_root(&config.storage_root, Path::new(&args.input))?;
    let probe = DurationProbe::from_config(config);

    let text = probe
        .probe(&path)
        .with_context(|| format!("could not read the duration of {}", path.display()))?;

    println!("duration {}", text);
    match Timecode::parse(&text) {
        Ok(duration) if !duration.is_zero() => {
            println!("midpoint {}", duration.midpoint());
        }
        Ok(_) => println!("midpoint none (zero-length clip)"),
        Err(e) => println!("midpoint none ({})", e),
    }

    Ok(0)
}
