// vidthumb-cli/src/commands/extract.rs
//
// The `extract` command. Like the library call it wraps, it always prints a
// path and succeeds: either the new thumbnail or the fallback image.

use std::io::Write;

use anyhow::Result;
use vidthumb_core::{SourceAsset, ThumbnailConfig, ThumbnailExtractor};

use crate::cli::ExtractArgs;

pub fn run_extract(config: &ThumbnailConfig, args: &ExtractArgs) -> Result<i32> {
    let name = args.name.clone().unwrap_or_else(|| args.input.trim_start_matches('/').to_string());
    let asset = SourceAsset::new(args.input.clone(), name);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| asset.default_thumbnail_path());

    let extractor = ThumbnailExtractor::new(config.clone());
    let image = extractor.extract(&asset, &args.fallback, &output);

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", image.display())?;
    Ok(0)
}
