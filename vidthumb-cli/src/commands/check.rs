// vidthumb-cli/src/commands/check.rs
//
// The `check` command: one line per tool, non-zero exit if any is missing.

use anyhow::Result;
use vidthumb_core::{ThumbnailConfig, check_tools};

pub fn run_check(config: &ThumbnailConfig) -> Result<i32> {
    let statuses = check_tools(config);

    for status in &statuses {
        if status.available {
            println!(
                "{:<8} ok       {}",
                status.name,
                status.version.as_deref().unwrap_or("(no version output)")
            );
        } else {
            println!("{:<8} missing  {}", status.name, status.path.display());
        }
    }

    if statuses.iter().all(|s| s.available) {
        Ok(0)
    } else {
        log::warn!("Thumbnails will fall back to the placeholder until the missing tools are installed");
        Ok(1)
    }
}
