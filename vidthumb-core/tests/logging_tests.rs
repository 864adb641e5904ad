// vidthumb-core/tests/logging_tests.rs
//
// Kept in its own test binary: it installs the process-wide logger.

use log::LevelFilter;
use vidthumb_core::logging::setup_file_logging;

#[test]
fn test_file_logging_writes_records() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let log_file = dir.path().join("logs").join("vidthumb.log");

    setup_file_logging(&log_file, LevelFilter::Info)?;
    log::info!(target: "vidthumb_core::thumbnail", "thumbnail written to thumbs/clip.jpg");
    log::debug!(target: "vidthumb_core::probe", "filtered out at info level");
    log::info!(target: "some_dependency::pool", "dependency chatter");
    log::warn!(target: "some_dependency::pool", "dependency warning");
    log::logger().flush();

    let contents = std::fs::read_to_string(&log_file)?;
    assert!(contents.contains("[INFO] vidthumb_core::thumbnail - thumbnail written to thumbs/clip.jpg"), "{contents}");
    assert!(!contents.contains("filtered out"));
    assert!(!contents.contains("dependency chatter"));
    assert!(contents.contains("[WARN] some_dependency::pool - dependency warning"), "{contents}");

    // A second logger cannot be installed.
    assert!(setup_file_logging(&dir.path().join("second.log"), LevelFilter::Info).is_err());

    Ok(())
}
