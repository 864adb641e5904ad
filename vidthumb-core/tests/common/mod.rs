// vidthumb-core/tests/common/mod.rs
//
// Shared helpers for integration tests: a temporary storage root holding a
// dummy video, and shell scripts standing in for ffprobe and ffmpeg.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use vidthumb_core::ThumbnailConfig;

/// Root-relative location of the dummy video.
pub const VIDEO_URL: &str = "/videos/clip.mp4";

/// File the fake ffmpeg writes its arguments to, one per line.
pub const ARGS_LOG: &str = "ffmpeg_args.txt";

/// A storage root with one video and a directory for fake tools.
pub struct Fixture {
    pub root: TempDir,
    pub tools: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create storage root");
        let tools = tempfile::tempdir().expect("create tools dir");
        let video = root.path().join(VIDEO_URL.trim_start_matches('/'));
        fs::create_dir_all(video.parent().unwrap()).unwrap();
        fs::write(&video, b"dummy video content").unwrap();
        Self { root, tools }
    }

    /// Writes an executable `/bin/sh` script into the tools directory.
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.tools.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    /// An ffprobe that prints a summary with the given duration line.
    pub fn ffprobe_reporting(&self, duration_line: &str) -> PathBuf {
        self.script(
            "ffprobe",
            &format!(
                "echo \"Input #0, mov,mp4,m4a,3gp,3g2,mj2, from '$1':\" 1>&2\n\
                 echo \"  {duration_line}\" 1>&2\n\
                 echo \"  Stream #0:0: Video: h264 (High), yuv420p, 1280x720\" 1>&2"
            ),
        )
    }

    /// An ffmpeg that records its arguments and creates the output file.
    pub fn ffmpeg_writing_frame(&self) -> PathBuf {
        let log = self.tools.path().join(ARGS_LOG);
        self.script(
            "ffmpeg",
            &format!(
                "printf '%s\\n' \"$@\" > '{}'\n\
                 for last; do :; done\n\
                 printf 'JFIF' > \"$last\"",
                log.display()
            ),
        )
    }

    /// An ffmpeg that fails the way it does on a corrupt input.
    pub fn ffmpeg_failing(&self) -> PathBuf {
        self.script(
            "ffmpeg",
            "echo \"clip.mp4: Invalid data found when processing input\" 1>&2\nexit 1",
        )
    }

    /// An ffmpeg that exits cleanly without writing anything.
    pub fn ffmpeg_silent(&self) -> PathBuf {
        self.script("ffmpeg", "exit 0")
    }

    /// An ffmpeg that never finishes on its own.
    pub fn ffmpeg_hanging(&self) -> PathBuf {
        self.script("ffmpeg", "exec sleep 30")
    }

    pub fn config(&self, ffprobe: PathBuf, ffmpeg: PathBuf) -> ThumbnailConfig {
        ThumbnailConfig {
            storage_root: self.root.path().to_path_buf(),
            ffprobe_path: ffprobe,
            ffmpeg_path: ffmpeg,
            probe_timeout: Duration::from_secs(10),
            encode_timeout: Duration::from_secs(10),
        }
    }

    /// Arguments the fake ffmpeg was last called with.
    pub fn recorded_args(&self) -> Vec<String> {
        fs::read_to_string(self.tools.path().join(ARGS_LOG))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn root_path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn exists(&self, relative: &Path) -> bool {
        self.root.path().join(relative).exists()
    }
}
