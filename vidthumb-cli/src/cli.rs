// vidthumb-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vidthumb: midpoint video thumbnails",
    long_about = "Extracts a still frame from the middle of a stored video using ffprobe and ffmpeg, \
                  falling back to a placeholder image when that is not possible."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Write logs to this file (or a timestamped file in this directory) instead of stderr
    #[arg(long, global = true, value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Settings shared by every subcommand. Flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "CONFIG_FILE", env = "VIDTHUMB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Storage root that asset and image paths are relative to (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR", env = "VIDTHUMB_STORAGE_ROOT")]
    pub root: Option<PathBuf>,

    /// ffprobe executable
    #[arg(long, global = true, value_name = "PATH", env = "VIDTHUMB_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// ffmpeg executable
    #[arg(long, global = true, value_name = "PATH", env = "VIDTHUMB_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Seconds ffprobe may run before it is killed
    #[arg(long, global = true, value_name = "SECONDS")]
    pub probe_timeout: Option<u64>,

    /// Seconds ffmpeg may run before it is killed
    #[arg(long, global = true, value_name = "SECONDS")]
    pub encode_timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extracts the midpoint frame of a video, printing the resulting image path
    Extract(ExtractArgs),

    /// Prints a video's duration and the midpoint that would be extracted
    Probe(ProbeArgs),

    /// Checks that ffprobe and ffmpeg can be run
    Check,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Video path relative to the storage root
    #[arg(short = 'i', long = "input", required = true, value_name = "VIDEO")]
    pub input: String,

    /// Public name of the video, used to derive the default output name (defaults to INPUT)
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Image path relative to the storage root (defaults to NAME with a .jpg extension)
    #[arg(short = 'o', long = "output", value_name = "IMAGE")]
    pub output: Option<PathBuf>,

    /// Placeholder image path printed when no frame can be extracted
    #[arg(short = 'f', long = "fallback", required = true, value_name = "IMAGE")]
    pub fallback: PathBuf,
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Video path relative to the storage root
    #[arg(short = 'i', long = "input", required = true, value_name = "VIDEO")]
    pub input: String,
}
