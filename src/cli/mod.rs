//! CLI module for ClipChunk
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// ClipChunk video chunker
///
/// Cuts a video into chunks of at most 90 seconds, ready to post as status
/// updates. Chunks are re-encoded to MP4 with ffmpeg when it is available and
/// fall back to a copy of the original file when it is not.
#[derive(Parser, Debug)]
#[command(name = "clipchunk")]
#[command(about = "ClipChunk - Split videos into status-sized chunks")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./clipchunk.toml when present)
    #[arg(long, env = "CLIPCHUNK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level or tracing filter
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Directory exported chunks are written to
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// ffmpeg executable used for transcoding
    #[arg(long, global = true)]
    pub ffmpeg: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show duration, size and resolution of a video
    Inspect(args::InspectArgs),
    /// Show the 60 second chunks a video would be split into
    Plan(args::PlanArgs),
    /// Export one chunk between two times
    Cut(args::CutArgs),
    /// Split the whole video into 60 second chunks and export them
    Split(args::SplitArgs),
    /// Apply recorded timeline interactions to a video
    Replay(args::ReplayArgs),
}
