//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Upper bound for `--jobs`
pub const MAX_JOBS: usize = 64;

fn jobs_in_range(s: &str) -> Result<usize, String> {
    clap_num::number_range(s, 1, MAX_JOBS)
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the cut command
#[derive(Args, Debug)]
pub struct CutArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Start time (HH:MM:SS, MM:SS or seconds)
    #[arg(short, long)]
    pub start: String,

    /// End time (HH:MM:SS, MM:SS or seconds)
    #[arg(short, long)]
    pub end: String,
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Exports running at the same time (default: from configuration)
    #[arg(short, long, value_parser = jobs_in_range)]
    pub jobs: Option<usize>,
}

/// Arguments for the replay command
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Input video file path
    pub input: PathBuf,

    /// JSON file holding the recorded interaction events
    #[arg(long)]
    pub events: PathBuf,

    /// Export every committed chunk once the events are applied
    #[arg(long)]
    pub export: bool,

    /// Print the final display frame as JSON
    #[arg(long)]
    pub json: bool,
}
