//! ClipChunk CLI
//!
//! Cuts a video into chunks short enough for status updates and exports them
//! as MP4 files.
//!
//! # Usage
//!
//! ```bash
//! clipchunk inspect holiday.mov
//! clipchunk plan holiday.mov
//! clipchunk cut holiday.mov --start 00:01:00 --end 00:02:00
//! clipchunk split holiday.mov --jobs 2 --output-dir exports
//! clipchunk replay holiday.mov --events drag.json --export
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use clipchunk::adapters::tracing_log::init_logging;
use clipchunk::app::container::DefaultAppContainer;
use clipchunk::cli::{commands, Cli, Commands};
use clipchunk::config_initialization::initialize_configuration_hierarchy;

/// Main entry point for the ClipChunk CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(&cli)?;
    init_logging(&config.log_level, config.log_json)?;
    info!("Starting ClipChunk");
    info!(
        "Output directory: {}, jobs: {}, ffmpeg: {}",
        config.output_dir.display(),
        config.jobs,
        config.encoder.ffmpeg_path.display()
    );

    clipchunk::init()?;
    let container = DefaultAppContainer::new(&config)?;

    // Execute the requested command
    match cli.command {
        Commands::Inspect(args) => commands::inspect(&container, args).await?,
        Commands::Plan(args) => commands::plan(&container, args).await?,
        Commands::Cut(args) => commands::cut(&container, args).await?,
        Commands::Split(args) => commands::split(&container, args, config.jobs).await?,
        Commands::Replay(args) => commands::replay(&container, args, config.jobs).await?,
    }

    info!("ClipChunk completed successfully");
    Ok(())
}
