//! ClipChunk Library
//!
//! Timeline selection and chunk-list editing for cutting a video into
//! status-sized pieces, plus export of those pieces through ffmpeg with a
//! fallback to the original file.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{EditorSession, ExportInteractor, LoadInteractor};
pub use domain::errors::DomainError;
pub use domain::model::{Chunk, ChunkId, Selection, VideoSource};
pub use error::{ClipChunkError, ClipChunkResult};

/// Initialize ClipChunk library
pub fn init() -> ClipChunkResult<()> {
    ffmpeg_next::init().map_err(|e| ClipChunkError::FFmpegInitError {
        message: e.to_string(),
    })?;

    Ok(())
}
