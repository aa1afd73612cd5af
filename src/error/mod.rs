//! Error handling module for ClipChunk

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for ClipChunk operations outside the domain layer
#[derive(Error, Debug)]
pub enum ClipChunkError {
    /// Domain rule rejected the operation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// FFmpeg initialization error
    #[error("Failed to initialize FFmpeg: {message}")]
    FFmpegInitError { message: String },

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// Logging could not be set up
    #[error("Failed to initialize logging: {message}")]
    LoggingError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for ClipChunk operations
pub type ClipChunkResult<T> = std::result::Result<T, ClipChunkError>;
