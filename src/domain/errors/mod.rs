// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
///
/// Every variant is recoverable: the session turns it into a notification and
/// keeps running.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// File is not a video, or another rejected input
    InvalidInput(String),
    /// Start/end point would break the selection bounds
    InvalidSelection(String),
    /// Chunk or export range has a non-positive or too long duration
    InvalidDuration(String),
    /// Transcoding engine could not be initialized
    ServiceUnavailable(String),
    /// Playback position could not be set
    SeekFailure(String),
    /// Referenced chunk or file does not exist
    NotFound(String),
    /// Transcoding engine ran but failed
    TranscodeFailed(String),
    /// Artifact could not be written
    DeliveryFailed(String),
    /// Media file could not be probed
    ProbeFailed(String),
    /// Configuration is invalid
    Config(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::InvalidSelection(msg) => write!(f, "Invalid selection: {}", msg),
            DomainError::InvalidDuration(msg) => write!(f, "Invalid duration: {}", msg),
            DomainError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            DomainError::SeekFailure(msg) => write!(f, "Seek failed: {}", msg),
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::TranscodeFailed(msg) => write!(f, "Transcode failed: {}", msg),
            DomainError::DeliveryFailed(msg) => write!(f, "Delivery failed: {}", msg),
            DomainError::ProbeFailed(msg) => write!(f, "Probe failed: {}", msg),
            DomainError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
