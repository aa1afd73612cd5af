// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// The one container exports are encoded into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Mp4,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "mp4",
        }
    }
}

/// Source media for a cut
#[derive(Debug, Clone, PartialEq)]
pub enum TranscodeInput {
    /// Complete bytes of the original file
    Bytes(Vec<u8>),
    /// The original file on disk, read by the engine itself
    File(PathBuf),
}

/// One cut handed to the transcoding engine
#[derive(Debug, Clone)]
pub struct TranscodeRequest {
    /// Original file name, used for the input extension
    pub input_name: String,
    pub input: TranscodeInput,
    /// Offset into the source, in seconds
    pub start: f64,
    /// Length of the cut, in seconds
    pub duration: f64,
    pub format: OutputFormat,
}

/// Port for the external transcoding engine
///
/// `initialize` may be slow (locating or loading the engine); callers are
/// expected to deduplicate concurrent initializations themselves.
#[async_trait]
pub trait TranscodePort: Send + Sync {
    /// Make the engine ready for use
    async fn initialize(&self) -> Result<(), DomainError>;

    /// Cut and re-encode, returning the encoded bytes
    async fn transcode(&self, request: TranscodeRequest) -> Result<Vec<u8>, DomainError>;
}

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Read duration, size and frame size of a video file
    async fn probe_video(&self, path: &Path) -> Result<VideoSource, DomainError>;
}

/// Content of a downloadable file
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactPayload {
    /// Freshly encoded bytes
    Bytes(Vec<u8>),
    /// The untouched original file
    Original(PathBuf),
}

/// A file handed to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub file_name: String,
    pub payload: ArtifactPayload,
}

/// Port for handing finished files to the user
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Store the artifact and return where it ended up
    async fn deliver(&self, artifact: Artifact) -> Result<PathBuf, DomainError>;
}

/// Port for transient user-facing notifications
pub trait NotifyPort: Send + Sync {
    fn notify(&self, notification: &Notification);
}
