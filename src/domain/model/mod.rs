// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::utils::time::format_time;

/// Editable time range on the timeline, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub start: f64,
    pub end: f64,
}

impl Selection {
    /// Create a selection without validating it
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the range; negative when the points are inverted
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", format_time(self.start), format_time(self.end))
    }
}

/// Stable identifier of a committed chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(pub u64);

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Committed, immutable time range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    id: ChunkId,
    start: f64,
    end: f64,
    duration: f64,
}

impl Chunk {
    /// Only the registry mints chunks, so the duration invariant is checked there
    pub(crate) fn new(id: ChunkId, start: f64, end: f64) -> Self {
        Self {
            id,
            start,
            end,
            duration: end - start,
        }
    }

    pub fn id(&self) -> ChunkId {
        self.id
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Range of this chunk as a selection
    pub fn as_selection(&self) -> Selection {
        Selection::new(self.start, self.end)
    }
}

/// Frame size of the primary video stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The loaded video: one instance per load, replaced wholesale on the next
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSource {
    pub path: PathBuf,
    pub file_name: String,
    pub media_type: String,
    pub size_bytes: u64,
    pub duration: f64,
    pub resolution: Option<Resolution>,
}

impl VideoSource {
    /// Create a video source, rejecting impossible durations
    pub fn new(
        path: PathBuf,
        media_type: impl Into<String>,
        size_bytes: u64,
        duration: f64,
    ) -> Result<Self, DomainError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(DomainError::ProbeFailed(format!(
                "Video duration must be a non-negative number, got {}",
                duration
            )));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video.mp4".to_string());

        Ok(Self {
            path,
            file_name,
            media_type: media_type.into(),
            size_bytes,
            duration,
            resolution: None,
        })
    }

    /// Attach the probed frame size
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        if width > 0 && height > 0 {
            self.resolution = Some(Resolution { width, height });
        }
        self
    }
}

/// Timeline handle the pointer can grab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    Start,
    End,
    Playhead,
}

/// Which handle, if any, is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    None,
    DraggingStart,
    DraggingEnd,
    DraggingPlayhead,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        !matches!(self, DragState::None)
    }
}

impl From<Handle> for DragState {
    fn from(handle: Handle) -> Self {
        match handle {
            Handle::Start => DragState::DraggingStart,
            Handle::End => DragState::DraggingEnd,
            Handle::Playhead => DragState::DraggingPlayhead,
        }
    }
}

/// On-screen placement of the timeline strip, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineGeometry {
    pub left: f64,
    pub width: f64,
}

impl TimelineGeometry {
    /// Width used before the front end reports a layout
    pub const FALLBACK_WIDTH: f64 = 600.0;

    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Width used for rendering: the fallback when nothing is laid out yet
    pub fn render_width(&self) -> f64 {
        if self.width > 0.0 {
            self.width
        } else {
            Self::FALLBACK_WIDTH
        }
    }
}

impl Default for TimelineGeometry {
    fn default() -> Self {
        Self::new(0.0, Self::FALLBACK_WIDTH)
    }
}

/// Playback position and preview bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackState {
    pub position: f64,
    pub previewing: bool,
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient message for the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.level, self.message)
    }
}

#[cfg(test)]
mod tests;
