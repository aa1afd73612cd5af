//! Editor session: the single owner of all editing state
//!
//! Every interaction goes through a `&mut self` handler here. Handlers never
//! panic on bad input; rejected requests leave the state untouched, queue a
//! notification and return the error so callers can react if they want to.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::chunks::ChunkRegistry;
use crate::domain::display::{self, DisplayFrame, RenderInput};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::{MediaTypeRule, PREVIEW_END_MARGIN_SECONDS};
use crate::domain::selection::SelectionModel;
use crate::domain::timeline::{TimelineController, TimelineEffect};
use crate::utils::time::format_time;

/// One recorded interaction, as found in replay scripts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    PointerDown { handle: Handle },
    PointerMove { x: f64 },
    PointerUp,
    Click { x: f64 },
    Resize { left: f64, width: f64 },
    SetStart { text: String },
    SetEnd { text: String },
    AddChunk,
    DeleteChunk { id: ChunkId },
    SelectChunk { id: ChunkId },
    AutoSplit,
    Reset,
    Preview,
    TimeUpdate { t: f64 },
    Seek { t: f64 },
}

#[derive(Debug, Default)]
pub struct EditorSession {
    video: Option<VideoSource>,
    selection: SelectionModel,
    chunks: ChunkRegistry,
    timeline: TimelineController,
    playback: PlaybackState,
    notifications: Vec<Notification>,
}

impl EditorSession {
    pub fn new(geometry: TimelineGeometry) -> Self {
        Self {
            timeline: TimelineController::new(geometry),
            ..Self::default()
        }
    }

    pub fn video(&self) -> Option<&VideoSource> {
        self.video.as_ref()
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn chunks(&self) -> &ChunkRegistry {
        &self.chunks
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn drag_state(&self) -> DragState {
        self.timeline.drag_state()
    }

    fn notify(&mut self, notification: Notification) {
        debug!("Notification: {}", notification);
        self.notifications.push(notification);
    }

    /// Take every notification queued since the last drain
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Replace the loaded video; chunks and selection of the old one are dropped
    pub fn load_video(&mut self, source: VideoSource) -> Result<(), DomainError> {
        if let Err(e) = MediaTypeRule::validate(&source.media_type) {
            self.notify(Notification::error("Please select a valid video file"));
            return Err(e);
        }

        info!(
            "Loaded {} ({}, {})",
            source.file_name,
            format_time(source.duration),
            source.media_type
        );
        self.selection = SelectionModel::new(source.duration);
        self.chunks.clear();
        self.playback = PlaybackState::default();
        self.timeline.pointer_up();
        let message = format!("Video loaded: {}", source.file_name);
        self.video = Some(source);
        self.notify(Notification::success(message));
        Ok(())
    }

    pub fn pointer_down(&mut self, handle: Handle) {
        if self.video.is_some() {
            self.timeline.pointer_down(handle);
        }
    }

    pub fn pointer_move(&mut self, client_x: f64) -> TimelineEffect {
        let effect = self.timeline.pointer_move(client_x, &mut self.selection);
        if let TimelineEffect::Seek(t) = effect {
            if let Err(e) = self.move_playhead(t) {
                warn!("Playhead drag to {:.2}s rejected: {}", t, e);
                self.notify(Notification::error("Unable to seek"));
            }
        }
        effect
    }

    pub fn pointer_up(&mut self) {
        self.timeline.pointer_up();
    }

    /// Click on the strip away from any handle
    pub fn click_timeline(&mut self, client_x: f64) -> Result<(), DomainError> {
        let duration = self.selection.duration();
        match self.timeline.click(client_x, duration) {
            TimelineEffect::Seek(t) => self.seek(t),
            _ => Ok(()),
        }
    }

    pub fn resize(&mut self, geometry: TimelineGeometry) {
        self.timeline.set_geometry(geometry);
    }

    /// Move the playback position
    pub fn seek(&mut self, t: f64) -> Result<(), DomainError> {
        let result = self.move_playhead(t);
        if result.is_err() {
            self.notify(Notification::error("Unable to seek"));
        }
        result
    }

    fn move_playhead(&mut self, t: f64) -> Result<(), DomainError> {
        let video = self
            .video
            .as_ref()
            .ok_or_else(|| DomainError::SeekFailure("No video loaded".to_string()))?;
        if !t.is_finite() {
            return Err(DomainError::SeekFailure(format!("Cannot seek to {}", t)));
        }
        self.playback.position = t.max(0.0).min(video.duration);
        Ok(())
    }

    pub fn set_start_text(&mut self, text: &str) -> Result<(), DomainError> {
        let result = self.selection.set_start_text(text);
        if result.is_err() {
            self.notify(Notification::warning("Invalid start time"));
        }
        result
    }

    pub fn set_end_text(&mut self, text: &str) -> Result<(), DomainError> {
        let result = self.selection.set_end_text(text);
        if result.is_err() {
            self.notify(Notification::warning("Invalid end time"));
        }
        result
    }

    pub fn set_start(&mut self, t: f64) -> Result<(), DomainError> {
        let result = self.selection.set_start(t);
        if result.is_err() {
            self.notify(Notification::warning("Invalid start time"));
        }
        result
    }

    pub fn set_end(&mut self, t: f64) -> Result<(), DomainError> {
        let result = self.selection.set_end(t);
        if result.is_err() {
            self.notify(Notification::warning("Invalid end time"));
        }
        result
    }

    /// Commit the current selection as a chunk
    pub fn add_chunk(&mut self) -> Result<ChunkId, DomainError> {
        let added = self
            .chunks
            .add_chunk(self.selection.selection())
            .map(|chunk| (chunk.id(), chunk.as_selection()));

        match added {
            Ok((id, range)) => {
                self.notify(Notification::success(format!("Chunk added: {}", range)));
                Ok(id)
            }
            Err(e) => {
                self.notify(Notification::warning("Selection must be between 1 and 90 seconds"));
                Err(e)
            }
        }
    }

    /// Returns whether a chunk was removed
    pub fn delete_chunk(&mut self, id: ChunkId) -> bool {
        let removed = self.chunks.delete_chunk(id);
        if removed {
            self.notify(Notification::info("Chunk removed"));
        }
        removed
    }

    pub fn select_chunk(&mut self, id: ChunkId) -> Result<(), DomainError> {
        let selected = self.chunks.select(id).map(|chunk| chunk.id());
        match selected {
            Ok(_) => {
                let position = self.chunks.position(id).unwrap_or_default();
                self.notify(Notification::info(format!("Selected chunk {}", position)));
                Ok(())
            }
            Err(e) => {
                self.notify(Notification::warning(e.to_string()));
                Err(e)
            }
        }
    }

    /// Replace all chunks with consecutive 60 second pieces; returns the count
    pub fn auto_split(&mut self) -> usize {
        let duration = self.video.as_ref().map_or(0.0, |video| video.duration);
        let count = self.chunks.auto_split(duration).len();
        self.notify(Notification::success(format!(
            "Auto-split: {} chunks created",
            count
        )));
        count
    }

    pub fn reset_selection(&mut self) {
        self.selection.reset();
        self.chunks.clear_selection();
        self.notify(Notification::info("Timeline reset"));
    }

    /// Play the selected chunk, or the current selection when none is selected
    pub fn preview(&mut self) -> Result<Selection, DomainError> {
        let range = self
            .chunks
            .selected_chunk()
            .map(Chunk::as_selection)
            .unwrap_or_else(|| self.selection.selection());

        if let Err(e) = self.selection.load(range) {
            self.notify(Notification::warning("Invalid selection"));
            return Err(e);
        }

        if let Err(e) = self.move_playhead(range.start) {
            self.notify(Notification::error("Unable to seek for preview"));
            return Err(e);
        }

        self.playback.previewing = true;
        self.notify(Notification::info("Playing selected chunk"));
        Ok(range)
    }

    /// Playback tick; returns true when it ended a preview
    pub fn time_update(&mut self, t: f64) -> bool {
        if t.is_finite() {
            let duration = self.selection.duration();
            self.playback.position = t.max(0.0).min(duration);
        }

        if self.playback.previewing && t >= self.selection.end() - PREVIEW_END_MARGIN_SECONDS {
            self.playback.previewing = false;
            self.notify(Notification::info("Preview ended"));
            return true;
        }
        false
    }

    /// Project the current state into display instructions
    pub fn render(&self) -> DisplayFrame {
        display::render(&RenderInput {
            video: self.video.as_ref(),
            selection: &self.selection,
            chunks: &self.chunks,
            playback: &self.playback,
            geometry: self.timeline.geometry(),
        })
    }

    /// Dispatch a recorded event to its handler
    pub fn apply(&mut self, event: &SessionEvent) -> Result<(), DomainError> {
        match event {
            SessionEvent::PointerDown { handle } => self.pointer_down(*handle),
            SessionEvent::PointerMove { x } => {
                self.pointer_move(*x);
            }
            SessionEvent::PointerUp => self.pointer_up(),
            SessionEvent::Click { x } => self.click_timeline(*x)?,
            SessionEvent::Resize { left, width } => {
                self.resize(TimelineGeometry::new(*left, *width))
            }
            SessionEvent::SetStart { text } => self.set_start_text(text)?,
            SessionEvent::SetEnd { text } => self.set_end_text(text)?,
            SessionEvent::AddChunk => {
                self.add_chunk()?;
            }
            SessionEvent::DeleteChunk { id } => {
                self.delete_chunk(*id);
            }
            SessionEvent::SelectChunk { id } => self.select_chunk(*id)?,
            SessionEvent::AutoSplit => {
                self.auto_split();
            }
            SessionEvent::Reset => self.reset_selection(),
            SessionEvent::Preview => {
                self.preview()?;
            }
            SessionEvent::TimeUpdate { t } => {
                self.time_update(*t);
            }
            SessionEvent::Seek { t } => self.seek(*t)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
