//! Display projection: editor state in, drawing instructions out
//!
//! Nothing here reads back from the presentation layer. Front ends call
//! [`render`] after a selection change, a resize or a playback tick and draw
//! whatever the returned [`DisplayFrame`] says.

use serde::Serialize;

use crate::domain::chunks::ChunkRegistry;
use crate::domain::model::{ChunkId, PlaybackState, TimelineGeometry, VideoSource};
use crate::domain::rules::DurationRule;
use crate::domain::selection::SelectionModel;
use crate::utils::time::{format_bytes, format_time};

/// Number of thumbnail slots along the timeline
pub const FILMSTRIP_FRAMES: usize = 10;

/// Narrowest thumbnail slot, in pixels
pub const FILMSTRIP_MIN_FRAME_WIDTH: f64 = 40.0;

pub const VALID_GLYPH: &str = "✅";
pub const INVALID_GLYPH: &str = "❌";

/// Borrowed view of everything the projection reads
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub video: Option<&'a VideoSource>,
    pub selection: &'a SelectionModel,
    pub chunks: &'a ChunkRegistry,
    pub playback: &'a PlaybackState,
    pub geometry: TimelineGeometry,
}

/// Selection handles and highlight on the timeline strip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub width_px: f64,
    pub start_px: f64,
    pub end_px: f64,
    pub playhead_px: f64,
    pub highlight_left_pct: f64,
    pub highlight_width_pct: f64,
}

/// Text next to the timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionLabels {
    pub start: String,
    pub end: String,
    pub duration: String,
    pub valid: bool,
    pub glyph: &'static str,
}

/// One card in the chunk list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkRow {
    pub index: usize,
    pub id: ChunkId,
    pub title: String,
    pub start: String,
    pub end: String,
    pub duration: String,
    pub selected: bool,
}

/// Header facts about the loaded file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSummary {
    pub file_name: String,
    pub total_duration: String,
    pub file_size: String,
    pub resolution: String,
    pub chunk_count: usize,
}

/// Thumbnail slot and the time its frame is captured at
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmstripSlot {
    pub left_px: f64,
    pub width_px: f64,
    pub capture_time: f64,
}

/// Everything a front end needs to draw one frame of the editor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayFrame {
    pub timeline: TimelineLayout,
    pub labels: SelectionLabels,
    pub chunks: Vec<ChunkRow>,
    pub summary: Option<VideoSummary>,
    pub filmstrip: Vec<FilmstripSlot>,
    pub previewing: bool,
}

/// Project editor state into display instructions
pub fn render(input: &RenderInput<'_>) -> DisplayFrame {
    let duration = input.selection.duration();
    let width = input.geometry.render_width();
    let pixels_per_second = if duration > 0.0 { width / duration } else { 0.0 };

    let start = input.selection.start().max(0.0).min(duration);
    let end = input.selection.end().max(0.0).min(duration);

    let (highlight_left_pct, highlight_width_pct) = if duration > 0.0 {
        ((start / duration) * 100.0, ((end - start) / duration) * 100.0)
    } else {
        (0.0, 0.0)
    };

    let playhead_px = (input.playback.position * pixels_per_second).max(0.0).min(width);

    let timeline = TimelineLayout {
        width_px: width,
        start_px: start * pixels_per_second,
        end_px: end * pixels_per_second,
        playhead_px,
        highlight_left_pct,
        highlight_width_pct,
    };

    let span = (end - start).max(0.0);
    let valid = DurationRule::is_valid(span);
    let labels = SelectionLabels {
        start: format_time(start),
        end: format_time(end),
        duration: format_time(span),
        valid,
        glyph: if valid { VALID_GLYPH } else { INVALID_GLYPH },
    };

    let selected = input.chunks.selected_id();
    let chunks = input
        .chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| ChunkRow {
            index: index + 1,
            id: chunk.id(),
            title: format!("Chunk {}", index + 1),
            start: format_time(chunk.start()),
            end: format_time(chunk.end()),
            duration: format_time(chunk.duration()),
            selected: selected == Some(chunk.id()),
        })
        .collect();

    let summary = input.video.map(|video| VideoSummary {
        file_name: video.file_name.clone(),
        total_duration: format_time(video.duration),
        file_size: format_bytes(video.size_bytes),
        resolution: video
            .resolution
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string()),
        chunk_count: input.chunks.len(),
    });

    let filmstrip = if input.video.is_some() {
        filmstrip_slots(width, duration)
    } else {
        Vec::new()
    };

    DisplayFrame {
        timeline,
        labels,
        chunks,
        summary,
        filmstrip,
        previewing: input.playback.previewing,
    }
}

/// Evenly spaced thumbnail slots across the strip
pub fn filmstrip_slots(width: f64, duration: f64) -> Vec<FilmstripSlot> {
    let frame_width = FILMSTRIP_MIN_FRAME_WIDTH.max((width / FILMSTRIP_FRAMES as f64).floor());
    let step = duration / FILMSTRIP_FRAMES as f64;
    let last_frame = (duration - 0.01).max(0.0);

    (0..FILMSTRIP_FRAMES)
        .map(|i| FilmstripSlot {
            left_px: frame_width * i as f64,
            width_px: frame_width,
            capture_time: (step * i as f64).min(last_frame),
        })
        .collect()
}
