//! Timeline interaction: pointer positions to times, and the drag state machine

use tracing::trace;

use crate::domain::model::{DragState, Handle, TimelineGeometry};
use crate::domain::selection::SelectionModel;

/// What a pointer event asks the session to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineEffect {
    /// Nothing changed
    None,
    /// The selection model was updated in place
    SelectionChanged,
    /// Playback should move to this time
    Seek(f64),
}

/// Drives drag transitions for the start, end and playhead handles
#[derive(Debug, Clone, Default)]
pub struct TimelineController {
    drag: DragState,
    geometry: TimelineGeometry,
}

impl TimelineController {
    pub fn new(geometry: TimelineGeometry) -> Self {
        Self {
            drag: DragState::None,
            geometry,
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn geometry(&self) -> TimelineGeometry {
        self.geometry
    }

    /// New on-screen bounds after a layout change
    pub fn set_geometry(&mut self, geometry: TimelineGeometry) {
        self.geometry = geometry;
    }

    /// Map a horizontal pointer coordinate to a time in `[0, duration]`
    ///
    /// Offsets outside the strip clamp to its edges, so the mapping is
    /// monotonic and never leaves the video.
    pub fn position_to_time(&self, client_x: f64, duration: f64) -> f64 {
        let width = self.geometry.width.max(1.0);
        let offset = (client_x - self.geometry.left).max(0.0).min(width);
        (offset / width) * duration
    }

    /// Pointer pressed on a handle
    pub fn pointer_down(&mut self, handle: Handle) {
        self.drag = DragState::from(handle);
        trace!("Drag started: {:?}", self.drag);
    }

    /// Pointer or touch released anywhere
    pub fn pointer_up(&mut self) {
        if self.drag.is_dragging() {
            trace!("Drag ended: {:?}", self.drag);
        }
        self.drag = DragState::None;
    }

    /// Pointer moved; only meaningful while dragging
    pub fn pointer_move(&mut self, client_x: f64, selection: &mut SelectionModel) -> TimelineEffect {
        let duration = selection.duration();
        match self.drag {
            DragState::None => TimelineEffect::None,
            DragState::DraggingStart => {
                let time = self.position_to_time(client_x, duration);
                if selection.drag_start(time) {
                    TimelineEffect::SelectionChanged
                } else {
                    TimelineEffect::None
                }
            }
            DragState::DraggingEnd => {
                let time = self.position_to_time(client_x, duration);
                if selection.drag_end(time) {
                    TimelineEffect::SelectionChanged
                } else {
                    TimelineEffect::None
                }
            }
            DragState::DraggingPlayhead => {
                let time = self.position_to_time(client_x, duration);
                TimelineEffect::Seek(time.max(0.0).min(duration))
            }
        }
    }

    /// Click on the strip itself (not on a handle)
    pub fn click(&self, client_x: f64, duration: f64) -> TimelineEffect {
        TimelineEffect::Seek(self.position_to_time(client_x, duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Selection;

    fn controller() -> TimelineController {
        TimelineController::new(TimelineGeometry::new(100.0, 500.0))
    }

    #[test]
    fn test_position_to_time_scales_linearly() {
        let timeline = controller();
        assert_eq!(timeline.position_to_time(100.0, 200.0), 0.0);
        assert_eq!(timeline.position_to_time(350.0, 200.0), 100.0);
        assert_eq!(timeline.position_to_time(600.0, 200.0), 200.0);
    }

    #[test]
    fn test_position_to_time_clamps_outside_bounds() {
        let timeline = controller();
        assert_eq!(timeline.position_to_time(-1_000.0, 200.0), 0.0);
        assert_eq!(timeline.position_to_time(99.0, 200.0), 0.0);
        assert_eq!(timeline.position_to_time(601.0, 200.0), 200.0);
        assert_eq!(timeline.position_to_time(1e9, 200.0), 200.0);
        assert_eq!(timeline.position_to_time(f64::NAN, 200.0), 0.0);
    }

    #[test]
    fn test_position_to_time_is_monotonic() {
        let timeline = controller();
        let mut previous = f64::NEG_INFINITY;
        let mut x = -50.0;
        while x < 700.0 {
            let t = timeline.position_to_time(x, 93.7);
            assert!(t >= previous);
            assert!((0.0..=93.7).contains(&t));
            previous = t;
            x += 3.3;
        }
    }

    #[test]
    fn test_zero_width_timeline_does_not_divide_by_zero() {
        let timeline = TimelineController::new(TimelineGeometry::new(0.0, 0.0));
        assert_eq!(timeline.position_to_time(0.5, 100.0), 50.0);
        assert_eq!(timeline.position_to_time(10.0, 100.0), 100.0);
    }

    #[test]
    fn test_move_without_drag_does_nothing() {
        let mut timeline = controller();
        let mut selection = SelectionModel::new(200.0);
        assert_eq!(timeline.pointer_move(150.0, &mut selection), TimelineEffect::None);
        assert_eq!(selection.selection(), Selection::new(0.0, 60.0));
    }

    #[test]
    fn test_dragging_start_respects_end() {
        let mut timeline = controller();
        let mut selection = SelectionModel::new(200.0);
        timeline.pointer_down(Handle::Start);
        assert_eq!(timeline.drag_state(), DragState::DraggingStart);

        // 125px into a 500px strip of a 200s video is 50s
        assert_eq!(timeline.pointer_move(225.0, &mut selection), TimelineEffect::SelectionChanged);
        assert_eq!(selection.start(), 50.0);

        // 70s would cross the end at 60s
        assert_eq!(timeline.pointer_move(275.0, &mut selection), TimelineEffect::None);
        assert_eq!(selection.start(), 50.0);

        timeline.pointer_up();
        assert_eq!(timeline.drag_state(), DragState::None);
        assert_eq!(timeline.pointer_move(100.0, &mut selection), TimelineEffect::None);
        assert_eq!(selection.start(), 50.0);
    }

    #[test]
    fn test_dragging_end_respects_start() {
        let mut timeline = controller();
        let mut selection = SelectionModel::new(200.0);
        selection.set_start(40.0).unwrap();
        timeline.pointer_down(Handle::End);

        assert_eq!(timeline.pointer_move(350.0, &mut selection), TimelineEffect::SelectionChanged);
        assert_eq!(selection.end(), 100.0);

        assert_eq!(timeline.pointer_move(150.0, &mut selection), TimelineEffect::None);
        assert_eq!(selection.end(), 100.0);

        assert_eq!(timeline.pointer_move(5_000.0, &mut selection), TimelineEffect::SelectionChanged);
        assert_eq!(selection.end(), 200.0);
    }

    #[test]
    fn test_dragging_playhead_seeks_without_touching_selection() {
        let mut timeline = controller();
        let mut selection = SelectionModel::new(200.0);
        timeline.pointer_down(Handle::Playhead);

        assert_eq!(timeline.pointer_move(600.0, &mut selection), TimelineEffect::Seek(200.0));
        assert_eq!(timeline.pointer_move(0.0, &mut selection), TimelineEffect::Seek(0.0));
        assert_eq!(selection.selection(), Selection::new(0.0, 60.0));
    }

    #[test]
    fn test_pointer_down_replaces_previous_drag() {
        let mut timeline = controller();
        timeline.pointer_down(Handle::Start);
        timeline.pointer_down(Handle::End);
        assert_eq!(timeline.drag_state(), DragState::DraggingEnd);
    }

    #[test]
    fn test_click_seeks() {
        let timeline = controller();
        assert_eq!(timeline.click(350.0, 80.0), TimelineEffect::Seek(40.0));
    }
}
