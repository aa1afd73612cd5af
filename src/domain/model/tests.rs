// Unit tests for domain models

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::domain::errors::*;
    use crate::domain::model::*;

    #[test]
    fn test_selection_duration() {
        let selection = Selection::new(10.0, 25.5);
        assert_eq!(selection.duration(), 15.5);
        assert_eq!(format!("{}", selection), "00:00:10 - 00:00:25");
    }

    #[test]
    fn test_chunk_duration_is_derived() {
        let chunk = Chunk::new(ChunkId(7), 60.0, 120.0);
        assert_eq!(chunk.id(), ChunkId(7));
        assert_eq!(chunk.duration(), 60.0);
        assert_eq!(chunk.as_selection(), Selection::new(60.0, 120.0));
    }

    #[test]
    fn test_video_source_takes_file_name_from_path() {
        let source = VideoSource::new(PathBuf::from("/tmp/clips/holiday.mp4"), "video/mp4", 1024, 30.0)
            .unwrap()
            .with_resolution(1920, 1080);
        assert_eq!(source.file_name, "holiday.mp4");
        assert_eq!(source.resolution.unwrap().to_string(), "1920x1080");
    }

    #[test]
    fn test_video_source_rejects_bad_duration() {
        let result = VideoSource::new(PathBuf::from("a.mp4"), "video/mp4", 1, f64::NAN);
        assert!(matches!(result, Err(DomainError::ProbeFailed(_))));
        assert!(VideoSource::new(PathBuf::from("a.mp4"), "video/mp4", 1, -1.0).is_err());
    }

    #[test]
    fn test_zero_resolution_is_ignored() {
        let source = VideoSource::new(PathBuf::from("a.mp4"), "video/mp4", 1, 1.0)
            .unwrap()
            .with_resolution(0, 720);
        assert!(source.resolution.is_none());
    }

    #[test]
    fn test_drag_state_from_handle() {
        assert_eq!(DragState::from(Handle::Start), DragState::DraggingStart);
        assert_eq!(DragState::from(Handle::End), DragState::DraggingEnd);
        assert_eq!(DragState::from(Handle::Playhead), DragState::DraggingPlayhead);
        assert!(!DragState::default().is_dragging());
    }

    #[test]
    fn test_geometry_render_width_fallback() {
        assert_eq!(TimelineGeometry::new(0.0, 0.0).render_width(), 600.0);
        assert_eq!(TimelineGeometry::new(12.0, 800.0).render_width(), 800.0);
    }

    #[test]
    fn test_handle_deserializes_snake_case() {
        let handle: Handle = serde_json::from_str("\"playhead\"").unwrap();
        assert_eq!(handle, Handle::Playhead);
    }
}
