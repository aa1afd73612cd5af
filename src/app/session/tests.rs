use std::path::PathBuf;

use super::*;

fn video(duration: f64) -> VideoSource {
    VideoSource::new(PathBuf::from("/videos/holiday.mp4"), "video/mp4", 4096, duration)
        .unwrap()
        .with_resolution(1920, 1080)
}

/// Session with a 125 second video on a 600px strip starting at x = 0
fn loaded_session() -> EditorSession {
    let mut session = EditorSession::new(TimelineGeometry::new(0.0, 600.0));
    session.load_video(video(125.0)).unwrap();
    session.drain_notifications();
    session
}

fn messages(session: &mut EditorSession) -> Vec<String> {
    session
        .drain_notifications()
        .into_iter()
        .map(|n| n.message)
        .collect()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

mod loading {
    use super::*;

    #[test]
    fn test_load_resets_selection() {
        let mut session = EditorSession::default();
        session.load_video(video(125.0)).unwrap();

        assert_eq!(session.selection().selection(), Selection::new(0.0, 60.0));
        assert_eq!(session.video().unwrap().file_name, "holiday.mp4");
        assert_eq!(messages(&mut session), vec!["Video loaded: holiday.mp4"]);
    }

    #[test]
    fn test_short_video_selection_covers_all_of_it() {
        let mut session = EditorSession::default();
        session.load_video(video(42.5)).unwrap();
        assert_eq!(session.selection().selection(), Selection::new(0.0, 42.5));
    }

    #[test]
    fn test_rejects_non_video() {
        let mut session = EditorSession::default();
        let audio =
            VideoSource::new(PathBuf::from("song.mp3"), "audio/mpeg", 1024, 180.0).unwrap();

        let result = session.load_video(audio);

        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert!(session.video().is_none());
        let notes = session.drain_notifications();
        assert_eq!(notes[0].level, NotificationLevel::Error);
    }

    #[test]
    fn test_new_video_drops_old_chunks() {
        let mut session = loaded_session();
        session.auto_split();
        assert_eq!(session.chunks().len(), 3);

        session.load_video(video(30.0)).unwrap();

        assert!(session.chunks().is_empty());
        assert_eq!(session.chunks().selected_id(), None);
        assert_eq!(session.playback().position, 0.0);
    }
}

mod editing {
    use super::*;

    #[test]
    fn test_rejected_end_leaves_selection_untouched() {
        let mut session = loaded_session();
        session.set_start_text("00:00:10").unwrap();
        session.drain_notifications();

        let before = session.selection().selection();
        let result = session.set_end(5.0);

        assert!(matches!(result, Err(DomainError::InvalidSelection(_))));
        assert_eq!(session.selection().selection(), before);
        assert_eq!(messages(&mut session), vec!["Invalid end time"]);
    }

    #[test]
    fn test_start_text_past_video_is_rejected() {
        let mut session = loaded_session();
        assert!(session.set_start_text("00:05:00").is_err());
        assert_eq!(session.selection().start(), 0.0);
        assert_eq!(messages(&mut session), vec!["Invalid start time"]);
    }

    #[test]
    fn test_add_chunk_commits_and_selects() {
        let mut session = loaded_session();

        let id = session.add_chunk().unwrap();

        assert_eq!(session.chunks().len(), 1);
        assert_eq!(session.chunks().selected_id(), Some(id));
        assert_eq!(messages(&mut session), vec!["Chunk added: 00:00:00 - 00:01:00"]);
    }

    #[test]
    fn test_too_long_selection_is_not_committed() {
        let mut session = loaded_session();
        session.set_end_text("00:01:40").unwrap();
        session.drain_notifications();

        let result = session.add_chunk();

        assert!(matches!(result, Err(DomainError::InvalidDuration(_))));
        assert!(session.chunks().is_empty());
        assert_eq!(
            messages(&mut session),
            vec!["Selection must be between 1 and 90 seconds"]
        );
    }

    #[test]
    fn test_delete_selected_chunk_clears_pointer() {
        let mut session = loaded_session();
        let id = session.add_chunk().unwrap();

        assert!(session.delete_chunk(id));
        assert_eq!(session.chunks().selected_id(), None);
        assert!(!session.delete_chunk(id));
    }

    #[test]
    fn test_select_unknown_chunk() {
        let mut session = loaded_session();
        let result = session.select_chunk(ChunkId(99));
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_reset_clears_chunk_selection() {
        let mut session = loaded_session();
        session.set_start_text("00:00:20").unwrap();
        session.add_chunk().unwrap();
        session.drain_notifications();

        session.reset_selection();

        assert_eq!(session.selection().selection(), Selection::new(0.0, 60.0));
        assert_eq!(session.chunks().selected_id(), None);
        assert_eq!(session.chunks().len(), 1);
        assert_eq!(messages(&mut session), vec!["Timeline reset"]);
    }

    #[test]
    fn test_auto_split_reports_count() {
        let mut session = loaded_session();
        assert_eq!(session.auto_split(), 3);
        assert_eq!(messages(&mut session), vec!["Auto-split: 3 chunks created"]);

        let frame = session.render();
        assert_eq!(frame.chunks.len(), 3);
        assert_eq!(frame.summary.unwrap().chunk_count, 3);
    }
}

mod pointer {
    use super::*;

    #[test]
    fn test_drag_start_handle() {
        let mut session = loaded_session();

        session.pointer_down(Handle::Start);
        assert_eq!(session.drag_state(), DragState::DraggingStart);

        session.pointer_move(120.0);
        assert!(approx(session.selection().start(), 25.0));

        // Past the end handle: ignored
        session.pointer_move(600.0);
        assert!(approx(session.selection().start(), 25.0));

        session.pointer_up();
        assert_eq!(session.drag_state(), DragState::None);
        session.pointer_move(0.0);
        assert!(approx(session.selection().start(), 25.0));
    }

    #[test]
    fn test_drag_playhead_clamps_to_video() {
        let mut session = loaded_session();
        session.pointer_down(Handle::Playhead);

        session.pointer_move(300.0);
        assert_eq!(session.playback().position, 62.5);

        session.pointer_move(10_000.0);
        assert_eq!(session.playback().position, 125.0);

        session.pointer_move(-50.0);
        assert_eq!(session.playback().position, 0.0);
        assert!(session.drain_notifications().is_empty());
    }

    #[test]
    fn test_drag_playhead_with_unusable_pointer_stays_in_range() {
        let mut session = loaded_session();
        session.pointer_down(Handle::Playhead);
        session.pointer_move(300.0);

        let effect = session.pointer_move(f64::NAN);

        assert_eq!(effect, TimelineEffect::Seek(0.0));
        assert_eq!(session.playback().position, 0.0);
        assert!(session.drain_notifications().is_empty());
    }

    #[test]
    fn test_pointer_down_without_video_is_ignored() {
        let mut session = EditorSession::default();
        session.pointer_down(Handle::End);
        assert_eq!(session.drag_state(), DragState::None);
    }

    #[test]
    fn test_click_seeks() {
        let mut session = loaded_session();
        session.click_timeline(300.0).unwrap();
        assert_eq!(session.playback().position, 62.5);
    }

    #[test]
    fn test_resize_changes_mapping() {
        let mut session = loaded_session();
        session.resize(TimelineGeometry::new(100.0, 250.0));
        session.click_timeline(225.0).unwrap();
        assert_eq!(session.playback().position, 62.5);
    }
}

mod playback {
    use super::*;

    #[test]
    fn test_seek_without_video_fails() {
        let mut session = EditorSession::default();
        assert!(matches!(session.seek(3.0), Err(DomainError::SeekFailure(_))));
        assert!(matches!(
            session.click_timeline(10.0),
            Err(DomainError::SeekFailure(_))
        ));
        assert_eq!(messages(&mut session), vec!["Unable to seek", "Unable to seek"]);
    }

    #[test]
    fn test_seek_rejects_nan() {
        let mut session = loaded_session();
        session.seek(30.0).unwrap();
        assert!(session.seek(f64::NAN).is_err());
        assert_eq!(session.playback().position, 30.0);
    }

    #[test]
    fn test_preview_selected_chunk_until_its_end() {
        let mut session = loaded_session();
        session.auto_split();
        let second = session.chunks().chunks()[1].id();
        session.select_chunk(second).unwrap();
        assert_eq!(messages(&mut session), vec!["Auto-split: 3 chunks created", "Selected chunk 2"]);

        let range = session.preview().unwrap();

        assert_eq!(range, Selection::new(60.0, 120.0));
        assert_eq!(session.selection().selection(), range);
        assert_eq!(session.playback().position, 60.0);
        assert!(session.playback().previewing);
        assert!(session.render().previewing);

        assert!(!session.time_update(100.0));
        assert!(session.time_update(119.96));
        assert!(!session.playback().previewing);
        assert_eq!(
            messages(&mut session),
            vec!["Playing selected chunk", "Preview ended"]
        );
    }

    #[test]
    fn test_preview_without_chunk_uses_selection() {
        let mut session = loaded_session();
        session.set_start_text("00:00:15").unwrap();

        let range = session.preview().unwrap();

        assert_eq!(range, Selection::new(15.0, 60.0));
        assert_eq!(session.playback().position, 15.0);
    }

    #[test]
    fn test_preview_without_video_fails() {
        let mut session = EditorSession::default();
        assert!(session.preview().is_err());
        assert!(!session.playback().previewing);
    }

    #[test]
    fn test_time_update_outside_preview_only_tracks() {
        let mut session = loaded_session();
        assert!(!session.time_update(70.0));
        assert_eq!(session.playback().position, 70.0);
        assert!(session.drain_notifications().is_empty());
    }
}

mod replay {
    use super::*;

    #[test]
    fn test_recorded_events_drive_the_session() {
        let script = r#"[
            {"event": "pointer_down", "handle": "end"},
            {"event": "pointer_move", "x": 240},
            {"event": "pointer_up"},
            {"event": "add_chunk"},
            {"event": "seek", "t": 12.5}
        ]"#;
        let events: Vec<SessionEvent> = serde_json::from_str(script).unwrap();
        let mut session = loaded_session();

        for event in &events {
            session.apply(event).unwrap();
        }

        let chunk = &session.chunks().chunks()[0];
        assert_eq!(chunk.start(), 0.0);
        assert!(approx(chunk.end(), 50.0));
        assert_eq!(session.playback().position, 12.5);
    }

    #[test]
    fn test_failing_event_reports_error() {
        let mut session = loaded_session();
        let result = session.apply(&SessionEvent::SetEnd {
            text: "00:00:00".to_string(),
        });
        assert!(result.is_err());
        assert_eq!(session.selection().end(), 60.0);
    }
}
