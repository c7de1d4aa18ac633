mod common;

use std::sync::{Arc, Mutex};

use editor_core::error::CoreError;
use editor_core::playback::PlaybackState;

use common::session_with_clips;

#[test]
fn test_play_drives_engine_once() {
    let (mut session, engine, _, _) = session_with_clips(&[(0, 5000)]);

    session.playback_mut().play(Some(1000)).expect("Failed to play");
    assert_eq!(session.playback().state(), PlaybackState::Playing);
    assert!(session.store().with_project(|p| p.is_playing).unwrap());
    assert_eq!(
        session.store().with_project(|p| p.playhead_ms).unwrap(),
        1000
    );

    // Playing again is a no-op.
    session.playback_mut().play(None).expect("Failed to play");
    assert_eq!(engine.lock().unwrap().play_calls, vec![1_000_000]);
}

#[test]
fn test_play_resumes_from_playhead() {
    let (mut session, engine, _, _) = session_with_clips(&[(0, 5000)]);
    session.store().set_playhead(2500).unwrap();

    session.playback_mut().play(None).expect("Failed to play");
    assert_eq!(engine.lock().unwrap().play_calls, vec![2_500_000]);
}

#[test]
fn test_play_failure_reverts_state() {
    let (mut session, engine, _, _) = session_with_clips(&[(0, 5000)]);
    engine.lock().unwrap().fail_play = true;

    let err = session
        .playback_mut()
        .play(Some(0))
        .expect_err("Expected play to fail");
    assert!(matches!(err, CoreError::Playback(_)));
    assert_eq!(session.playback().state(), PlaybackState::Stopped);
    assert!(!session.store().with_project(|p| p.is_playing).unwrap());
}

#[test]
fn test_pause_and_stop() {
    let (mut session, engine, _, _) = session_with_clips(&[(0, 5000)]);
    session.playback_mut().play(Some(2000)).unwrap();

    session.playback_mut().pause().expect("Failed to pause");
    assert_eq!(session.playback().state(), PlaybackState::Paused);
    assert!(!session.store().with_project(|p| p.is_playing).unwrap());
    assert_eq!(engine.lock().unwrap().pause_calls, 1);
    // Pause keeps the playhead where it was.
    assert_eq!(
        session.store().with_project(|p| p.playhead_ms).unwrap(),
        2000
    );

    session.playback_mut().stop().expect("Failed to stop");
    assert_eq!(session.playback().state(), PlaybackState::Stopped);
    assert_eq!(session.store().with_project(|p| p.playhead_ms).unwrap(), 0);
    assert!(engine.lock().unwrap().preview_calls.contains(&0));
}

#[test]
fn test_seek_clamps_to_project_duration() {
    let (mut session, engine, _, _) = session_with_clips(&[(0, 5000)]);

    let landed = session
        .playback_mut()
        .seek_to(99_999)
        .expect("Failed to seek");
    assert_eq!(landed, 5000);
    assert_eq!(session.store().with_project(|p| p.playhead_ms).unwrap(), 5000);
    assert_eq!(engine.lock().unwrap().preview_calls, vec![5_000_000]);
}

#[test]
fn test_skip_back_and_forward() {
    let (mut session, _, _, _) = session_with_clips(&[(0, 5000)]);
    session.playback_mut().seek_to(3000).unwrap();

    assert_eq!(session.playback_mut().skip_back(2.0).unwrap(), 1000);
    // Skipping past zero saturates.
    assert_eq!(session.playback_mut().skip_back(10.0).unwrap(), 0);
    // Skipping past the end clamps to the duration.
    assert_eq!(session.playback_mut().skip_forward(60.0).unwrap(), 5000);
}

#[test]
fn test_engine_time_updates_never_echo_back() {
    let (mut session, engine, _, _) = session_with_clips(&[(0, 5000)]);
    let observed = Arc::new(Mutex::new(Vec::new()));
    let sink = observed.clone();
    session
        .playback_mut()
        .add_time_listener(move |ms| sink.lock().unwrap().push(ms));

    session.playback_mut().on_engine_time(2_500_000);

    assert_eq!(session.store().with_project(|p| p.playhead_ms).unwrap(), 2500);
    assert_eq!(*observed.lock().unwrap(), vec![2500]);
    // The engine already sits at this position; no preview was requested.
    assert!(engine.lock().unwrap().preview_calls.is_empty());
}

#[test]
fn test_engine_state_callbacks_update_domain() {
    let (mut session, engine, _, _) = session_with_clips(&[(0, 5000)]);

    session.playback_mut().on_engine_playing();
    assert_eq!(session.playback().state(), PlaybackState::Playing);
    assert!(session.store().with_project(|p| p.is_playing).unwrap());

    session.playback_mut().on_engine_paused();
    assert_eq!(session.playback().state(), PlaybackState::Paused);
    assert!(!session.store().with_project(|p| p.is_playing).unwrap());

    // Neither callback drove the engine.
    let engine = engine.lock().unwrap();
    assert!(engine.play_calls.is_empty());
    assert_eq!(engine.pause_calls, 0);
}

#[test]
fn test_export_is_single_flight() {
    let (mut session, engine, _, _) = session_with_clips(&[(0, 5000)]);

    session.export_mut().start().expect("Failed to start export");
    assert!(session.export().in_progress());
    let err = session
        .export_mut()
        .start()
        .expect_err("Expected a rejected second export");
    assert!(matches!(err, CoreError::ExportInProgress));

    session.export_mut().finish();
    session.export_mut().start().expect("Failed to restart export");
    assert_eq!(engine.lock().unwrap().output_streams, 2);
}
