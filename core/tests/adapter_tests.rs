mod common;

use editor_core::adapter::{display_map, display_metadata, rows_to_tracks, tracks_to_rows};
use editor_core::model::{ActionRecord, Clip, ClipKind, Row, Track, Vec2};
use uuid::Uuid;

use common::video_clip;

fn sample_tracks() -> Vec<Track> {
    let mut video = Track::new("Video 1", ClipKind::Video);
    let mut clip = video_clip(1000, 2000);
    clip.trim_start_ms = 250;
    clip.trim_end_ms = 100;
    clip.transform.position = Vec2::new(64.0, 32.0);
    clip.effects.push(editor_core::model::EffectConfig {
        name: "blur".to_string(),
        params: serde_json::json!({ "radius": 4 }),
    });
    video.add_clip(clip);
    video.add_clip(video_clip(5000, 1500));

    let mut audio = Track::new("Audio 1", ClipKind::Audio);
    audio.add_clip(Clip::create_audio(
        "file:///a.mp3",
        "a.mp3",
        0,
        4000,
        Some(240_000),
    ));
    vec![video, audio]
}

#[test]
fn test_round_trip_preserves_everything() {
    let tracks = sample_tracks();
    let rows = tracks_to_rows(&tracks);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].actions.len(), 2);

    // Timing survives the ms -> secs -> ms round trip exactly, and the
    // non-timing clip fields (trim, source, transform, effects) are
    // preserved from the originals.
    let back = rows_to_tracks(&rows, &tracks);
    assert_eq!(tracks, back);
}

#[test]
fn test_action_timing_is_in_seconds() {
    let tracks = sample_tracks();
    let rows = tracks_to_rows(&tracks);
    let action = &rows[0].actions[0];
    assert_eq!(action.start_secs, 1.0);
    assert_eq!(action.end_secs, 3.0);
    assert_eq!(action.duration_secs(), 2.0);
}

#[test]
fn test_locked_track_actions_are_immutable() {
    let mut tracks = sample_tracks();
    tracks[0].locked = true;
    let rows = tracks_to_rows(&tracks);
    for action in &rows[0].actions {
        assert!(!action.movable);
        assert!(!action.resizable);
    }
    for action in &rows[1].actions {
        assert!(action.movable);
        assert!(action.resizable);
    }
}

#[test]
fn test_row_edit_writes_back_onto_clip() {
    let tracks = sample_tracks();
    let mut rows = tracks_to_rows(&tracks);
    rows[0].actions[0].start_secs = 2.5;
    rows[0].actions[0].end_secs = 4.5;
    rows[0].actions[0].selected = true;

    let back = rows_to_tracks(&rows, &tracks);
    let clip = &back[0].clips[0];
    assert_eq!(clip.start_ms, 2500);
    assert_eq!(clip.duration_ms, 2000);
    assert!(clip.selected);
    // Non-timing fields untouched.
    assert_eq!(clip.trim_start_ms, 250);
    assert_eq!(clip.source, tracks[0].clips[0].source);
}

#[test]
fn test_unknown_action_synthesizes_default_clip() {
    let tracks = sample_tracks();
    let injected = ActionRecord {
        id: Uuid::new_v4(),
        start_secs: 1.0,
        end_secs: 2.0,
        movable: true,
        resizable: true,
        selected: false,
    };
    let rows = vec![Row {
        id: tracks[0].id,
        actions: vec![injected.clone()],
    }];

    let back = rows_to_tracks(&rows, &tracks);
    let clip = &back[0].clips[0];
    assert_eq!(clip.id, injected.id);
    assert_eq!(clip.kind, ClipKind::Video);
    assert_eq!(clip.start_ms, 1000);
    assert_eq!(clip.duration_ms, 1000);
    assert!(clip.source.uri.is_empty());
}

#[test]
fn test_unknown_row_synthesizes_default_track() {
    let rows = vec![Row {
        id: Uuid::new_v4(),
        actions: Vec::new(),
    }];
    let back = rows_to_tracks(&rows, &[]);
    assert_eq!(back.len(), 1);
    assert_eq!(back[0].id, rows[0].id);
    assert_eq!(back[0].kind, ClipKind::Video);
}

#[test]
fn test_display_metadata_name_and_color() {
    let clip = video_clip(0, 1000);
    let meta = display_metadata(&clip);
    assert_eq!(meta.name, "demo.mp4");
    assert_eq!(meta.color, "#3b82f6");

    // Nameless sources fall back to the kind label.
    let unnamed = Clip::new(ClipKind::Audio, 0, 1000);
    let meta = display_metadata(&unnamed);
    assert_eq!(meta.name, "audio");
    assert_eq!(meta.color, "#22c55e");
}

#[test]
fn test_display_map_keyed_by_clip_id() {
    let tracks = sample_tracks();
    let map = display_map(&tracks);
    assert_eq!(map.len(), 3);
    let first = &tracks[0].clips[0];
    assert_eq!(map[&first.id].name, first.source.name);
}
