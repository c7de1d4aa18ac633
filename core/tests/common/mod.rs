#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use editor_core::engine::{RenderEngine, RenderSprite, SharedEngine, SharedSprite, TimeWindow};
use editor_core::error::CoreError;
use editor_core::model::{Clip, ClipKind, MediaSource, Project, Track, Transform};
use editor_core::EditorSession;
use uuid::Uuid;

pub struct MockSprite {
    pub window: TimeWindow,
    pub transform: Transform,
}

impl MockSprite {
    pub fn shared() -> SharedSprite {
        Arc::new(Mutex::new(MockSprite {
            window: TimeWindow::default(),
            transform: Transform::default(),
        }))
    }
}

impl RenderSprite for MockSprite {
    fn time_window(&self) -> TimeWindow {
        self.window
    }

    fn set_time_window(&mut self, window: TimeWindow) {
        self.window = window;
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }
}

#[derive(Default)]
pub struct MockEngine {
    pub sprites: Vec<SharedSprite>,
    pub play_calls: Vec<u64>,
    pub pause_calls: u32,
    pub preview_calls: Vec<u64>,
    pub output_streams: u32,
    pub fail_play: bool,
    pub fail_split: bool,
    pub fail_create: bool,
}

impl RenderEngine for MockEngine {
    fn create_sprite(&mut self, _source: &MediaSource) -> Result<SharedSprite, CoreError> {
        if self.fail_create {
            return Err(CoreError::Engine("create refused".to_string()));
        }
        let sprite = MockSprite::shared();
        self.sprites.push(sprite.clone());
        Ok(sprite)
    }

    fn remove_sprite(&mut self, sprite: &SharedSprite) -> Result<(), CoreError> {
        self.sprites.retain(|s| !Arc::ptr_eq(s, sprite));
        Ok(())
    }

    fn split_sprite(
        &mut self,
        sprite: &SharedSprite,
        _source_offset_us: u64,
    ) -> Result<(SharedSprite, SharedSprite), CoreError> {
        if self.fail_split {
            return Err(CoreError::Engine("split unsupported".to_string()));
        }
        self.sprites.retain(|s| !Arc::ptr_eq(s, sprite));
        let left = MockSprite::shared();
        let right = MockSprite::shared();
        self.sprites.push(left.clone());
        self.sprites.push(right.clone());
        Ok((left, right))
    }

    fn play(&mut self, start_us: u64) -> Result<(), CoreError> {
        if self.fail_play {
            return Err(CoreError::Engine("play failed".to_string()));
        }
        self.play_calls.push(start_us);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), CoreError> {
        self.pause_calls += 1;
        Ok(())
    }

    fn preview_frame(&mut self, position_us: u64) -> Result<(), CoreError> {
        self.preview_calls.push(position_us);
        Ok(())
    }

    fn create_output_stream(&mut self) -> Result<(), CoreError> {
        self.output_streams += 1;
        Ok(())
    }
}

pub fn mock_engine() -> (Arc<Mutex<MockEngine>>, SharedEngine) {
    let engine = Arc::new(Mutex::new(MockEngine::default()));
    let shared: SharedEngine = engine.clone();
    (engine, shared)
}

pub fn video_clip(start_ms: u64, duration_ms: u64) -> Clip {
    Clip::create_video(
        "file:///media/demo.mp4",
        "demo.mp4",
        start_ms,
        duration_ms,
        Some(600_000),
    )
}

/// Session with one video track and one imported clip per `(start, duration)`
/// pair, so every clip has a registered sprite mapping.
pub fn session_with_clips(
    clips: &[(u64, u64)],
) -> (EditorSession, Arc<Mutex<MockEngine>>, Uuid, Vec<Uuid>) {
    let (engine, shared) = mock_engine();
    let mut project = Project::new("Test Project");
    let track = Track::new("Video 1", ClipKind::Video);
    let track_id = track.id;
    project.add_track(track);
    let session = EditorSession::new(project, shared);
    let mut clip_ids = Vec::new();
    for (start_ms, duration_ms) in clips {
        let clip = video_clip(*start_ms, *duration_ms);
        let id = session
            .edit()
            .import_clip(track_id, clip)
            .expect("Failed to import clip");
        clip_ids.push(id);
    }
    (session, engine, track_id, clip_ids)
}
