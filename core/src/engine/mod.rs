//! Collaborator contracts for the render engine. The engine itself (frame
//! decode/compose/encode) lives outside this crate; the core only drives
//! these trait surfaces.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::model::clip::{MediaSource, Transform};

/// Registry-assigned sprite identifier. Sprites have no native stable id;
/// the mapping registry hands one out on first registration.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SpriteId(Uuid);

impl SpriteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SpriteId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SpriteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Time window of a sprite on the render timeline, in microseconds.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TimeWindow {
    pub offset_us: u64,
    pub duration_us: u64,
}

/// One visible/audible element owned by the render engine. The core only
/// touches the time window and transform it is permitted to mutate.
pub trait RenderSprite: Send {
    fn time_window(&self) -> TimeWindow;
    fn set_time_window(&mut self, window: TimeWindow);
    fn transform(&self) -> Transform;
    fn set_transform(&mut self, transform: Transform);
}

pub type SharedSprite = Arc<Mutex<dyn RenderSprite>>;

pub trait RenderEngine: Send {
    fn create_sprite(&mut self, source: &MediaSource) -> Result<SharedSprite, CoreError>;

    fn remove_sprite(&mut self, sprite: &SharedSprite) -> Result<(), CoreError>;

    /// Splits the sprite's source at a source-relative microsecond offset,
    /// producing two new sprites. The original handle is consumed.
    fn split_sprite(
        &mut self,
        sprite: &SharedSprite,
        source_offset_us: u64,
    ) -> Result<(SharedSprite, SharedSprite), CoreError>;

    fn play(&mut self, start_us: u64) -> Result<(), CoreError>;

    fn pause(&mut self) -> Result<(), CoreError>;

    fn preview_frame(&mut self, position_us: u64) -> Result<(), CoreError>;

    fn create_output_stream(&mut self) -> Result<(), CoreError>;
}

pub type SharedEngine = Arc<Mutex<dyn RenderEngine>>;
