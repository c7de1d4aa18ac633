use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")] // Serialize as "video", "image", etc.
pub enum ClipKind {
    Video,
    Audio,
    Image,
    Text,
}

impl std::fmt::Display for ClipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ClipKind::Video => "video",
            ClipKind::Audio => "audio",
            ClipKind::Image => "image",
            ClipKind::Text => "text",
        };
        write!(f, "{}", s)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Vec2 {
    pub x: OrderedFloat<f64>,
    pub y: OrderedFloat<f64>,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: OrderedFloat(x),
            y: OrderedFloat(y),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Transform {
    pub position: Vec2,
    pub size: Vec2,
    pub rotation: OrderedFloat<f64>,
    pub anchor: Vec2,
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::new(0.0, 0.0),
            size: Vec2::new(0.0, 0.0),
            rotation: OrderedFloat(0.0),
            anchor: Vec2::new(0.0, 0.0),
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

/// Reference to the media behind a clip. `duration_ms` is `None` for
/// unbounded sources (images, text).
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct MediaSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub thumbnail_uri: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct EffectConfig {
    pub name: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Clip {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ClipKind,
    #[serde(default)]
    pub start_ms: u64,
    pub duration_ms: u64,
    /// Offset into the source at which the visible window begins.
    #[serde(default)]
    pub trim_start_ms: u64,
    /// Amount trimmed off the source tail.
    #[serde(default)]
    pub trim_end_ms: u64,
    #[serde(default)]
    pub source: MediaSource,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub effects: Vec<EffectConfig>,
    #[serde(default)]
    pub selected: bool,
}

impl Clip {
    pub fn new(kind: ClipKind, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            start_ms,
            duration_ms,
            trim_start_ms: 0,
            trim_end_ms: 0,
            source: MediaSource::default(),
            transform: Transform::default(),
            effects: Vec::new(),
            selected: false,
        }
    }

    pub fn create_video(
        uri: &str,
        name: &str,
        start_ms: u64,
        duration_ms: u64,
        source_duration_ms: Option<u64>,
    ) -> Self {
        let mut clip = Self::new(ClipKind::Video, start_ms, duration_ms);
        clip.source.uri = uri.to_string();
        clip.source.name = name.to_string();
        clip.source.duration_ms = source_duration_ms;
        clip
    }

    pub fn create_audio(
        uri: &str,
        name: &str,
        start_ms: u64,
        duration_ms: u64,
        source_duration_ms: Option<u64>,
    ) -> Self {
        let mut clip = Self::new(ClipKind::Audio, start_ms, duration_ms);
        clip.source.uri = uri.to_string();
        clip.source.name = name.to_string();
        clip.source.duration_ms = source_duration_ms;
        clip
    }

    pub fn create_image(uri: &str, name: &str, start_ms: u64, duration_ms: u64) -> Self {
        let mut clip = Self::new(ClipKind::Image, start_ms, duration_ms);
        clip.source.uri = uri.to_string();
        clip.source.name = name.to_string();
        clip
    }

    pub fn create_text(text: &str, start_ms: u64, duration_ms: u64) -> Self {
        let mut clip = Self::new(ClipKind::Text, start_ms, duration_ms);
        clip.source.name = text.to_string();
        clip
    }

    pub fn end_ms(&self) -> u64 {
        self.start_ms + self.duration_ms
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.duration_ms == 0 {
            return Err(CoreError::Validation(format!(
                "Clip {} has zero duration",
                self.id
            )));
        }
        if let Some(source_duration) = self.source.duration_ms {
            if self.trim_start_ms + self.duration_ms > source_duration {
                return Err(CoreError::Validation(format!(
                    "Clip {} window exceeds source duration ({} + {} > {})",
                    self.id, self.trim_start_ms, self.duration_ms, source_duration
                )));
            }
        }
        Ok(())
    }
}
