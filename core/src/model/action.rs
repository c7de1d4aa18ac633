use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clip::Clip;
use crate::util::time::ms_to_secs;

/// Widget-side projection of a clip. Derived from the domain model, never
/// authoritative; the id always equals the clip id.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ActionRecord {
    pub id: Uuid,
    pub start_secs: f64,
    pub end_secs: f64,
    #[serde(default = "default_true")]
    pub movable: bool,
    #[serde(default = "default_true")]
    pub resizable: bool,
    #[serde(default)]
    pub selected: bool,
}

fn default_true() -> bool {
    true
}

impl ActionRecord {
    pub fn from_clip(clip: &Clip) -> Self {
        Self {
            id: clip.id,
            start_secs: ms_to_secs(clip.start_ms),
            end_secs: ms_to_secs(clip.end_ms()),
            movable: true,
            resizable: true,
            selected: clip.selected,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// One row per track in the timeline widget.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Row {
    pub id: Uuid,
    pub actions: Vec<ActionRecord>,
}
