use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clip::{Clip, ClipKind};

/// Ordered container of clips. Z-order is the track's index in
/// `Project::tracks`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Track {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ClipKind,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub clips: Vec<Clip>,
}

fn default_visible() -> bool {
    true
}

fn default_height() -> f64 {
    48.0
}

impl Track {
    pub fn new(name: &str, kind: ClipKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            visible: true,
            muted: false,
            locked: false,
            height: default_height(),
            clips: Vec::new(),
        }
    }

    pub fn get_clip(&self, clip_id: Uuid) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == clip_id)
    }

    pub fn get_clip_mut(&mut self, clip_id: Uuid) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == clip_id)
    }

    /// Inserts a clip keeping the list ordered by start time.
    pub fn add_clip(&mut self, clip: Clip) {
        self.clips.push(clip);
        self.clips.sort_by_key(|c| c.start_ms);
    }

    pub fn remove_clip(&mut self, clip_id: Uuid) -> Option<Clip> {
        let index = self.clips.iter().position(|c| c.id == clip_id)?;
        Some(self.clips.remove(index))
    }

    /// True if the candidate window intersects any clip on this track other
    /// than the excluded one. Callers use this as a collision policy; the
    /// edit operations never enforce it themselves.
    pub fn has_overlap(&self, start_ms: u64, duration_ms: u64, exclude: Option<Uuid>) -> bool {
        let end_ms = start_ms + duration_ms;
        self.clips
            .iter()
            .filter(|c| Some(c.id) != exclude)
            .any(|c| start_ms < c.end_ms() && c.start_ms < end_ms)
    }

    /// Start and end boundaries of every clip except the excluded ones.
    pub fn clip_edges(&self, exclude: &[Uuid]) -> Vec<u64> {
        self.clips
            .iter()
            .filter(|c| !exclude.contains(&c.id))
            .flat_map(|c| [c.start_ms, c.end_ms()])
            .collect()
    }
}
