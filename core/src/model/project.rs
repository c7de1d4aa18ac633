use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clip::Clip;
use super::track::Track;

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub playhead_ms: u64,
    #[serde(default)]
    pub is_playing: bool,
}

impl Project {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tracks: Vec::new(),
            playhead_ms: 0,
            is_playing: false,
        }
    }

    pub fn load(json_str: &str) -> Result<Self, serde_json::Error> {
        let project: Project = serde_json::from_str(json_str)?;
        Ok(project)
    }

    pub fn save(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// End of the last clip on any track.
    pub fn duration_ms(&self) -> u64 {
        self.tracks
            .iter()
            .flat_map(|t| t.clips.iter())
            .map(|c| c.end_ms())
            .max()
            .unwrap_or(0)
    }

    pub fn add_track(&mut self, track: Track) -> Uuid {
        let id = track.id;
        self.tracks.push(track);
        id
    }

    pub fn remove_track(&mut self, track_id: Uuid) -> Option<Track> {
        let index = self.tracks.iter().position(|t| t.id == track_id)?;
        Some(self.tracks.remove(index))
    }

    pub fn get_track(&self, track_id: Uuid) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    pub fn get_track_mut(&mut self, track_id: Uuid) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == track_id)
    }

    pub fn get_clip(&self, clip_id: Uuid) -> Option<&Clip> {
        self.tracks.iter().find_map(|t| t.get_clip(clip_id))
    }

    pub fn get_clip_mut(&mut self, clip_id: Uuid) -> Option<&mut Clip> {
        self.tracks.iter_mut().find_map(|t| t.get_clip_mut(clip_id))
    }

    pub fn track_of_clip(&self, clip_id: Uuid) -> Option<Uuid> {
        self.tracks
            .iter()
            .find(|t| t.get_clip(clip_id).is_some())
            .map(|t| t.id)
    }
}
