//! Shared domain store. All mutation goes through command methods that
//! notify subscribed listeners, so the widget side can regenerate its rows.

use std::sync::{Arc, Mutex, RwLock};

use log::warn;
use uuid::Uuid;

use crate::error::CoreError;
use crate::model::clip::Clip;
use crate::model::project::Project;
use crate::model::track::Track;

type Listener = Box<dyn Fn() + Send>;

#[derive(Clone)]
pub struct ProjectStore {
    project: Arc<RwLock<Project>>,
    listeners: Arc<Mutex<Vec<Listener>>>,
}

impl ProjectStore {
    pub fn new(project: Project) -> Self {
        Self {
            project: Arc::new(RwLock::new(project)),
            listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn subscribe(&self, listener: impl Fn() + Send + 'static) {
        match self.listeners.lock() {
            Ok(mut listeners) => listeners.push(Box::new(listener)),
            Err(_) => warn!("Listener lock poisoned, subscription dropped"),
        }
    }

    fn notify(&self) {
        if let Ok(listeners) = self.listeners.lock() {
            for listener in listeners.iter() {
                listener();
            }
        }
    }

    /// Access the project immutably via a closure.
    pub fn with_project<R>(&self, f: impl FnOnce(&Project) -> R) -> Result<R, CoreError> {
        let guard = self
            .project
            .read()
            .map_err(|_| CoreError::Runtime("Project lock poisoned".to_string()))?;
        Ok(f(&guard))
    }

    /// Access the project mutably via a closure; listeners fire afterwards.
    pub fn with_project_mut<R>(&self, f: impl FnOnce(&mut Project) -> R) -> Result<R, CoreError> {
        let result = {
            let mut guard = self
                .project
                .write()
                .map_err(|_| CoreError::Runtime("Project lock poisoned".to_string()))?;
            f(&mut guard)
        };
        self.notify();
        Ok(result)
    }

    // --- Track commands ---

    pub fn add_track(&self, track: Track) -> Result<Uuid, CoreError> {
        self.with_project_mut(|project| project.add_track(track))
    }

    pub fn remove_track(&self, track_id: Uuid) -> Result<Track, CoreError> {
        self.with_project_mut(|project| {
            project
                .remove_track(track_id)
                .ok_or_else(|| CoreError::Project(format!("Track {} not found", track_id)))
        })?
    }

    pub fn reorder_tracks(&self, from: usize, to: usize) -> Result<(), CoreError> {
        self.with_project_mut(|project| {
            if from >= project.tracks.len() || to >= project.tracks.len() {
                return Err(CoreError::Validation(format!(
                    "Track reorder out of range ({} -> {})",
                    from, to
                )));
            }
            let track = project.tracks.remove(from);
            project.tracks.insert(to, track);
            Ok(())
        })?
    }

    // --- Clip commands ---

    pub fn add_clip(&self, track_id: Uuid, clip: Clip) -> Result<Uuid, CoreError> {
        clip.validate()?;
        let id = clip.id;
        self.with_project_mut(move |project| {
            let track = project
                .get_track_mut(track_id)
                .ok_or_else(|| CoreError::Project(format!("Track {} not found", track_id)))?;
            track.add_clip(clip);
            Ok(id)
        })?
    }

    pub fn update_clip(
        &self,
        clip_id: Uuid,
        f: impl FnOnce(&mut Clip),
    ) -> Result<(), CoreError> {
        self.with_project_mut(move |project| {
            let clip = project
                .get_clip_mut(clip_id)
                .ok_or_else(|| CoreError::Project(format!("Clip {} not found", clip_id)))?;
            f(clip);
            Ok(())
        })?
    }

    pub fn remove_clip(&self, clip_id: Uuid) -> Result<Clip, CoreError> {
        self.with_project_mut(|project| {
            let track_id = project
                .track_of_clip(clip_id)
                .ok_or_else(|| CoreError::Project(format!("Clip {} not found", clip_id)))?;
            let track = project
                .get_track_mut(track_id)
                .ok_or_else(|| CoreError::Project(format!("Track {} not found", track_id)))?;
            track
                .remove_clip(clip_id)
                .ok_or_else(|| CoreError::Project(format!("Clip {} not found", clip_id)))
        })?
    }

    pub fn get_clip(&self, clip_id: Uuid) -> Result<Clip, CoreError> {
        self.with_project(|project| project.get_clip(clip_id).cloned())?
            .ok_or_else(|| CoreError::Project(format!("Clip {} not found", clip_id)))
    }

    // --- Playback state ---

    pub fn set_playhead(&self, playhead_ms: u64) -> Result<(), CoreError> {
        self.with_project_mut(|project| project.playhead_ms = playhead_ms)
    }

    pub fn set_playing(&self, is_playing: bool) -> Result<(), CoreError> {
        self.with_project_mut(|project| project.is_playing = is_playing)
    }

    pub fn duration_ms(&self) -> Result<u64, CoreError> {
        self.with_project(|project| project.duration_ms())
    }
}
