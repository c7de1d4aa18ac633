//! Playback/time synchronization. The coordinator owns the authoritative
//! play state and reconciles two independent update sources: UI commands and
//! render-engine callbacks. UI commands talk to the engine first and update
//! the domain second, reverting on failure; engine callbacks update the
//! domain under a re-entrancy guard so nothing echoes a seek back into the
//! engine.

use std::sync::MutexGuard;

use log::{debug, warn};

use crate::engine::{RenderEngine, SharedEngine};
use crate::error::CoreError;
use crate::store::ProjectStore;
use crate::util::time::{micros_to_ms, ms_to_micros, secs_to_ms};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
    Seeking,
}

type TimeListener = Box<dyn Fn(u64) + Send>;

pub struct PlaybackCoordinator {
    store: ProjectStore,
    engine: SharedEngine,
    state: PlaybackState,
    /// Set while applying an engine-originated update; suppresses the
    /// UI-direction echo.
    from_engine: bool,
    listeners: Vec<TimeListener>,
}

impl PlaybackCoordinator {
    pub fn new(store: ProjectStore, engine: SharedEngine) -> Self {
        Self {
            store,
            engine,
            state: PlaybackState::Stopped,
            from_engine: false,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Listeners drive the visible playhead indicator; times are in ms.
    pub fn add_time_listener(&mut self, listener: impl Fn(u64) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, dyn RenderEngine + 'static>, CoreError> {
        self.engine
            .lock()
            .map_err(|_| CoreError::Runtime("Engine lock poisoned".to_string()))
    }

    /// No-op when already playing. On engine failure the coordinator
    /// reverts to its pre-call state.
    pub fn play(&mut self, start_ms: Option<u64>) -> Result<(), CoreError> {
        if self.state == PlaybackState::Playing {
            return Ok(());
        }
        let start = match start_ms {
            Some(ms) => ms,
            None => self.store.with_project(|p| p.playhead_ms)?,
        };
        let previous = self.state;
        self.state = PlaybackState::Seeking;
        let play_result = self.lock_engine()?.play(ms_to_micros(start));
        if let Err(err) = play_result {
            self.state = previous;
            return Err(CoreError::Playback(err.to_string()));
        }
        self.store.set_playhead(start)?;
        self.store.set_playing(true)?;
        self.state = PlaybackState::Playing;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), CoreError> {
        self.lock_engine()?.pause()?;
        self.store.set_playing(false)?;
        self.state = PlaybackState::Paused;
        Ok(())
    }

    /// Pause plus playhead reset to zero.
    pub fn stop(&mut self) -> Result<(), CoreError> {
        self.lock_engine()?.pause()?;
        self.store.set_playing(false)?;
        self.store.set_playhead(0)?;
        self.lock_engine()?.preview_frame(0)?;
        self.state = PlaybackState::Stopped;
        Ok(())
    }

    /// Clamped to `[0, duration]`. Never grid-snapped here; snapping is the
    /// caller's policy. Returns the clamped time.
    pub fn seek_to(&mut self, time_ms: u64) -> Result<u64, CoreError> {
        let clamped = time_ms.min(self.store.duration_ms()?);
        if self.from_engine {
            // Echo of an engine-originated update; the engine is already
            // at this position.
            debug!("Suppressing seek echo to {} ms", clamped);
            return Ok(clamped);
        }
        let previous = self.state;
        self.state = PlaybackState::Seeking;
        let preview_result = self.lock_engine()?.preview_frame(ms_to_micros(clamped));
        if let Err(err) = preview_result {
            self.state = previous;
            return Err(err);
        }
        self.store.set_playhead(clamped)?;
        self.state = previous;
        Ok(clamped)
    }

    pub fn skip_back(&mut self, seconds: f64) -> Result<u64, CoreError> {
        let playhead = self.store.with_project(|p| p.playhead_ms)?;
        self.seek_to(playhead.saturating_sub(secs_to_ms(seconds)))
    }

    pub fn skip_forward(&mut self, seconds: f64) -> Result<u64, CoreError> {
        let playhead = self.store.with_project(|p| p.playhead_ms)?;
        self.seek_to(playhead + secs_to_ms(seconds))
    }

    // --- Render engine callbacks ---

    /// Time update from the engine. Updates the domain playhead and
    /// notifies listeners; must never drive a seek back into the engine.
    pub fn on_engine_time(&mut self, position_us: u64) {
        self.from_engine = true;
        let position_ms = micros_to_ms(position_us);
        if let Err(err) = self.store.set_playhead(position_ms) {
            warn!("Failed to update playhead: {}", err);
        }
        for listener in &self.listeners {
            listener(position_ms);
        }
        self.from_engine = false;
    }

    pub fn on_engine_playing(&mut self) {
        self.from_engine = true;
        if let Err(err) = self.store.set_playing(true) {
            warn!("Failed to update play state: {}", err);
        }
        self.state = PlaybackState::Playing;
        self.from_engine = false;
    }

    pub fn on_engine_paused(&mut self) {
        self.from_engine = true;
        if let Err(err) = self.store.set_playing(false) {
            warn!("Failed to update play state: {}", err);
        }
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
        self.from_engine = false;
    }
}
