//! Clip editing operations. Each operation is atomic from the caller's
//! point of view: validate, mutate the domain store, sync the mapped sprite,
//! record one history entry — or reject with no partial mutation. Engine
//! calls that must succeed for the operation to be representable (split,
//! sprite creation) run before any domain mutation.

pub mod snap;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use log::warn;
use uuid::Uuid;

use crate::adapter;
use crate::engine::SharedEngine;
use crate::error::CoreError;
use crate::history::{ClipSnapshot, History, HistoryEntry, OpKind};
use crate::mapping::SpriteRegistry;
use crate::model::action::{ActionRecord, Row};
use crate::model::clip::Clip;
use crate::store::ProjectStore;
use crate::util::time::ms_to_micros;
use snap::SnapConfig;

/// Trims can never shrink a clip below this.
pub const MIN_CLIP_DURATION_MS: u64 = 100;

pub struct EditEngine {
    store: ProjectStore,
    registry: Arc<Mutex<SpriteRegistry>>,
    engine: SharedEngine,
    history: Arc<Mutex<History>>,
    pub snap: SnapConfig,
}

impl EditEngine {
    pub fn new(
        store: ProjectStore,
        registry: Arc<Mutex<SpriteRegistry>>,
        engine: SharedEngine,
        history: Arc<Mutex<History>>,
        snap: SnapConfig,
    ) -> Self {
        Self {
            store,
            registry,
            engine,
            history,
            snap,
        }
    }

    fn lock_registry(&self) -> Result<MutexGuard<'_, SpriteRegistry>, CoreError> {
        self.registry
            .lock()
            .map_err(|_| CoreError::Runtime("Registry lock poisoned".to_string()))
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, dyn crate::engine::RenderEngine + 'static>, CoreError> {
        self.engine
            .lock()
            .map_err(|_| CoreError::Runtime("Engine lock poisoned".to_string()))
    }

    fn record_history(
        &self,
        kind: OpKind,
        description: &str,
        before: Vec<ClipSnapshot>,
        after: Vec<ClipSnapshot>,
    ) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        let affected: Vec<Uuid> = before
            .iter()
            .chain(after.iter())
            .map(|(id, _)| *id)
            .filter(|id| seen.insert(*id))
            .collect();
        let mut history = self
            .history
            .lock()
            .map_err(|_| CoreError::Runtime("History lock poisoned".to_string()))?;
        history.record(HistoryEntry {
            kind,
            description: description.to_string(),
            affected,
            before,
            after,
        });
        Ok(())
    }

    /// Domain first, sprite second, so a reader never observes a sprite
    /// ahead of its clip. A missing mapping is logged and skipped.
    fn sync_clip_sprite(&self, clip: &Clip) {
        let record = ActionRecord::from_clip(clip);
        match self.lock_registry() {
            Ok(mut registry) => {
                if let Err(err) = registry.sync_record_to_sprite(&record) {
                    warn!("Skipping sprite sync for clip {}: {}", clip.id, err);
                }
            }
            Err(err) => warn!("Skipping sprite sync for clip {}: {}", clip.id, err),
        }
    }

    /// Current widget rows for the whole project.
    pub fn rows(&self) -> Result<Vec<Row>, CoreError> {
        self.store
            .with_project(|project| adapter::tracks_to_rows(&project.tracks))
    }

    /// Writes a widget-reported row set back onto the domain model and
    /// re-syncs every mapped sprite.
    pub fn apply_rows(&self, rows: &[Row]) -> Result<(), CoreError> {
        self.store.with_project_mut(|project| {
            project.tracks = adapter::rows_to_tracks(rows, &project.tracks);
        })?;
        let clips: Vec<Clip> = self.store.with_project(|project| {
            project
                .tracks
                .iter()
                .flat_map(|t| t.clips.iter().cloned())
                .collect()
        })?;
        for clip in &clips {
            self.sync_clip_sprite(clip);
        }
        Ok(())
    }

    // --- Import ---

    /// Creates the sprite, adds the clip, registers the mapping. The sprite
    /// is discarded again if the domain insert fails, so neither side leaks
    /// an orphan.
    pub fn import_clip(&self, track_id: Uuid, clip: Clip) -> Result<Uuid, CoreError> {
        clip.validate()?;
        let sprite = self.lock_engine()?.create_sprite(&clip.source)?;
        let id = match self.store.add_clip(track_id, clip.clone()) {
            Ok(id) => id,
            Err(err) => {
                if let Err(cleanup) = self.lock_engine()?.remove_sprite(&sprite) {
                    warn!("Failed to discard sprite after import failure: {}", cleanup);
                }
                return Err(err);
            }
        };
        let record = ActionRecord::from_clip(&clip);
        {
            let mut registry = self.lock_registry()?;
            registry.register(record.clone(), sprite);
            registry.sync_record_to_sprite(&record)?;
        }
        self.record_history(
            OpKind::Import,
            "Import clip",
            vec![(id, None)],
            vec![(id, Some(clip))],
        )?;
        Ok(id)
    }

    // --- Move ---

    /// Moves every id by the same delta, computed against the first id (the
    /// anchor) after snapping. The delta is clamped so the earliest selected
    /// clip stays at or after zero. Track retarget applies to single-clip
    /// moves only.
    pub fn move_clips(
        &self,
        ids: &[Uuid],
        new_start_ms: u64,
        target_track: Option<Uuid>,
    ) -> Result<(), CoreError> {
        if ids.is_empty() {
            return Err(CoreError::Validation("No clips selected".to_string()));
        }
        let originals: Vec<Clip> = ids
            .iter()
            .map(|id| self.store.get_clip(*id))
            .collect::<Result<_, _>>()?;

        let snapped = self.snapped_time(new_start_ms, ids)?;
        let anchor_start = originals[0].start_ms as i64;
        let earliest = originals.iter().map(|c| c.start_ms).min().unwrap_or(0) as i64;
        let delta = (snapped as i64 - anchor_start).max(-earliest);

        for clip in &originals {
            let new_start = (clip.start_ms as i64 + delta) as u64;
            self.store
                .update_clip(clip.id, move |c| c.start_ms = new_start)?;
        }
        if let Some(track_id) = target_track {
            if ids.len() == 1 {
                self.retarget_clip(ids[0], track_id)?;
            } else {
                warn!("Track retarget ignored for multi-clip move");
            }
        }

        let mut after = Vec::with_capacity(ids.len());
        for id in ids {
            let clip = self.store.get_clip(*id)?;
            self.sync_clip_sprite(&clip);
            after.push((*id, Some(clip)));
        }
        let before = originals.iter().map(|c| (c.id, Some(c.clone()))).collect();
        self.record_history(OpKind::Move, "Move clips", before, after)
    }

    fn retarget_clip(&self, clip_id: Uuid, target_track_id: Uuid) -> Result<(), CoreError> {
        self.store.with_project_mut(|project| {
            let source_track_id = project
                .track_of_clip(clip_id)
                .ok_or_else(|| CoreError::Project(format!("Clip {} not found", clip_id)))?;
            if source_track_id == target_track_id {
                return Ok(());
            }
            if project.get_track(target_track_id).is_none() {
                return Err(CoreError::Project(format!(
                    "Track {} not found",
                    target_track_id
                )));
            }
            let clip = project
                .get_track_mut(source_track_id)
                .and_then(|t| t.remove_clip(clip_id))
                .ok_or_else(|| CoreError::Project(format!("Clip {} not found", clip_id)))?;
            // Target existence checked above, unwrap-free reinsert.
            match project.get_track_mut(target_track_id) {
                Some(track) => {
                    track.add_clip(clip);
                    Ok(())
                }
                None => Err(CoreError::Project(format!(
                    "Track {} not found",
                    target_track_id
                ))),
            }
        })?
    }

    /// Snap a candidate time against every clip boundary except the moving
    /// clips' own edges.
    fn snapped_time(&self, candidate_ms: u64, exclude: &[Uuid]) -> Result<u64, CoreError> {
        let edges: Vec<u64> = self.store.with_project(|project| {
            project
                .tracks
                .iter()
                .flat_map(|t| t.clip_edges(exclude))
                .collect()
        })?;
        Ok(self.snap.snap(candidate_ms, &edges))
    }

    // --- Trim ---

    /// Adjusts the start and/or end edge of a single clip. Start-edge trims
    /// slide the content window (`trim_start_ms` moves by the same delta);
    /// end-edge trims only change duration and the tail trim. Both edges are
    /// clamped to the minimum duration floor and the source bounds.
    pub fn trim_clip(
        &self,
        clip_id: Uuid,
        new_start_ms: Option<u64>,
        new_end_ms: Option<u64>,
    ) -> Result<(), CoreError> {
        if new_start_ms.is_none() && new_end_ms.is_none() {
            return Err(CoreError::Validation("Nothing to trim".to_string()));
        }
        let original = self.store.get_clip(clip_id)?;
        let mut updated = original.clone();

        if let Some(requested) = new_start_ms {
            let end = original.end_ms();
            // Cannot reveal content before the source start, cannot shrink
            // below the floor.
            let low = original.start_ms.saturating_sub(original.trim_start_ms);
            let high = end.saturating_sub(MIN_CLIP_DURATION_MS);
            if low > high {
                return Err(CoreError::Validation(format!(
                    "Clip {} is too short to trim",
                    clip_id
                )));
            }
            let new_start = requested.clamp(low, high);
            let delta = new_start as i64 - original.start_ms as i64;
            updated.trim_start_ms = (original.trim_start_ms as i64 + delta) as u64;
            updated.start_ms = new_start;
            updated.duration_ms = end - new_start;
        }

        if let Some(requested) = new_end_ms {
            let start = updated.start_ms;
            let mut new_end = requested.max(start + MIN_CLIP_DURATION_MS);
            if let Some(source_duration) = updated.source.duration_ms {
                let max_duration = source_duration.saturating_sub(updated.trim_start_ms);
                new_end = new_end.min(start + max_duration);
            }
            let old_end = updated.end_ms() as i64;
            let delta = new_end as i64 - old_end;
            updated.duration_ms = new_end - start;
            updated.trim_end_ms = (updated.trim_end_ms as i64 - delta).max(0) as u64;
        }

        updated.validate()?;
        let updated_for_store = updated.clone();
        self.store
            .update_clip(clip_id, move |c| *c = updated_for_store)?;
        self.sync_clip_sprite(&updated);
        self.record_history(
            OpKind::Trim,
            "Trim clip",
            vec![(clip_id, Some(original))],
            vec![(clip_id, Some(updated))],
        )
    }

    // --- Split ---

    /// Splits a clip strictly inside its window. The engine splits the
    /// source first; only then is the domain mutated, so an unsupported
    /// split leaves everything untouched. The original id is retired from
    /// the registry and two new mapping entries take its place.
    pub fn split_clip(&self, clip_id: Uuid, split_ms: u64) -> Result<(Uuid, Uuid), CoreError> {
        let original = self.store.get_clip(clip_id)?;
        if split_ms <= original.start_ms || split_ms >= original.end_ms() {
            return Err(CoreError::Validation(format!(
                "Split time {} outside clip window ({}..{})",
                split_ms,
                original.start_ms,
                original.end_ms()
            )));
        }
        let track_id = self
            .store
            .with_project(|p| p.track_of_clip(clip_id))?
            .ok_or_else(|| CoreError::Project(format!("Clip {} not found", clip_id)))?;

        let (_, sprite) = self
            .lock_registry()?
            .sprite_by_record_id(clip_id)
            .ok_or(CoreError::MissingMapping(clip_id))?;
        let source_offset_us =
            ms_to_micros(original.trim_start_ms + (split_ms - original.start_ms));
        let (left_sprite, right_sprite) =
            self.lock_engine()?.split_sprite(&sprite, source_offset_us)?;

        let mut left = original.clone();
        left.id = Uuid::new_v4();
        left.duration_ms = split_ms - original.start_ms;
        left.trim_end_ms = original.trim_end_ms + (original.end_ms() - split_ms);

        let mut right = original.clone();
        right.id = Uuid::new_v4();
        right.start_ms = split_ms;
        right.duration_ms = original.end_ms() - split_ms;
        right.trim_start_ms = original.trim_start_ms + (split_ms - original.start_ms);

        let left_clone = left.clone();
        let right_clone = right.clone();
        self.store.with_project_mut(move |project| {
            let track = project
                .get_track_mut(track_id)
                .ok_or_else(|| CoreError::Project(format!("Track {} not found", track_id)))?;
            track
                .remove_clip(clip_id)
                .ok_or_else(|| CoreError::Project(format!("Clip {} not found", clip_id)))?;
            track.add_clip(left_clone);
            track.add_clip(right_clone);
            Ok::<(), CoreError>(())
        })??;

        {
            let mut registry = self.lock_registry()?;
            registry.unregister(clip_id);
            let left_record = ActionRecord::from_clip(&left);
            let right_record = ActionRecord::from_clip(&right);
            registry.register(left_record.clone(), left_sprite);
            registry.register(right_record.clone(), right_sprite);
            registry.sync_record_to_sprite(&left_record)?;
            registry.sync_record_to_sprite(&right_record)?;
        }

        self.record_history(
            OpKind::Split,
            "Split clip",
            vec![(clip_id, Some(original))],
            vec![(left.id, Some(left.clone())), (right.id, Some(right.clone()))],
        )?;
        Ok((left.id, right.id))
    }

    // --- Delete ---

    /// Deletes each id independently; one failure never blocks siblings. An
    /// id with no registered sprite is skipped with a warning. Returns the
    /// number of clips actually deleted.
    pub fn delete_clips(&self, ids: &[Uuid]) -> Result<usize, CoreError> {
        let mut before = Vec::new();
        let mut after = Vec::new();
        let mut deleted = 0;
        for id in ids {
            let mapped = self.lock_registry()?.sprite_by_record_id(*id);
            let Some((_, sprite)) = mapped else {
                warn!("No sprite mapped for clip {}, skipping delete", id);
                continue;
            };
            let removed = match self.store.remove_clip(*id) {
                Ok(clip) => clip,
                Err(err) => {
                    warn!("Failed to delete clip {}, skipping: {}", id, err);
                    continue;
                }
            };
            self.lock_registry()?.unregister(*id);
            if let Err(err) = self.lock_engine()?.remove_sprite(&sprite) {
                warn!("Failed to discard sprite for clip {}: {}", id, err);
            }
            before.push((*id, Some(removed)));
            after.push((*id, None));
            deleted += 1;
        }
        if deleted > 0 {
            self.record_history(OpKind::Delete, "Delete clips", before, after)?;
        }
        Ok(deleted)
    }

    // --- Duplicate ---

    /// Duplicates each clip onto its own track at `original_end + offset`.
    /// The media source is shared, not cloned; a fresh sprite and mapping
    /// entry are created and the selection moves to the new clips.
    pub fn duplicate_clips(&self, ids: &[Uuid], offset_ms: u64) -> Result<Vec<Uuid>, CoreError> {
        let mut new_ids = Vec::new();
        let mut before = Vec::new();
        let mut after = Vec::new();
        for id in ids {
            let original = match self.store.get_clip(*id) {
                Ok(clip) => clip,
                Err(err) => {
                    warn!("Failed to duplicate clip {}, skipping: {}", id, err);
                    continue;
                }
            };
            let track_id = self
                .store
                .with_project(|p| p.track_of_clip(*id))?
                .ok_or_else(|| CoreError::Project(format!("Clip {} not found", id)))?;

            let sprite = self.lock_engine()?.create_sprite(&original.source)?;
            let mut copy = original.clone();
            copy.id = Uuid::new_v4();
            copy.start_ms = original.end_ms() + offset_ms;
            copy.selected = true;
            if let Err(err) = self.store.add_clip(track_id, copy.clone()) {
                warn!("Failed to duplicate clip {}, skipping: {}", id, err);
                if let Err(cleanup) = self.lock_engine()?.remove_sprite(&sprite) {
                    warn!("Failed to discard sprite after duplicate failure: {}", cleanup);
                }
                continue;
            }
            self.store.update_clip(*id, |c| c.selected = false)?;

            let record = ActionRecord::from_clip(&copy);
            {
                let mut registry = self.lock_registry()?;
                registry.register(record.clone(), sprite);
                registry.sync_record_to_sprite(&record)?;
            }

            let mut deselected = original.clone();
            deselected.selected = false;
            before.push((*id, Some(original)));
            before.push((copy.id, None));
            after.push((*id, Some(deselected)));
            after.push((copy.id, Some(copy.clone())));
            new_ids.push(copy.id);
        }
        if !new_ids.is_empty() {
            self.record_history(OpKind::Duplicate, "Duplicate clips", before, after)?;
        }
        Ok(new_ids)
    }

    // --- Queries ---

    /// Collision query for callers; move/trim never auto-reject overlaps.
    pub fn overlaps(
        &self,
        candidate_start_ms: u64,
        candidate_duration_ms: u64,
        track_id: Uuid,
        exclude: Option<Uuid>,
    ) -> Result<bool, CoreError> {
        self.store
            .with_project(|project| {
                project
                    .get_track(track_id)
                    .map(|t| t.has_overlap(candidate_start_ms, candidate_duration_ms, exclude))
            })?
            .ok_or_else(|| CoreError::Project(format!("Track {} not found", track_id)))
    }
}
