//! Identity mapping between action records and render sprites.
//!
//! The id-keyed arena is the source of truth: record values are routinely
//! recreated when rows are re-derived from the domain model, so lookups go
//! through the stable record id. `Arc` pointer identity is only a fast path
//! for call sites that hold nothing but a sprite handle.

use std::collections::HashMap;
use std::sync::Arc;

use log::warn;
use uuid::Uuid;

use crate::engine::{SharedSprite, SpriteId, TimeWindow};
use crate::error::CoreError;
use crate::model::action::ActionRecord;
use crate::util::time::{micros_to_secs, secs_to_micros};

struct MapEntry {
    record: ActionRecord,
    sprite_id: SpriteId,
    sprite: SharedSprite,
}

#[derive(Default)]
pub struct SpriteRegistry {
    by_record: HashMap<Uuid, MapEntry>,
    by_sprite: HashMap<SpriteId, Uuid>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_record.is_empty()
    }

    pub fn contains(&self, record_id: Uuid) -> bool {
        self.by_record.contains_key(&record_id)
    }

    pub fn record_ids(&self) -> Vec<Uuid> {
        self.by_record.keys().copied().collect()
    }

    /// Creates the association and assigns a sprite id. A record id that is
    /// already registered is a caller bug; it is logged and ignored.
    pub fn register(&mut self, record: ActionRecord, sprite: SharedSprite) -> Option<SpriteId> {
        if self.by_record.contains_key(&record.id) {
            warn!(
                "Clip {} already has a sprite mapping, ignoring register",
                record.id
            );
            return None;
        }
        let sprite_id = SpriteId::new();
        self.by_sprite.insert(sprite_id, record.id);
        self.by_record.insert(
            record.id,
            MapEntry {
                record,
                sprite_id,
                sprite,
            },
        );
        Some(sprite_id)
    }

    /// Removes all index entries; returns the sprite handle so the caller
    /// can discard it engine-side. No-op if absent.
    pub fn unregister(&mut self, record_id: Uuid) -> Option<SharedSprite> {
        let entry = self.by_record.remove(&record_id)?;
        self.by_sprite.remove(&entry.sprite_id);
        Some(entry.sprite)
    }

    pub fn sprite_by_record_id(&self, record_id: Uuid) -> Option<(SpriteId, SharedSprite)> {
        self.by_record
            .get(&record_id)
            .map(|e| (e.sprite_id, e.sprite.clone()))
    }

    pub fn record_by_sprite_id(&self, sprite_id: SpriteId) -> Option<ActionRecord> {
        let record_id = self.by_sprite.get(&sprite_id)?;
        self.by_record.get(record_id).map(|e| e.record.clone())
    }

    /// Identity fast path for call sites that only hold a handle.
    pub fn sprite_id_of(&self, sprite: &SharedSprite) -> Option<SpriteId> {
        self.by_record
            .values()
            .find(|e| Arc::ptr_eq(&e.sprite, sprite))
            .map(|e| e.sprite_id)
    }

    /// Pushes the record's seconds onto the sprite's microsecond window.
    /// Looks the entry up by id, not identity: the record value may have
    /// been rebuilt from a re-derived row list while the sprite persists.
    pub fn sync_record_to_sprite(&mut self, record: &ActionRecord) -> Result<(), CoreError> {
        let entry = self
            .by_record
            .get_mut(&record.id)
            .ok_or(CoreError::MissingMapping(record.id))?;
        entry.record = record.clone();
        let window = TimeWindow {
            offset_us: secs_to_micros(record.start_secs),
            duration_us: secs_to_micros(record.end_secs - record.start_secs),
        };
        entry
            .sprite
            .lock()
            .map_err(|_| CoreError::Runtime("Sprite lock poisoned".to_string()))?
            .set_time_window(window);
        Ok(())
    }

    /// Inverse direction: reads the sprite's microsecond window back into
    /// the mapped record's seconds.
    pub fn sync_sprite_to_record(&mut self, sprite_id: SpriteId) -> Result<ActionRecord, CoreError> {
        let record_id = *self
            .by_sprite
            .get(&sprite_id)
            .ok_or_else(|| CoreError::Runtime(format!("Unknown sprite {}", sprite_id)))?;
        let entry = self
            .by_record
            .get_mut(&record_id)
            .ok_or(CoreError::MissingMapping(record_id))?;
        let window = entry
            .sprite
            .lock()
            .map_err(|_| CoreError::Runtime("Sprite lock poisoned".to_string()))?
            .time_window();
        entry.record.start_secs = micros_to_secs(window.offset_us);
        entry.record.end_secs = micros_to_secs(window.offset_us + window.duration_us);
        Ok(entry.record.clone())
    }

    /// Diagnostic drift scan: ids whose sprite window differs from the
    /// mapped record's time by more than the tolerance. Never on the hot
    /// path.
    pub fn validate(&self, tolerance_us: u64) -> Vec<Uuid> {
        let mut drifted = Vec::new();
        for (id, entry) in &self.by_record {
            let Ok(sprite) = entry.sprite.lock() else {
                drifted.push(*id);
                continue;
            };
            let window = sprite.time_window();
            let expected_offset = secs_to_micros(entry.record.start_secs);
            let expected_duration = secs_to_micros(entry.record.end_secs - entry.record.start_secs);
            if expected_offset.abs_diff(window.offset_us) > tolerance_us
                || expected_duration.abs_diff(window.duration_us) > tolerance_us
            {
                drifted.push(*id);
            }
        }
        drifted
    }
}
