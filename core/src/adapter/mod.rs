//! Stateless conversion between the domain track/clip graph and the timeline
//! widget's row/action graph, plus display metadata derivation.
//!
//! The widget side is derived, never authoritative: rows are rebuilt in full
//! on every change (the optimizer bounds the cost of that choice), and
//! user-driven row changes are written back onto the original clips with
//! every non-timing field preserved.

use std::collections::HashMap;

use log::warn;
use uuid::Uuid;

use crate::model::action::{ActionRecord, Row};
use crate::model::clip::{Clip, ClipKind};
use crate::model::track::Track;
use crate::util::time::secs_to_ms;

/// Fixed palette keyed by clip kind; UI rendering only.
pub fn kind_color(kind: ClipKind) -> &'static str {
    match kind {
        ClipKind::Video => "#3b82f6",
        ClipKind::Audio => "#22c55e",
        ClipKind::Image => "#f59e0b",
        ClipKind::Text => "#a855f7",
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct DisplayMeta {
    pub name: String,
    pub thumbnail_uri: Option<String>,
    pub color: &'static str,
}

/// One row per track, one action record per clip. Clips on locked tracks
/// come out neither movable nor resizable.
pub fn tracks_to_rows(tracks: &[Track]) -> Vec<Row> {
    tracks
        .iter()
        .map(|track| Row {
            id: track.id,
            actions: track
                .clips
                .iter()
                .map(|clip| {
                    let mut record = ActionRecord::from_clip(clip);
                    record.movable = !track.locked;
                    record.resizable = !track.locked;
                    record
                })
                .collect(),
        })
        .collect()
}

/// Inverse of `tracks_to_rows`. Timing and selection come from the action
/// records; everything else (trim, source, transform, effects) is preserved
/// from the matching original clip. An action with no original clip is a
/// lossy fallback for externally-injected rows: a default video clip with an
/// empty source is synthesized and the event logged.
pub fn rows_to_tracks(rows: &[Row], original: &[Track]) -> Vec<Track> {
    rows.iter()
        .map(|row| {
            let mut track = match original.iter().find(|t| t.id == row.id) {
                Some(found) => {
                    let mut t = found.clone();
                    t.clips.clear();
                    t
                }
                None => {
                    warn!(
                        "Row {} has no matching track, synthesizing a default video track",
                        row.id
                    );
                    let mut t = Track::new("Track", ClipKind::Video);
                    t.id = row.id;
                    t
                }
            };
            for action in &row.actions {
                let mut clip = match find_clip(original, action.id) {
                    Some(found) => found.clone(),
                    None => {
                        warn!(
                            "Action {} has no matching clip, synthesizing a default video clip",
                            action.id
                        );
                        let mut c = Clip::new(ClipKind::Video, 0, 1);
                        c.id = action.id;
                        c
                    }
                };
                let start_ms = secs_to_ms(action.start_secs);
                let end_ms = secs_to_ms(action.end_secs);
                clip.start_ms = start_ms;
                clip.duration_ms = end_ms.saturating_sub(start_ms).max(1);
                clip.selected = action.selected;
                track.clips.push(clip);
            }
            track.clips.sort_by_key(|c| c.start_ms);
            track
        })
        .collect()
}

fn find_clip(tracks: &[Track], clip_id: Uuid) -> Option<&Clip> {
    tracks
        .iter()
        .flat_map(|t| t.clips.iter())
        .find(|c| c.id == clip_id)
}

pub fn display_metadata(clip: &Clip) -> DisplayMeta {
    let name = if clip.source.name.is_empty() {
        clip.kind.to_string()
    } else {
        clip.source.name.clone()
    };
    DisplayMeta {
        name,
        thumbnail_uri: clip.source.thumbnail_uri.clone(),
        color: kind_color(clip.kind),
    }
}

/// Display metadata for every clip, keyed by action id.
pub fn display_map(tracks: &[Track]) -> HashMap<Uuid, DisplayMeta> {
    tracks
        .iter()
        .flat_map(|t| t.clips.iter())
        .map(|c| (c.id, display_metadata(c)))
        .collect()
}
