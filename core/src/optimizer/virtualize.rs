use std::ops::Range;

use uuid::Uuid;

use crate::model::action::Row;

pub const DEFAULT_OVERSCAN: usize = 2;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Viewport {
    pub container_height: f64,
    pub scroll_top: f64,
    pub overscan: usize,
}

impl Viewport {
    pub fn new(container_height: f64, scroll_top: f64) -> Self {
        Self {
            container_height,
            scroll_top,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

/// Visible track index range for the given per-track heights, widened by
/// the overscan buffer and clamped to the track count. Only these tracks
/// are diffed and rendered.
pub fn visible_track_range(heights: &[f64], viewport: &Viewport) -> Range<usize> {
    if heights.is_empty() || viewport.container_height <= 0.0 {
        return 0..0;
    }
    let view_top = viewport.scroll_top;
    let view_bottom = viewport.scroll_top + viewport.container_height;
    let mut offset = 0.0;
    let mut first = heights.len();
    let mut last = 0usize;
    for (index, height) in heights.iter().enumerate() {
        let top = offset;
        let bottom = offset + height;
        if bottom > view_top && top < view_bottom {
            first = first.min(index);
            last = index + 1;
        }
        offset = bottom;
    }
    if first >= last {
        return 0..0;
    }
    let start = first.saturating_sub(viewport.overscan);
    let end = (last + viewport.overscan).min(heights.len());
    start..end
}

/// Action ids whose time window intersects the visible `[start, end)`
/// seconds. Independent of track virtualization.
pub fn visible_actions(rows: &[Row], view_start_secs: f64, view_end_secs: f64) -> Vec<Uuid> {
    rows.iter()
        .flat_map(|row| row.actions.iter())
        .filter(|a| a.start_secs < view_end_secs && a.end_secs > view_start_secs)
        .map(|a| a.id)
        .collect()
}
