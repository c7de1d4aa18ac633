use serde::{Deserialize, Serialize};

use crate::util::time::snap_to_grid;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct SnapConfig {
    pub grid_enabled: bool,
    pub grid_ms: u64,
    pub magnetic_enabled: bool,
    pub magnetic_threshold_ms: u64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            grid_enabled: false,
            grid_ms: 500,
            magnetic_enabled: false,
            magnetic_threshold_ms: 100,
        }
    }
}

impl SnapConfig {
    /// Magnetic clip-boundary snap wins over the uniform grid when both are
    /// enabled and a boundary lies within the threshold; otherwise the grid
    /// applies.
    pub fn snap(&self, candidate_ms: u64, edges: &[u64]) -> u64 {
        if self.magnetic_enabled {
            if let Some(edge) = nearest_edge(candidate_ms, edges, self.magnetic_threshold_ms) {
                return edge;
            }
        }
        if self.grid_enabled {
            return snap_to_grid(candidate_ms, self.grid_ms);
        }
        candidate_ms
    }
}

/// Nearest existing clip boundary within the threshold, if any.
pub fn nearest_edge(candidate_ms: u64, edges: &[u64], threshold_ms: u64) -> Option<u64> {
    edges
        .iter()
        .copied()
        .map(|edge| (edge.abs_diff(candidate_ms), edge))
        .filter(|(distance, _)| *distance <= threshold_ms)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, edge)| edge)
}
