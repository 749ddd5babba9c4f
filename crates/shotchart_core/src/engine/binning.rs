//! Spatial binning of shots into the fixed heatmap grid.
//!
//! Each shot is projected onto the canvas and floored into a grid cell
//! (see `engine::court`). Per occupied cell we accumulate attempts/makes and
//! derive frequency (attempts per window minute) and efficiency
//! (makes / attempts). Output is sorted by cell key so binning is
//! reproducible regardless of input order.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::court;
use crate::models::ShotRecord;

/// One occupied heatmap grid cell. Only created for cells with at least one
/// attempt, so `eff` is always well defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridBin {
    pub bx: i32,
    pub by: i32,
    /// Canvas-space cell center, for rendering.
    pub cx: f32,
    pub cy: f32,
    pub attempts: u32,
    pub makes: u32,
    /// Attempts per minute of the segment window; 0 when the window has no
    /// positive duration.
    pub freq: f32,
    /// Makes / attempts.
    pub eff: f32,
}

/// Bucket `shots` into grid cells for a window of `window_minutes`.
///
/// Deterministic: output is sorted by (bx, by) and independent of the input
/// order of `shots`.
pub fn bin_shots(shots: &[ShotRecord], window_minutes: f32) -> Vec<GridBin> {
    let mut cells: FxHashMap<(i32, i32), (u32, u32)> = FxHashMap::default();

    for shot in shots {
        let (x, y) = court::project(shot.loc_x, shot.loc_y);
        let key = court::cell_of(x, y);
        let entry = cells.entry(key).or_insert((0, 0));
        entry.0 += 1;
        if shot.made {
            entry.1 += 1;
        }
    }

    let mut keys: Vec<(i32, i32)> = cells.keys().copied().collect();
    keys.sort_unstable();

    keys.into_iter()
        .map(|(bx, by)| {
            let (attempts, makes) = cells[&(bx, by)];
            let (cx, cy) = court::cell_center(bx, by);
            GridBin {
                bx,
                by,
                cx,
                cy,
                attempts,
                makes,
                freq: if window_minutes > 0.0 { attempts as f32 / window_minutes } else { 0.0 },
                eff: makes as f32 / attempts as f32,
            }
        })
        .collect()
}
