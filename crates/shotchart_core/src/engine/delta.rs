//! Differential merge of two segment grids.
//!
//! Unions the cell keys of both grids, zero-filling the side that lacks a
//! cell so no NaN/undefined ever reaches the render boundary, and splits the
//! result into increase (B shoots more) and decrease (B shoots less) sets.
//! Cells with identical frequency on both sides are dropped.

use std::collections::BTreeSet;

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::binning::GridBin;
use super::court;

/// One merged comparison cell. All numeric fields are defined even when a
/// side has no shots there (zero-filled); `one_sided` marks those records so
/// the render layer does not imply a false efficiency trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaRecord {
    pub bx: i32,
    pub by: i32,
    pub cx: f32,
    pub cy: f32,
    pub attempts_a: u32,
    pub makes_a: u32,
    pub attempts_b: u32,
    pub makes_b: u32,
    pub freq_a: f32,
    pub freq_b: f32,
    pub eff_a: f32,
    pub eff_b: f32,
    /// Cell attempts as a percentage of that segment's total attempts.
    pub freq_pct_a: f32,
    pub freq_pct_b: f32,
    /// B minus A.
    pub delta_freq: f32,
    pub delta_eff: f32,
    /// Mean of both frequencies, used for glyph sizing.
    pub avg_freq: f32,
    pub one_sided: bool,
}

/// Delta records split by direction of the frequency change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaSplit {
    pub increase: Vec<DeltaRecord>,
    pub decrease: Vec<DeltaRecord>,
}

#[derive(Clone, Copy, Default)]
struct Side {
    attempts: u32,
    makes: u32,
    freq: f32,
    eff: f32,
}

impl From<&GridBin> for Side {
    fn from(bin: &GridBin) -> Self {
        Side { attempts: bin.attempts, makes: bin.makes, freq: bin.freq, eff: bin.eff }
    }
}

/// Merge two binned grids into signed differential records.
///
/// `total_attempts_a`/`_b` are the segments' filtered-set sizes, used for the
/// percentage-of-total fields. The (0, 0) cell is a no-geometry sentinel and
/// is excluded from the merge. Output order is deterministic (sorted by cell
/// key within each set).
pub fn compute_delta(
    bins_a: &[GridBin],
    bins_b: &[GridBin],
    total_attempts_a: u32,
    total_attempts_b: u32,
) -> DeltaSplit {
    let map_a: FxHashMap<(i32, i32), &GridBin> =
        bins_a.iter().map(|b| ((b.bx, b.by), b)).collect();
    let map_b: FxHashMap<(i32, i32), &GridBin> =
        bins_b.iter().map(|b| ((b.bx, b.by), b)).collect();

    let keys: BTreeSet<(i32, i32)> = map_a.keys().chain(map_b.keys()).copied().collect();

    let total_a = total_attempts_a.max(1) as f32;
    let total_b = total_attempts_b.max(1) as f32;

    let mut split = DeltaSplit::default();
    for (bx, by) in keys {
        if (bx, by) == (0, 0) {
            continue;
        }

        let a = map_a.get(&(bx, by)).map(|b| Side::from(*b)).unwrap_or_default();
        let b = map_b.get(&(bx, by)).map(|b| Side::from(*b)).unwrap_or_default();

        let delta_freq = b.freq - a.freq;
        if delta_freq == 0.0 {
            continue;
        }

        let (cx, cy) = court::cell_center(bx, by);
        let record = DeltaRecord {
            bx,
            by,
            cx,
            cy,
            attempts_a: a.attempts,
            makes_a: a.makes,
            attempts_b: b.attempts,
            makes_b: b.makes,
            freq_a: a.freq,
            freq_b: b.freq,
            eff_a: a.eff,
            eff_b: b.eff,
            freq_pct_a: a.attempts as f32 / total_a * 100.0,
            freq_pct_b: b.attempts as f32 / total_b * 100.0,
            delta_freq,
            delta_eff: b.eff - a.eff,
            avg_freq: (a.freq + b.freq) / 2.0,
            one_sided: a.attempts == 0 || b.attempts == 0,
        };

        if delta_freq > 0.0 {
            split.increase.push(record);
        } else {
            split.decrease.push(record);
        }
    }
    split
}
