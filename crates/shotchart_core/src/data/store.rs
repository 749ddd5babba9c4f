//! Caching loader for season shot files.
//!
//! Source artifact: `<data_dir>/shots_by_season/<season>_<team>.json`, a JSON
//! array of shot records in the stats export schema. Elapsed game minutes
//! are computed once here, before any record reaches the analytics core.

use std::path::{Path, PathBuf};

use fxhash::{FxHashMap, FxHashSet};

use crate::engine::clock::elapsed_minutes;
use crate::error::{ChartError, Result};
use crate::models::ShotRecord;

/// Relative directory under the data root holding the per-key files.
pub const SHOTS_SUBDIR: &str = "shots_by_season";

/// Caching shot loader keyed by (season, team).
#[derive(Debug)]
pub struct ShotStore {
    data_dir: PathBuf,
    cache: FxHashMap<(String, String), Vec<ShotRecord>>,
}

impl ShotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), cache: FxHashMap::default() }
    }

    fn file_path(&self, season: &str, team: &str) -> PathBuf {
        self.data_dir.join(SHOTS_SUBDIR).join(format!("{}_{}.json", season, team))
    }

    /// Shots for a (season, team) key, loading and caching on first access.
    ///
    /// A read or parse failure is logged and cached as an empty set -- a
    /// missing file is not an error at this boundary, it just means no data.
    pub fn load(&mut self, season: &str, team: &str) -> &[ShotRecord] {
        let key = (season.to_string(), team.to_string());
        if !self.cache.contains_key(&key) {
            let path = self.file_path(season, team);
            let shots = match read_shot_file(&path) {
                Ok(shots) => shots,
                Err(e) => {
                    log::warn!("failed to load {}: {}", path.display(), e);
                    Vec::new()
                }
            };
            log::debug!("loaded {} shots for {} {}", shots.len(), season, team);
            self.cache.insert(key.clone(), shots);
        }
        self.cache.get(&key).map_or(&[], Vec::as_slice)
    }

    /// Drop all cached keys (e.g. when the data directory changes).
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

/// Read and parse one season file, attaching elapsed minutes to each record.
pub fn read_shot_file(path: &Path) -> Result<Vec<ShotRecord>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|source| ChartError::Io { path: path.to_path_buf(), source })?;
    let mut shots: Vec<ShotRecord> = serde_json::from_str(&raw)
        .map_err(|source| ChartError::Json { path: path.to_path_buf(), source })?;
    for shot in &mut shots {
        shot.elapsed_min =
            elapsed_minutes(shot.period, shot.minutes_remaining, shot.seconds_remaining);
    }
    Ok(shots)
}

/// Distinct shooters in encounter order, for the player select.
pub fn players(shots: &[ShotRecord]) -> Vec<(u32, String)> {
    let mut seen: FxHashSet<u32> = FxHashSet::default();
    let mut out = Vec::new();
    for shot in shots {
        if seen.insert(shot.player_id) {
            out.push((shot.player_id, shot.player_name.clone()));
        }
    }
    out
}

/// On-court teammates and opponents of `player_id`, with names resolved from
/// the shooters seen in the same file. Ids that never appear as shooters fall
/// back to "Player <id>".
pub fn teammates_and_opponents(
    shots: &[ShotRecord],
    player_id: u32,
) -> (Vec<(u32, String)>, Vec<(u32, String)>) {
    let names: FxHashMap<u32, &str> =
        shots.iter().map(|s| (s.player_id, s.player_name.as_str())).collect();
    let resolve = |id: u32| {
        names.get(&id).map(|n| n.to_string()).unwrap_or_else(|| format!("Player {}", id))
    };

    let mut teammates: Vec<(u32, String)> = Vec::new();
    let mut opponents: Vec<(u32, String)> = Vec::new();
    let mut seen_tm: FxHashSet<u32> = FxHashSet::default();
    let mut seen_op: FxHashSet<u32> = FxHashSet::default();

    for shot in shots.iter().filter(|s| s.player_id == player_id) {
        for &id in &shot.teammates_on_court {
            if id != player_id && seen_tm.insert(id) {
                teammates.push((id, resolve(id)));
            }
        }
        for &id in &shot.opponents_on_court {
            if seen_op.insert(id) {
                opponents.push((id, resolve(id)));
            }
        }
    }
    (teammates, opponents)
}
