//! Flat and hierarchical shot-type rollups.
//!
//! Flat: one row per distinct action text. Hierarchical: action texts grouped
//! under their classified category. Both orderings are descending by attempts
//! with stable ties (original encounter order preserved).

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::classify::{classify, ShotCategory};
use crate::models::ShotRecord;

/// Per-action-type statistics row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTypeStat {
    pub name: String,
    pub made: u32,
    pub attempts: u32,
    /// Three-point class of this action type, taken from the first shot seen
    /// with this action text.
    pub is_three: bool,
    /// Share of the segment's attempts.
    pub freq: f32,
    pub fg: f32,
    /// Effective FG%: makes weighted 1.5x for three-point action types.
    pub efg: f32,
}

/// Category-level aggregate with per-action-type children.
///
/// `efg` at this level deliberately equals plain `fg` (no three-point
/// weighting in the category rollup); the weighted formula applies to the
/// child rows only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub category: ShotCategory,
    pub made: u32,
    pub attempts: u32,
    pub freq: f32,
    pub fg: f32,
    pub efg: f32,
    pub children: Vec<ActionTypeStat>,
}

impl CategoryNode {
    pub fn name(&self) -> &'static str {
        self.category.label()
    }
}

/// Segment-wide aggregate for the overall summary line.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OverallStats {
    pub attempts: u32,
    pub makes: u32,
    /// FG% as a percentage (0 on empty input).
    pub fg_pct: f32,
    /// EFG% as a percentage, with made threes weighted 1.5x.
    pub efg_pct: f32,
}

struct RawGroup {
    name: String,
    made: u32,
    attempts: u32,
    is_three: bool,
}

impl RawGroup {
    fn new(name: String, is_three: bool) -> Self {
        Self { name, made: 0, attempts: 0, is_three }
    }

    fn record(&mut self, made: bool) {
        self.attempts += 1;
        if made {
            self.made += 1;
        }
    }
}

/// Group shots by a string key, preserving first-encounter order.
fn group_by_action<'a>(
    shots: impl Iterator<Item = &'a ShotRecord>,
) -> Vec<RawGroup> {
    let mut groups: Vec<RawGroup> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for shot in shots {
        let key = shot.action_text();
        let idx = match index.get(key) {
            Some(&i) => i,
            None => {
                groups.push(RawGroup::new(key.to_string(), shot.value.is_three()));
                index.insert(key.to_string(), groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[idx].record(shot.made);
    }
    groups
}

fn to_stat(group: RawGroup, total_attempts: u32) -> ActionTypeStat {
    let attempts = group.attempts as f32;
    ActionTypeStat {
        freq: if total_attempts > 0 { attempts / total_attempts as f32 } else { 0.0 },
        fg: group.made as f32 / attempts,
        efg: if group.is_three {
            group.made as f32 * 1.5 / attempts
        } else {
            group.made as f32 / attempts
        },
        name: group.name,
        made: group.made,
        attempts: group.attempts,
        is_three: group.is_three,
    }
}

fn sort_by_attempts_desc<T>(items: &mut [T], attempts: impl Fn(&T) -> u32) {
    // Stable sort keeps encounter order for equal attempt counts.
    items.sort_by(|a, b| attempts(b).cmp(&attempts(a)));
}

/// One row per distinct action text, descending by attempts.
pub fn aggregate_flat(shots: &[ShotRecord]) -> Vec<ActionTypeStat> {
    let total = shots.len() as u32;
    let mut rows: Vec<ActionTypeStat> =
        group_by_action(shots.iter()).into_iter().map(|g| to_stat(g, total)).collect();
    sort_by_attempts_desc(&mut rows, |r| r.attempts);
    rows
}

/// Action types grouped by category, both levels descending by attempts.
/// Categories with zero shots are omitted entirely.
pub fn aggregate_hierarchical(shots: &[ShotRecord]) -> Vec<CategoryNode> {
    let total = shots.len() as u32;

    let mut nodes: Vec<(ShotCategory, Vec<RawGroup>, u32, u32)> = Vec::new();
    let mut cat_index: FxHashMap<ShotCategory, usize> = FxHashMap::default();
    let mut action_index: FxHashMap<(ShotCategory, String), usize> = FxHashMap::default();

    for shot in shots {
        let action = shot.action_text();
        let category = classify(action);

        let node_idx = match cat_index.get(&category) {
            Some(&i) => i,
            None => {
                nodes.push((category, Vec::new(), 0, 0));
                cat_index.insert(category, nodes.len() - 1);
                nodes.len() - 1
            }
        };

        let node = &mut nodes[node_idx];
        node.2 += 1;
        if shot.made {
            node.3 += 1;
        }

        let key = (category, action.to_string());
        let child_idx = match action_index.get(&key) {
            Some(&i) => i,
            None => {
                node.1.push(RawGroup::new(action.to_string(), shot.value.is_three()));
                action_index.insert(key, node.1.len() - 1);
                node.1.len() - 1
            }
        };
        node.1[child_idx].record(shot.made);
    }

    let mut out: Vec<CategoryNode> = nodes
        .into_iter()
        .map(|(category, groups, attempts, made)| {
            let mut children: Vec<ActionTypeStat> =
                groups.into_iter().map(|g| to_stat(g, total)).collect();
            sort_by_attempts_desc(&mut children, |c| c.attempts);

            let fg = made as f32 / attempts as f32;
            CategoryNode {
                category,
                made,
                attempts,
                freq: attempts as f32 / total.max(1) as f32,
                fg,
                // Unweighted at the category level, matching the source.
                efg: fg,
                children,
            }
        })
        .collect();
    sort_by_attempts_desc(&mut out, |n| n.attempts);
    out
}

/// Overall segment aggregate; all fields zero on empty input.
pub fn overall_stats(shots: &[ShotRecord]) -> OverallStats {
    let attempts = shots.len() as u32;
    if attempts == 0 {
        return OverallStats::default();
    }

    let makes = shots.iter().filter(|s| s.made).count() as u32;
    let efg_points: f32 =
        shots.iter().filter(|s| s.made).map(|s| if s.value.is_three() { 1.5 } else { 1.0 }).sum();

    OverallStats {
        attempts,
        makes,
        fg_pct: makes as f32 / attempts as f32 * 100.0,
        efg_pct: efg_points / attempts as f32 * 100.0,
    }
}
