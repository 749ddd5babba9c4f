//! Per-segment analysis context.
//!
//! Each of the two comparison segments (A, B) owns one `SegmentContext`:
//! the loaded shot set, the active filter, and every derived structure (grid
//! bins, flat stats, category hierarchy, overall aggregate, treemap view
//! state). Nothing is shared between segments; the delta merge reads two
//! contexts without mutating either.
//!
//! Data acquisition is asynchronous on the host side, so the context applies
//! a last-write-wins discipline: `begin_acquisition` hands out a generation
//! ticket, and a result arriving with a stale ticket is discarded instead of
//! overwriting a newer selection.

use crate::engine::aggregate::{
    aggregate_flat, aggregate_hierarchical, overall_stats, ActionTypeStat, CategoryNode,
    OverallStats,
};
use crate::engine::binning::{bin_shots, GridBin};
use crate::engine::classify::{classify, ShotCategory};
use crate::engine::filter::ShotFilter;
use crate::engine::treemap::{TreemapScene, TreemapState, TreemapView};
use crate::models::ShotRecord;

/// Proof of which acquisition a result belongs to. Obtained from
/// `SegmentContext::begin_acquisition`; stale tickets are rejected on apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionTicket {
    generation: u64,
}

/// Exclusive state of one comparison segment.
#[derive(Debug, Default)]
pub struct SegmentContext {
    /// All shots for the loaded (season, team) key.
    shots: Vec<ShotRecord>,
    /// Active selection; `None` until the host first selects a player.
    filter: Option<ShotFilter>,
    filtered: Vec<ShotRecord>,
    bins: Vec<GridBin>,
    flat: Vec<ActionTypeStat>,
    tree: Vec<CategoryNode>,
    overall: OverallStats,
    view: TreemapView,
    generation: u64,
}

impl SegmentContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new in-flight acquisition. Any ticket issued earlier
    /// becomes stale from this point on.
    pub fn begin_acquisition(&mut self) -> AcquisitionTicket {
        self.generation += 1;
        AcquisitionTicket { generation: self.generation }
    }

    /// Install freshly acquired shots if `ticket` is still current. Returns
    /// false (and changes nothing) for a stale ticket. Installing a new shot
    /// set clears the active selection and resets the treemap view.
    pub fn apply_shots(&mut self, ticket: AcquisitionTicket, shots: Vec<ShotRecord>) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "discarding stale acquisition (ticket {} < current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.shots = shots;
        self.filter = None;
        self.clear_derived();
        true
    }

    /// Apply a selection and recompute every derived structure. Resets the
    /// treemap to the overview: cached layout positions must never survive a
    /// data change.
    pub fn select(&mut self, filter: ShotFilter) {
        self.filtered = filter.apply(&self.shots);
        let duration = filter.window.duration();
        self.filter = Some(filter);

        self.bins = bin_shots(&self.filtered, duration);
        self.flat = aggregate_flat(&self.filtered);
        self.tree = aggregate_hierarchical(&self.filtered);
        self.overall = overall_stats(&self.filtered);
        self.view.reset();
    }

    fn clear_derived(&mut self) {
        self.filtered.clear();
        self.bins.clear();
        self.flat.clear();
        self.tree.clear();
        self.overall = OverallStats::default();
        self.view.reset();
    }

    /// Toggle the drill-down for `category` and return the resulting scene.
    pub fn toggle_category(&mut self, category: ShotCategory) -> TreemapScene {
        self.view.select_category(category);
        self.view.scene(&self.tree)
    }

    /// Build the treemap scene for the current state without transitioning.
    pub fn scene(&mut self) -> TreemapScene {
        self.view.scene(&self.tree)
    }

    /// Shots the heatmap should display: the filtered set, narrowed to the
    /// drilled category while a drill-down is active.
    pub fn display_shots(&self) -> Vec<ShotRecord> {
        match self.view.state() {
            TreemapState::Overview => self.filtered.clone(),
            TreemapState::Drilldown(category) => self
                .filtered
                .iter()
                .filter(|s| classify(s.action_text()) == category)
                .cloned()
                .collect(),
        }
    }

    /// Grid bins over the display shots (category-narrowed during a
    /// drill-down, identical to `bins()` otherwise).
    pub fn display_bins(&self) -> Vec<GridBin> {
        match self.view.state() {
            TreemapState::Overview => self.bins.clone(),
            TreemapState::Drilldown(_) => bin_shots(&self.display_shots(), self.window_minutes()),
        }
    }

    fn window_minutes(&self) -> f32 {
        self.filter.as_ref().map(|f| f.window.duration()).unwrap_or(0.0)
    }

    // Read-only views for the render layer and the delta merge.

    pub fn shots(&self) -> &[ShotRecord] {
        &self.shots
    }

    pub fn filtered(&self) -> &[ShotRecord] {
        &self.filtered
    }

    pub fn bins(&self) -> &[GridBin] {
        &self.bins
    }

    pub fn flat_stats(&self) -> &[ActionTypeStat] {
        &self.flat
    }

    pub fn hierarchy(&self) -> &[CategoryNode] {
        &self.tree
    }

    pub fn overall(&self) -> OverallStats {
        self.overall
    }

    pub fn filter(&self) -> Option<&ShotFilter> {
        self.filter.as_ref()
    }

    pub fn view_state(&self) -> TreemapState {
        self.view.state()
    }
}
