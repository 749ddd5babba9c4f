//! Drivers behind the shot-chart CLI.
//!
//! Builds segment contexts from on-disk season files and renders the
//! text/JSON reports the binary prints. Kept out of main.rs so the report
//! pipeline is testable without argument parsing.

use serde::Serialize;

use shotchart_core::engine::clock::TimeWindow;
use shotchart_core::{
    compute_delta, ActionTypeStat, CategoryNode, DeltaSplit, GridBin, OverallStats, SegmentContext,
    ShotFilter, ShotStore,
};

/// One segment's full selection, as given on the command line.
#[derive(Debug, Clone)]
pub struct SegmentSelection {
    pub season: String,
    pub team: String,
    pub player_id: u32,
    pub window: TimeWindow,
    pub teammate_on: Option<u32>,
    pub teammate_off: Option<u32>,
    pub opponent_on: Option<u32>,
    pub opponent_off: Option<u32>,
}

impl SegmentSelection {
    fn to_filter(&self) -> ShotFilter {
        let mut filter = ShotFilter::new(self.player_id, self.window);
        filter.teammate_on = self.teammate_on;
        filter.teammate_off = self.teammate_off;
        filter.opponent_on = self.opponent_on;
        filter.opponent_off = self.opponent_off;
        filter
    }
}

/// Load, filter and aggregate one segment.
pub fn build_segment(store: &mut ShotStore, selection: &SegmentSelection) -> SegmentContext {
    let shots = store.load(&selection.season, &selection.team).to_vec();
    let mut ctx = SegmentContext::new();
    let ticket = ctx.begin_acquisition();
    ctx.apply_shots(ticket, shots);
    ctx.select(selection.to_filter());
    ctx
}

/// Delta split between two built segments (B minus A).
pub fn compare_segments(a: &SegmentContext, b: &SegmentContext) -> DeltaSplit {
    compute_delta(a.bins(), b.bins(), a.filtered().len() as u32, b.filtered().len() as u32)
}

/// Serializable bundle of everything the render layer would consume.
#[derive(Debug, Serialize)]
pub struct SegmentSummary {
    pub overall: OverallStats,
    pub bins: Vec<GridBin>,
    pub stats: Vec<ActionTypeStat>,
    pub categories: Vec<CategoryNode>,
}

pub fn segment_summary(ctx: &SegmentContext) -> SegmentSummary {
    SegmentSummary {
        overall: ctx.overall(),
        bins: ctx.bins().to_vec(),
        stats: ctx.flat_stats().to_vec(),
        categories: ctx.hierarchy().to_vec(),
    }
}

/// "12/30 (40.0%) 45.0 efg%" -- the overall summary line.
pub fn format_overall(overall: &OverallStats) -> String {
    format!(
        "{}/{} ({:.1}%) {:.1} efg%",
        overall.makes, overall.attempts, overall.fg_pct, overall.efg_pct
    )
}

/// Per-action-type table, descending by attempts.
pub fn format_stats_table(stats: &[ActionTypeStat]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<32} {:>6} {:>8} {:>7} {:>7}\n",
        "Shot Type", "Freq", "Made/Att", "FG%", "EFG%"
    ));
    for row in stats {
        out.push_str(&format!(
            "{:<32} {:>5.1}% {:>4}/{:<3} {:>6.1}% {:>6.1}%\n",
            row.name,
            row.freq * 100.0,
            row.made,
            row.attempts,
            row.fg * 100.0,
            row.efg * 100.0
        ));
    }
    out
}

/// Category rollup with per-action-type children indented underneath.
pub fn format_hierarchy(categories: &[CategoryNode]) -> String {
    let mut out = String::new();
    for node in categories {
        out.push_str(&format!(
            "{} {}/{} ({:.1}%)\n",
            node.name(),
            node.made,
            node.attempts,
            node.fg * 100.0
        ));
        for child in &node.children {
            out.push_str(&format!(
                "  {} {}/{} ({:.1}% efg)\n",
                child.name,
                child.made,
                child.attempts,
                child.efg * 100.0
            ));
        }
    }
    out
}

/// Occupied-cell listing for the heatmap grid.
pub fn format_bins(bins: &[GridBin]) -> String {
    let mut out = String::new();
    for bin in bins {
        out.push_str(&format!(
            "({:>2},{:>2})  freq {:>5.2}/min  eff {:>5.1}%  ({}/{})\n",
            bin.bx,
            bin.by,
            bin.freq,
            bin.eff * 100.0,
            bin.makes,
            bin.attempts
        ));
    }
    out
}

/// Both delta sets, one line per merged cell.
pub fn format_delta(delta: &DeltaSplit) -> String {
    let mut out = String::new();
    for (title, records) in
        [("B shoots MORE here", &delta.increase), ("B shoots LESS here", &delta.decrease)]
    {
        out.push_str(&format!("{} ({} cells)\n", title, records.len()));
        for r in records {
            out.push_str(&format!(
                "  ({:>2},{:>2})  dFreq {:>+6.2}/min  dEff {:>+6.1}%  A {}/{}  B {}/{}{}\n",
                r.bx,
                r.by,
                r.delta_freq,
                r.delta_eff * 100.0,
                r.makes_a,
                r.attempts_a,
                r.makes_b,
                r.attempts_b,
                if r.one_sided { "  [one-sided]" } else { "" }
            ));
        }
    }
    out
}
