//! # shotchart_core - Comparative Shot-Distribution Analytics
//!
//! This library turns raw shot-event records into the aggregated structures a
//! visualization layer renders: spatial heatmap bins, flat and hierarchical
//! shot-type statistics, signed deltas between two independently configured
//! segments, and a positioned treemap view-model with a one-level drill-down.
//!
//! ## Design
//! - Deterministic: identical inputs produce byte-identical outputs
//! - Two segments (A, B) each own their context; nothing is shared except
//!   through the read-only delta merge
//! - All edge cases resolve to a defined zero/empty value; the analytics
//!   functions never return an error

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Ratio formulas read better written out explicitly
#![allow(clippy::manual_range_contains)]

pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod segment;

pub use error::{ChartError, Result};
pub use models::{ShotRecord, ShotValue};

pub use engine::aggregate::{
    aggregate_flat, aggregate_hierarchical, overall_stats, ActionTypeStat, CategoryNode,
    OverallStats,
};
pub use engine::binning::{bin_shots, GridBin};
pub use engine::classify::{classify, ShotCategory};
pub use engine::clock::{elapsed_minutes, TimeWindow};
pub use engine::delta::{compute_delta, DeltaRecord, DeltaSplit};
pub use engine::filter::ShotFilter;
pub use engine::treemap::{
    CategoryScene, CellScene, HeaderBand, Rect, TreemapScene, TreemapState, TreemapView,
};

pub use data::store::ShotStore;
pub use segment::{AcquisitionTicket, SegmentContext};
