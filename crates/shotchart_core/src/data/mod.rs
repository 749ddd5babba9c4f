//! Data acquisition collaborators.
//!
//! Loads per-season-per-team shot files, attaches derived fields at
//! ingestion, and caches by key. Acquisition failures are logged and resolve
//! to an empty shot set; the analytics core treats empty input as valid.

pub mod store;

pub use store::{players, read_shot_file, teammates_and_opponents, ShotStore};
