//! Data model for raw shot events.

pub mod shot;

pub use shot::{ShotRecord, ShotValue};
