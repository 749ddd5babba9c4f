//! Analytics engine: the stateless computations each segment runs over its
//! filtered shot set, plus the treemap layout/state machine.

pub mod aggregate;
pub mod binning;
pub mod classify;
pub mod clock;
pub mod court;
pub mod delta;
pub mod filter;
pub mod treemap;
