//! Treemap layout and drill-down view state.
//!
//! `layout` holds the geometric primitives (rectangles, the squarified
//! subdivision); `view` holds the two-state drill-down machine and builds the
//! positioned scene the rendering collaborator consumes.

pub mod layout;
pub mod view;

pub use layout::{squarify, Rect};
pub use view::{CategoryScene, CellScene, HeaderBand, TreemapScene, TreemapState, TreemapView};
