//! Shot-type classifier.
//!
//! Maps a free-text action description onto one of five fixed categories by
//! case-insensitive substring testing in strict priority order. The first
//! matching rule wins; anything unmatched is a jump shot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of shot categories used by the hierarchical rollup and the
/// treemap drill-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotCategory {
    Dunk,
    Layup,
    HookShot,
    Floater,
    JumpShot,
}

impl ShotCategory {
    pub const ALL: [ShotCategory; 5] = [
        ShotCategory::Dunk,
        ShotCategory::Layup,
        ShotCategory::HookShot,
        ShotCategory::Floater,
        ShotCategory::JumpShot,
    ];

    /// Human-readable label, as rendered in the treemap and stat tables.
    pub fn label(self) -> &'static str {
        match self {
            ShotCategory::Dunk => "Dunk",
            ShotCategory::Layup => "Layup",
            ShotCategory::HookShot => "Hook Shot",
            ShotCategory::Floater => "Floater",
            ShotCategory::JumpShot => "Jump Shot",
        }
    }

    /// Inverse of `label`, for resolving a category name coming back from
    /// the presentation layer. Unknown names yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

impl fmt::Display for ShotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a free-text action description. Total over all strings; a
/// missing description should be passed as the empty string.
pub fn classify(action_text: &str) -> ShotCategory {
    let text = action_text.to_lowercase();
    if text.contains("dunk") || text.contains("slam") {
        ShotCategory::Dunk
    } else if text.contains("layup") || text.contains("finger roll") || text.contains("tip") {
        ShotCategory::Layup
    } else if text.contains("hook") {
        ShotCategory::HookShot
    } else if text.contains("float") {
        // "floater" is covered by the "float" substring
        ShotCategory::Floater
    } else {
        // Default: jump shots, fadeaways, step-backs, pull-ups, and anything
        // unrecognized.
        ShotCategory::JumpShot
    }
}
