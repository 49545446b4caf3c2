//! One-time diagnostics for missing references.
//!
//! A missing camera or anchor disables its feature; the condition is
//! logged on first detection only.

use std::collections::BTreeSet;

use tracing::warn;

/// A reference whose absence disables a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Missing {
    Player,
    Camera,
    ReelAnchor,
    Animator,
    GatherClip,
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    reported: BTreeSet<Missing>,
}

impl Diagnostics {
    /// Emit `message` unless `kind` was already reported. Returns true if it was emitted.
    pub fn warn_once(&mut self, kind: Missing, message: &str) -> bool {
        if !self.reported.insert(kind) {
            return false;
        }
        warn!(?kind, "{message}; feature disabled");
        true
    }

    pub fn reported(&self, kind: Missing) -> bool {
        self.reported.contains(&kind)
    }

    pub fn count(&self) -> usize {
        self.reported.len()
    }
}
