//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Tether/reel lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TetherPhase {
    /// No target hooked.
    #[default]
    Idle,
    /// A target is attached and being reeled in.
    Hooked,
    /// The hook ended this tick; returns to Idle on the next tick.
    Resolved,
}

/// Why a hook ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TetherOutcome {
    /// Target reached the stop distance and was collected.
    Collected,
    /// Target reached the stop distance but another path had already collected it.
    Forfeited,
    /// `max_hook_time` elapsed first.
    TimedOut,
    /// Target was destroyed while hooked.
    TargetLost,
    /// Released on request or because the anchor went missing.
    Cancelled,
}

/// Gather interaction phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatherPhase {
    #[default]
    Idle,
    /// Accepted, animation started, movement suppressed; first tick pending.
    Triggered,
    /// Waiting for the collect delay without a pose freeze.
    Playing,
    /// Waiting for the collect delay with the player's pose frozen.
    Locked,
    /// Collection fired this tick; all locks are already released.
    Collected,
}

/// Which path collected a collectible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetrievalMode {
    /// Hand collection of the aimed target.
    Immediate,
    /// Spring tether pulled the target in.
    Reel,
    /// Gather animation sequence.
    Gather,
}

/// Collider geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ColliderShape {
    Sphere { radius: f64 },
    /// Axis-aligned box; rotation of the owning entity is ignored.
    Box { half_extents: [f64; 3] },
}
