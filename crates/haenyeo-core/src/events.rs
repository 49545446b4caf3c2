//! Events emitted by the simulation for audio, VFX and UI feedback.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Audio cues for the frontend sound system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Reel fired and latched onto a target.
    ReelFire { position: DVec3 },
    /// Reel released without a catch.
    ReelSlack { outcome: TetherOutcome },
    /// A collectible's own pickup sound.
    Pickup { cue: String, position: DVec3 },
    /// Gather swing started.
    GatherSwing,
}

/// Gameplay events for UI and effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// The aim scan found a new candidate.
    TargetAcquired { target: u64, distance: f64 },
    /// The aim scan lost its candidate.
    TargetCleared,
    /// Reel attached to a target.
    Hooked { target: u64, rest_length: f64 },
    /// Reel ended.
    ReelResolved { target: u64, outcome: TetherOutcome },
    /// Gather sequence accepted.
    GatherStarted { target: u64, delay: f64 },
    /// Gather sequence ended without collecting.
    GatherCancelled { target: u64 },
    /// A collectible was consumed.
    Collected {
        target: u64,
        item: String,
        amount: u32,
        mode: RetrievalMode,
    },
    /// One-shot visual effect request.
    Vfx { name: String, position: DVec3 },
}
