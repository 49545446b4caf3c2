//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Camera / aim ---
    /// Hold or release the aim-down-sights state.
    SetAiming { aiming: bool },
    /// Look input delta (radians before sensitivity).
    Look { yaw: f64, pitch: f64 },

    // --- Locomotion ---
    /// Desired movement in camera-yaw space, clamped to unit length.
    Move { forward: f64, right: f64, up: f64 },

    // --- Retrieval ---
    /// Collect the aimed target by hand if it is within gather distance.
    CollectTarget,
    /// Fire the reel at the aimed target (or along the view ray).
    FireReel,
    /// Release the reel early.
    CancelReel,
    /// Start the gather animation sequence on the aimed target.
    Gather,
    /// Abort the gather sequence.
    CancelGather,
}
