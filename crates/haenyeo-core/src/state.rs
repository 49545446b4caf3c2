//! Visible state published after each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, GameEvent};
use crate::types::{Ray, SimTime};

/// Complete state broadcast to the presentation layer after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub aiming: bool,
    /// None when no camera is configured.
    pub camera: Option<CameraView>,
    pub aim_target: Option<AimTargetView>,
    /// Entity currently highlighted, if any.
    pub highlighted: Option<u64>,
    pub player: Option<PlayerView>,
    pub reel: ReelView,
    pub gather: GatherView,
    pub collectibles: Vec<CollectibleView>,
    pub events: Vec<GameEvent>,
    pub audio_events: Vec<AudioEvent>,
}

/// Blended camera parameters and the resulting view ray.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraView {
    pub fov: f64,
    pub distance: f64,
    pub shoulder: DVec3,
    pub view_ray: Ray,
}

/// Current scan result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AimTargetView {
    pub target: u64,
    /// Distance along the view ray.
    pub distance: f64,
    pub point: DVec3,
    /// Whether the target is close enough for hand collection.
    pub within_gather_distance: bool,
}

/// Player state for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: DVec3,
    pub yaw: f64,
    pub pitch: f64,
    pub frozen: bool,
}

/// Reel state plus the rope polyline for the renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReelView {
    pub phase: TetherPhase,
    pub target: Option<u64>,
    pub rest_length: f64,
    pub elapsed: f64,
    /// Rope curve samples from anchor to target; empty when not hooked.
    pub rope: Vec<DVec3>,
    pub outcome: Option<TetherOutcome>,
}

/// Gather sequence state for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatherView {
    pub phase: GatherPhase,
    pub target: Option<u64>,
    pub elapsed: f64,
    pub delay: f64,
    /// Number of movement-suppression handles currently held.
    pub suppressed_handles: usize,
    pub frozen: bool,
}

/// A collectible visible in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectibleView {
    pub id: u64,
    pub item: String,
    pub position: DVec3,
    pub available: bool,
    pub highlighted: bool,
    pub visible: bool,
}
