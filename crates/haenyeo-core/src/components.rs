//! ECS components that carry no entity references.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components. Components that point at
//! other entities live in the engine crate.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::ColliderShape;

/// Linear velocity (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec3);

/// Collision volume used by spatial queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Layer index (0..32).
    pub layer: u32,
    pub is_trigger: bool,
    pub enabled: bool,
}

/// Physics ownership of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub use_gravity: bool,
    /// Kinematic bodies are moved by gameplay code, not integrated.
    pub kinematic: bool,
}

/// Renderer-agnostic highlight capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub on: bool,
}

/// Visibility of the entity's renderables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Visible(pub bool);

/// Effects fired when a collectible is consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CollectEffect {
    Sound { cue: String },
    Vfx { name: String },
}

/// Harvestable entity, collectable at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    /// Inventory item granted on collection.
    pub item: String,
    pub amount: u32,
    /// True until the first successful collection.
    pub available: bool,
    /// Hide renderables and disable colliders on collection.
    pub hide_on_collected: bool,
    pub on_collected: Vec<CollectEffect>,
}

impl Collectible {
    pub fn new(item: impl Into<String>, amount: u32) -> Self {
        Self {
            item: item.into(),
            amount,
            available: true,
            hide_on_collected: true,
            on_collected: Vec::new(),
        }
    }
}

/// Animation clip metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipInfo {
    pub name: String,
    pub frame_rate: f64,
    pub frame_count: u32,
}

/// Marks an entity as the locally controlled player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;
