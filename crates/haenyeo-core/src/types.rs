//! Fundamental geometric and simulation types.
//!
//! World convention: +Y is up, and a camera with zero yaw and pitch
//! looks down -Z.

use serde::{Deserialize, Serialize};

pub use glam::{DQuat, DVec3};

/// A half-line used for view and query casts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: DVec3,
    /// Unit direction.
    pub direction: DVec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`. A zero direction falls back to -Z.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        let direction = direction.try_normalize().unwrap_or(DVec3::NEG_Z);
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Position plus orientation of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub rotation: DQuat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Transform a point expressed in this pose's local frame into the parent frame.
    pub fn transform_point(&self, local: DVec3) -> DVec3 {
        self.position + self.rotation * local
    }

    /// Compose `self` (parent) with `child` (local to the parent).
    pub fn compose(&self, child: &Pose) -> Pose {
        Pose {
            position: self.transform_point(child.position),
            rotation: self.rotation * child.rotation,
        }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of length `dt`.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Clamp to [0, 1]. NaN maps to 0.
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
