//! Engine-side components: everything that refers to another entity or
//! holds a capability handle.

use glam::DVec3;
use hecs::Entity;

use haenyeo_core::components::{ClipInfo, PhysicsBody};
use haenyeo_core::constants::*;
use haenyeo_core::types::Pose;
use haenyeo_reel::capability::{AnimationPlayback, SuppressionHandle};

/// Pose of the entity, relative to its [`Parent`] when it has one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform(pub Pose);

impl Transform {
    pub fn at(position: DVec3) -> Self {
        Self(Pose::from_position(position))
    }
}

/// Hierarchy link to the owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);

/// Weak back-reference to the spawner that placed a collectible.
/// The spawner may be gone; it never owns the collectible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnerLink(pub Entity);

/// Population counter notified when one of its collectibles is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spawner {
    pub alive: u32,
    pub collected: u32,
}

/// Scheduled for removal by the cleanup system.
#[derive(Debug, Clone, Copy)]
pub struct Despawn;

/// Movement-suppression handles of the player's locomotion controllers.
#[derive(Debug, Clone)]
pub struct Locomotion {
    /// Gates translation.
    pub swim: SuppressionHandle,
    /// Gates camera orbit.
    pub look: SuppressionHandle,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            swim: SuppressionHandle::new("swim"),
            look: SuppressionHandle::new("look"),
        }
    }
}

/// Latest movement input plus look deltas not yet applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intent {
    /// Move axes in yaw space (x = right, y = up, z = forward), at most unit length.
    pub movement: DVec3,
    pub pending_yaw: f64,
    pub pending_pitch: f64,
}

/// Third-person orbit camera attached to the player.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraRig {
    pub yaw: f64,
    pub pitch: f64,
}

/// Where the tether leaves the player, in the player's yaw frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelAnchor {
    pub offset: DVec3,
}

/// The scanning entity's own colliders, registered at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExclusionSet {
    pub colliders: Vec<Entity>,
    /// Hierarchy roots whose whole subtree is excluded.
    pub roots: Vec<Entity>,
}

/// Gather interaction options of the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gatherer {
    /// Hold the player's pose while the gather runs.
    pub freeze_pose: bool,
}

/// Physics state saved when a tether takes ownership of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedPhysics(pub PhysicsBody);

/// Autonomous wander inside an axis-aligned volume.
#[derive(Debug, Clone, PartialEq)]
pub struct Wander {
    pub enabled: bool,
    pub bounds_min: DVec3,
    pub bounds_max: DVec3,
    pub speed_range: (f64, f64),
    /// Seconds between goal changes.
    pub retarget_range: (f64, f64),
    pub arrive_distance: f64,
    pub turn_rate: f64,
    pub goal: DVec3,
    /// Seconds until the next goal change. A goal is picked when this hits zero.
    pub timer: f64,
    pub speed: f64,
}

impl Wander {
    pub fn new(bounds_min: DVec3, bounds_max: DVec3) -> Self {
        Self {
            enabled: true,
            bounds_min,
            bounds_max,
            speed_range: (WANDER_MIN_SPEED, WANDER_MAX_SPEED),
            retarget_range: (WANDER_RETARGET_MIN, WANDER_RETARGET_MAX),
            arrive_distance: WANDER_ARRIVE_DISTANCE,
            turn_rate: WANDER_TURN_RATE,
            goal: (bounds_min + bounds_max) * 0.5,
            timer: 0.0,
            speed: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayingClip {
    pub name: String,
    pub remaining: f64,
}

/// Clip library and playback cursor of an animated rig.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animator {
    pub clips: Vec<ClipInfo>,
    pub playing: Option<PlayingClip>,
}

impl Animator {
    pub fn with_clips(clips: Vec<ClipInfo>) -> Self {
        Self { clips, playing: None }
    }

    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.iter().any(|c| c.name == name)
    }
}

impl AnimationPlayback for Animator {
    fn play_segment(&mut self, clip: &str, frame_count: u32) -> Option<f64> {
        let info = self.clips.iter().find(|c| c.name == clip)?;
        let frames = frame_count.min(info.frame_count);
        let duration = frames as f64 / info.frame_rate.max(1.0);
        self.playing = Some(PlayingClip {
            name: info.name.clone(),
            remaining: duration,
        });
        Some(duration)
    }

    fn stop(&mut self) {
        self.playing = None;
    }
}
