//! Camera system: advances the blend and derives this tick's view ray.
//!
//! Runs before the scan so targeting always uses the current frame's camera.

use glam::DVec3;
use hecs::{Entity, World};

use haenyeo_core::types::Ray;
use haenyeo_reel::camera::{self, CameraBlend};

use crate::components::CameraRig;
use crate::diagnostics::{Diagnostics, Missing};
use crate::hierarchy;

/// Advance `blend` and return the view ray, or None without a camera rig.
pub fn run(
    world: &World,
    blend: &mut CameraBlend,
    player: Option<Entity>,
    pivot_height: f64,
    dt: f64,
    diagnostics: &mut Diagnostics,
) -> Option<Ray> {
    blend.tick(dt);

    let Some(player) = player else {
        diagnostics.warn_once(Missing::Player, "no player spawned");
        return None;
    };
    let Ok(rig) = world.get::<&CameraRig>(player) else {
        diagnostics.warn_once(Missing::Camera, "player has no camera rig");
        return None;
    };
    let position = hierarchy::world_pose(world, player)?.position;

    let pivot = position + DVec3::Y * pivot_height;
    Some(camera::view_ray(pivot, rig.yaw, rig.pitch, blend.current()))
}
