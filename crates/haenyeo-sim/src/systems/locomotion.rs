//! Player locomotion from move/look intent, gated by the suppression handles.

use glam::{DQuat, DVec3};
use hecs::World;

use haenyeo_core::components::Velocity;
use haenyeo_core::config::MovementConfig;
use haenyeo_core::constants::MAX_PITCH;
use haenyeo_reel::capability::Suppressible;

use crate::components::{CameraRig, Intent, Locomotion, Transform};

pub fn run(world: &mut World, config: &MovementConfig, aiming: bool) {
    for (_entity, (transform, velocity, intent, locomotion, rig)) in world.query_mut::<(
        &mut Transform,
        &mut Velocity,
        &mut Intent,
        &Locomotion,
        Option<&mut CameraRig>,
    )>() {
        let look_yaw = std::mem::take(&mut intent.pending_yaw) * config.look_sensitivity;
        let look_pitch = std::mem::take(&mut intent.pending_pitch) * config.look_sensitivity;

        let yaw = match rig {
            Some(rig) => {
                if locomotion.look.is_enabled() {
                    rig.yaw += look_yaw;
                    rig.pitch = (rig.pitch + look_pitch).clamp(-MAX_PITCH, MAX_PITCH);
                }
                rig.yaw
            }
            None => {
                let (yaw, _, _) = transform.0.rotation.to_euler(glam::EulerRot::YXZ);
                if locomotion.look.is_enabled() {
                    yaw + look_yaw
                } else {
                    yaw
                }
            }
        };

        let heading = DQuat::from_rotation_y(yaw);
        transform.0.rotation = heading;

        if !locomotion.swim.is_enabled() {
            velocity.0 = DVec3::ZERO;
            continue;
        }

        let speed = if aiming {
            config.move_speed * config.aim_speed_factor
        } else {
            config.move_speed
        };
        let axes = intent.movement;
        velocity.0 = heading * DVec3::new(axes.x, axes.y, -axes.z) * speed;
    }
}
