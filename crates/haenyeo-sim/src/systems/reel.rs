//! Reel system: ticks the tether against the hooked entity.

use glam::{DQuat, DVec3, EulerRot};
use hecs::{Entity, World};

use haenyeo_core::enums::TetherOutcome;
use haenyeo_core::events::{AudioEvent, GameEvent};
use haenyeo_reel::tether::ReelSimulator;

use crate::collectible::CollectOutput;
use crate::components::{CameraRig, ReelAnchor};
use crate::diagnostics::{Diagnostics, Missing};
use crate::hierarchy;
use crate::hook::WorldHookTarget;

/// World position of the player's tether origin.
pub fn anchor_position(world: &World, player: Entity) -> Option<DVec3> {
    let anchor = *world.get::<&ReelAnchor>(player).ok()?;
    let pose = hierarchy::world_pose(world, player)?;
    let yaw = match world.get::<&CameraRig>(player) {
        Ok(rig) => rig.yaw,
        Err(_) => pose.rotation.to_euler(EulerRot::YXZ).0,
    };
    Some(pose.position + DQuat::from_rotation_y(yaw) * anchor.offset)
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    reel: &mut ReelSimulator,
    reel_target: &mut Option<Entity>,
    player: Option<Entity>,
    dt: f64,
    out: &mut CollectOutput<'_>,
    diagnostics: &mut Diagnostics,
) {
    let Some(target) = *reel_target else {
        reel.settle();
        return;
    };

    let anchor = player.and_then(|p| anchor_position(world, p));
    let mut hooked = WorldHookTarget {
        world,
        entity: target,
        by: player.unwrap_or(target),
        out,
    };

    let outcome = match anchor {
        Some(anchor) => reel.tick(&mut hooked, anchor, dt),
        None => {
            diagnostics.warn_once(Missing::ReelAnchor, "reel anchor lost while hooked");
            reel.release(&mut hooked, TetherOutcome::Cancelled)
        }
    };

    if let Some(outcome) = outcome {
        publish_outcome(target, outcome, hooked.out);
        *reel_target = None;
    }
}

/// Report a resolved hook.
pub fn publish_outcome(target: Entity, outcome: TetherOutcome, out: &mut CollectOutput<'_>) {
    out.events.push(GameEvent::ReelResolved {
        target: target.to_bits().get(),
        outcome,
    });
    if outcome != TetherOutcome::Collected {
        out.audio_events.push(AudioEvent::ReelSlack { outcome });
    }
}
