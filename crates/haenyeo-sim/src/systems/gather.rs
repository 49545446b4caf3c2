//! Gather system: ticks the sequencer, re-asserts the freeze pose and runs
//! the collectible contract when the delay elapses.

use glam::DVec3;
use hecs::{Entity, World};

use haenyeo_core::components::Velocity;
use haenyeo_core::enums::RetrievalMode;
use haenyeo_core::events::GameEvent;
use haenyeo_core::types::Pose;
use haenyeo_reel::capability::AnimationPlayback;
use haenyeo_reel::gather::{GatherSequencer, GatherTick};

use crate::collectible::{self, CollectOutput};
use crate::components::{Animator, Transform};

/// Returns true on the tick the gather collected its target.
pub fn run(
    world: &mut World,
    gather: &mut GatherSequencer<Entity>,
    player: Option<Entity>,
    dt: f64,
    out: &mut CollectOutput<'_>,
) -> bool {
    if let Some(target) = gather.target() {
        if !world.contains(target) {
            cancel(world, gather, player, out.events);
        }
    }

    match gather.tick(dt) {
        GatherTick::Idle => false,
        GatherTick::Holding { freeze } => {
            if let (Some(pose), Some(player)) = (freeze, player) {
                hold_pose(world, player, pose);
            }
            false
        }
        GatherTick::Collect { target } => {
            let by = player.unwrap_or(target);
            let collected = collectible::try_collect(world, target, by, RetrievalMode::Gather, out);
            if !collected {
                out.events.push(GameEvent::GatherCancelled {
                    target: target.to_bits().get(),
                });
            }
            collected
        }
    }
}

/// Abort the running gather and stop its animation.
pub fn cancel(
    world: &mut World,
    gather: &mut GatherSequencer<Entity>,
    player: Option<Entity>,
    events: &mut Vec<GameEvent>,
) -> Option<Entity> {
    let target = gather.cancel()?;
    if let Some(player) = player {
        if let Ok(mut animator) = world.get::<&mut Animator>(player) {
            animator.stop();
        }
    }
    events.push(GameEvent::GatherCancelled {
        target: target.to_bits().get(),
    });
    Some(target)
}

fn hold_pose(world: &mut World, player: Entity, pose: Pose) {
    if let Ok(mut transform) = world.get::<&mut Transform>(player) {
        transform.0 = pose;
    }
    if let Ok(mut velocity) = world.get::<&mut Velocity>(player) {
        velocity.0 = DVec3::ZERO;
    }
}
