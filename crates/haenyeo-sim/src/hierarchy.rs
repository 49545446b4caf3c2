//! Parent/child helpers over the [`Parent`] component.

use hecs::{Entity, World};

use haenyeo_core::components::Collectible;
use haenyeo_core::types::Pose;

use crate::components::{Parent, Transform};

/// Guard against malformed (cyclic) hierarchies.
const MAX_DEPTH: usize = 32;

fn parent_of(world: &World, entity: Entity) -> Option<Entity> {
    world.get::<&Parent>(entity).ok().map(|p| p.0)
}

/// Topmost ancestor of `entity` (itself if it has no parent).
pub fn root_of(world: &World, entity: Entity) -> Entity {
    let mut current = entity;
    for _ in 0..MAX_DEPTH {
        match parent_of(world, current) {
            Some(parent) if world.contains(parent) => current = parent,
            _ => break,
        }
    }
    current
}

/// World-space pose, composing transforms up the parent chain.
pub fn world_pose(world: &World, entity: Entity) -> Option<Pose> {
    let mut pose = world.get::<&Transform>(entity).ok()?.0;
    let mut current = entity;
    for _ in 0..MAX_DEPTH {
        let Some(parent) = parent_of(world, current) else {
            break;
        };
        let Ok(parent_tf) = world.get::<&Transform>(parent) else {
            break;
        };
        pose = parent_tf.0.compose(&pose);
        current = parent;
    }
    Some(pose)
}

/// `root` followed by every entity below it, breadth first.
pub fn subtree(world: &World, root: Entity) -> Vec<Entity> {
    let links: Vec<(Entity, Entity)> = world
        .query::<&Parent>()
        .iter()
        .map(|(child, parent)| (child, parent.0))
        .collect();

    let mut out = vec![root];
    let mut cursor = 0;
    while cursor < out.len() {
        let node = out[cursor];
        for &(child, parent) in &links {
            if parent == node && !out.contains(&child) {
                out.push(child);
            }
        }
        cursor += 1;
    }
    out
}

/// The collectible owning `entity`: itself or its nearest ancestor with a [`Collectible`].
pub fn find_collectible(world: &World, entity: Entity) -> Option<Entity> {
    let mut current = entity;
    for _ in 0..MAX_DEPTH {
        if world.get::<&Collectible>(current).is_ok() {
            return Some(current);
        }
        current = parent_of(world, current)?;
    }
    None
}

/// Despawn `root` and its whole subtree. Returns the number of entities removed.
pub fn despawn_recursive(world: &mut World, root: Entity) -> usize {
    let doomed = subtree(world, root);
    doomed.into_iter().filter(|&e| world.despawn(e).is_ok()).count()
}
