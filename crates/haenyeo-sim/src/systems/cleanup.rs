//! Cleanup system: removes collected entities scheduled for despawn.

use hecs::{Entity, World};

use crate::components::Despawn;
use crate::hierarchy;

/// Despawn every entity marked [`Despawn`] together with its subtree.
/// On return `despawn_buffer` holds the removed roots.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, _marker) in world.query_mut::<&Despawn>() {
        despawn_buffer.push(entity);
    }

    for &entity in despawn_buffer.iter() {
        hierarchy::despawn_recursive(world, entity);
    }
}
