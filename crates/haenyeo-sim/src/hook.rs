//! [`HookTarget`] adapter that lets the reel simulator drive an ECS entity.

use glam::DVec3;
use hecs::{Entity, World};

use haenyeo_core::components::{PhysicsBody, Velocity};
use haenyeo_core::enums::RetrievalMode;
use haenyeo_reel::capability::HookTarget;

use crate::collectible::{self, CollectOutput};
use crate::components::{Parent, SavedPhysics, Transform, Wander};
use crate::hierarchy;
use crate::spatial;

pub struct WorldHookTarget<'a, 'o> {
    pub world: &'a mut World,
    pub entity: Entity,
    /// Entity credited with the collection.
    pub by: Entity,
    pub out: &'a mut CollectOutput<'o>,
}

impl HookTarget for WorldHookTarget<'_, '_> {
    fn is_alive(&self) -> bool {
        self.world.contains(self.entity)
    }

    fn is_available(&self) -> bool {
        collectible::is_available(self.world, self.entity)
    }

    fn position(&self) -> DVec3 {
        hierarchy::world_pose(self.world, self.entity)
            .map(|p| p.position)
            .unwrap_or_default()
    }

    fn move_to(&mut self, position: DVec3) {
        let parent_pose = self
            .world
            .get::<&Parent>(self.entity)
            .ok()
            .and_then(|p| hierarchy::world_pose(self.world, p.0));
        if let Ok(mut transform) = self.world.get::<&mut Transform>(self.entity) {
            transform.0.position = match parent_pose {
                Some(parent) => parent.rotation.inverse() * (position - parent.position),
                None => position,
            };
        }
    }

    fn surface_distance(&self, point: DVec3) -> f64 {
        spatial::surface_distance(self.world, self.entity, point)
    }

    fn set_autonomous_motion_enabled(&mut self, enabled: bool) {
        if let Ok(mut wander) = self.world.get::<&mut Wander>(self.entity) {
            wander.enabled = enabled;
            // Pick a fresh goal on resume.
            wander.timer = 0.0;
        }
        if !enabled {
            if let Ok(mut velocity) = self.world.get::<&mut Velocity>(self.entity) {
                velocity.0 = DVec3::ZERO;
            }
        }
    }

    fn set_physics_gravity_owned(&mut self, owned: bool) {
        if owned {
            let Ok(saved) = self.world.remove_one::<SavedPhysics>(self.entity) else {
                return;
            };
            if let Ok(mut body) = self.world.get::<&mut PhysicsBody>(self.entity) {
                *body = saved.0;
            }
            return;
        }

        let saved = {
            let Ok(mut body) = self.world.get::<&mut PhysicsBody>(self.entity) else {
                return;
            };
            let saved = *body;
            body.use_gravity = false;
            body.kinematic = true;
            saved
        };
        // Keep the first saved state if ownership is taken twice.
        if self.world.get::<&SavedPhysics>(self.entity).is_err() {
            let _ = self.world.insert_one(self.entity, SavedPhysics(saved));
        }
        if let Ok(mut velocity) = self.world.get::<&mut Velocity>(self.entity) {
            velocity.0 = DVec3::ZERO;
        }
    }

    fn try_collect(&mut self) -> bool {
        collectible::try_collect(self.world, self.entity, self.by, RetrievalMode::Reel, self.out)
    }
}
