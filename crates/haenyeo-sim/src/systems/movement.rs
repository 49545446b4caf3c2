//! Kinematic integration system.
//!
//! Updates Transform from Velocity each tick: position += velocity * dt.
//! Kinematic bodies are moved by gameplay code and are skipped.

use hecs::World;

use haenyeo_core::components::{PhysicsBody, Velocity};
use haenyeo_core::constants::GRAVITY;

use crate::components::Transform;

/// Run kinematic integration for all entities with Transform + Velocity.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (transform, velocity, body)) in
        world.query_mut::<(&mut Transform, &mut Velocity, Option<&PhysicsBody>)>()
    {
        if let Some(body) = body {
            if body.kinematic {
                continue;
            }
            if body.use_gravity {
                velocity.0.y += GRAVITY * dt;
            }
        }
        transform.0.position += velocity.0 * dt;
    }
}
