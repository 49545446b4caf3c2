//! Autonomous wander: steer toward random goals inside each entity's bounds.

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use haenyeo_core::components::Velocity;
use haenyeo_core::constants::WANDER_BOUNDS_MARGIN;

use crate::components::{Transform, Wander};

pub fn run(world: &mut World, rng: &mut ChaCha8Rng, dt: f64) {
    for (_entity, (transform, velocity, wander)) in
        world.query_mut::<(&Transform, &mut Velocity, &mut Wander)>()
    {
        if !wander.enabled {
            continue;
        }
        let position = transform.0.position;

        wander.timer -= dt;
        if wander.timer <= 0.0 || position.distance(wander.goal) < wander.arrive_distance {
            retarget(wander, rng);
        }

        let desired = (wander.goal - position).normalize_or_zero() * wander.speed;
        let blend = 1.0 - (-wander.turn_rate * dt).exp();
        velocity.0 = velocity.0.lerp(desired, blend);
    }
}

fn retarget(wander: &mut Wander, rng: &mut ChaCha8Rng) {
    wander.goal = DVec3::new(
        inset_range(rng, wander.bounds_min.x, wander.bounds_max.x),
        inset_range(rng, wander.bounds_min.y, wander.bounds_max.y),
        inset_range(rng, wander.bounds_min.z, wander.bounds_max.z),
    );
    wander.speed = sample(rng, wander.speed_range);
    wander.timer = sample(rng, wander.retarget_range);
}

/// Uniform in [min + margin, max - margin], or the midpoint if the inset is empty.
fn inset_range(rng: &mut ChaCha8Rng, min: f64, max: f64) -> f64 {
    let lo = min + WANDER_BOUNDS_MARGIN;
    let hi = max - WANDER_BOUNDS_MARGIN;
    if lo < hi {
        rng.gen_range(lo..hi)
    } else {
        (min + max) * 0.5
    }
}

fn sample(rng: &mut ChaCha8Rng, (lo, hi): (f64, f64)) -> f64 {
    if lo < hi {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
