//! Advances animation playback and stops finished segments.

use hecs::World;

use haenyeo_core::constants::TIME_EPSILON;

use crate::components::Animator;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, animator) in world.query_mut::<&mut Animator>() {
        let finished = match animator.playing.as_mut() {
            Some(clip) => {
                clip.remaining -= dt;
                clip.remaining <= TIME_EPSILON
            }
            None => false,
        };
        if finished {
            animator.playing = None;
        }
    }
}
