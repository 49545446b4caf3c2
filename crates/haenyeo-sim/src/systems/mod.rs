//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. Component state lives in the world, and the
//! single-writer state machines live in the engine and are passed in.

pub mod animator;
pub mod camera;
pub mod cleanup;
pub mod gather;
pub mod locomotion;
pub mod movement;
pub mod reel;
pub mod scan;
pub mod snapshot;
pub mod wander;
