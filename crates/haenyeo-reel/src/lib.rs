//! Retrieval logic for HAENYEO.
//!
//! Camera blending, the spring tether that reels targets in, the rope curve,
//! the gather interaction sequencer and the highlight relay. Everything here
//! operates on plain data and on the capability traits in [`capability`];
//! there is no ECS dependency, so each state machine can be ticked directly.

pub mod camera;
pub mod capability;
pub mod curve;
pub mod gather;
pub mod highlight;
pub mod tether;

pub use haenyeo_core as core;

pub use camera::{CameraBlend, CameraProfile};
pub use capability::{AnimationPlayback, HookTarget, MovementLock, Suppressible, SuppressionHandle};
pub use gather::{GatherRequest, GatherSequencer, GatherTick};
pub use highlight::HighlightRelay;
pub use tether::{ReelSimulator, TetherState};

#[cfg(test)]
mod tests;
