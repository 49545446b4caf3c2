//! Simulation engine for HAENYEO.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the presentation layer.

pub mod collectible;
pub mod components;
pub mod diagnostics;
pub mod engine;
pub mod hierarchy;
pub mod hook;
pub mod scanner;
pub mod spatial;
pub mod systems;
pub mod world_setup;

pub use haenyeo_core as core;
pub use haenyeo_reel as reel;
pub use engine::{SimConfig, SimulationEngine};
