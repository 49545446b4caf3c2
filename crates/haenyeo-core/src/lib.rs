//! Core types and definitions for the HAENYEO retrieval simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! math types, tuning constants and configuration, commands, events,
//! state snapshots and phase enums. It has no dependency on the ECS
//! or on any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
