//! Simulation engine for the naval skirmish.
//!
//! Owns the hecs ECS world, runs the ship, cannonball, wreck, pickup and
//! rowboat systems each tick, and produces WorldSnapshots for the host.

pub mod config;
pub mod engine;
pub mod error;
pub mod systems;
pub mod world_setup;

pub use config::{IslandSpec, SimConfig};
pub use engine::SimulationEngine;
pub use error::ConfigError;
pub use skirmish_core as core;

#[cfg(test)]
mod tests;
