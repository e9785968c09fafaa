//! Navigation for the naval skirmish.
//!
//! Island obstacle queries, grid breadth-first routing,
//! and the incremental detour strategy for rowboats.

pub use skirmish_core as core;

pub mod detour;
pub mod grid;
pub mod obstacles;
pub mod pathfinder;

// Re-export key types for convenience.
pub use detour::DetourPathfinder;
pub use grid::{GridPathfinder, NavGrid};
pub use obstacles::{port_point, ObstacleMap};
pub use pathfinder::{pathfinder_for, Pathfinder};
