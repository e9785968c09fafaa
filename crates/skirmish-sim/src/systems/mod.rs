//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod cleanup;
pub mod lifecycle;
pub mod pickups;
pub mod projectiles;
pub mod ship_ai;
pub mod snapshot;
pub mod transports;
pub mod wrecks;
