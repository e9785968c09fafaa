//! ECS components for hecs entities, plus the static island record.
//!
//! Components are plain data structs with no game logic.
//! Game logic lives in systems, not components.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Position, Velocity};

/// Index of an island in the obstacle map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IslandId(pub usize);

/// Static circular no-go zone with a home port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Island {
    pub center: Position,
    pub radius: f64,
    /// Faction whose ships are based here. Not a collision attribute.
    pub faction: Faction,
    /// Docking point just off the island's edge.
    pub port: Position,
}

/// Ship hull: who it belongs to and how much punishment it can take.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hull {
    pub faction: Faction,
    /// Always within `0..=max_health`.
    pub health: u32,
    pub max_health: u32,
}

/// Ship steering state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Helm {
    pub direction: Direction,
    /// Set while an enemy is inside the engagement radius.
    pub attack_mode: bool,
}

/// Ship gun state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gunnery {
    /// Ticks until the next shot is allowed.
    pub cooldown: u32,
    /// Ticks of muzzle flash remaining (cosmetic).
    pub muzzle_flash: u32,
    /// Ship selected as target on the most recent tick.
    pub target: Option<hecs::Entity>,
}

/// Recent positions for wake rendering, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WakeTrail {
    pub positions: VecDeque<Position>,
}

/// A cannonball in flight or in its post-impact animation.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub velocity: Velocity,
    /// Distance left before the ball drops into the sea.
    pub range_left: f64,
    /// Ship the ball was aimed at. May no longer exist.
    pub target: hecs::Entity,
    pub phase: ProjectilePhase,
    /// Ticks spent in the current resolved phase.
    pub phase_ticks: u32,
    pub debris: Vec<Debris>,
}

/// Decorative explosion fragment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Debris {
    pub position: Position,
    pub velocity: Velocity,
    pub life: u32,
}

/// Floating remains of a sunk ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wreck {
    /// Ticks until the wreck sinks.
    pub life: u32,
    pub age: u32,
}

/// Rowboat carrying a sunk ship's crew home.
#[derive(Debug, Clone)]
pub struct Transport {
    pub faction: Faction,
    pub destination: IslandId,
    /// Final docking point.
    pub port: Position,
    pub speed: f64,
    /// Remaining waypoints. Empty means direct-line travel to `port`.
    pub route: VecDeque<Position>,
    /// Whether a route was found at launch.
    pub routed: bool,
    pub arrived: bool,
    /// Ship produced on arrival. Set at most once.
    pub respawned: Option<hecs::Entity>,
    /// Ticks left at the dock before removal.
    pub linger: u32,
}

/// Health drop floating on the water.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    /// Ticks until the pickup disappears.
    pub life: u32,
    pub age: u32,
}
