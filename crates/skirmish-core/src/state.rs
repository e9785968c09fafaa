//! World snapshot: the complete visible state handed to the host after a tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Bounds, Position, SimTime};

/// Read-only view of every entity population.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub bounds: Option<Bounds>,
    pub islands: Vec<IslandView>,
    pub ships: Vec<ShipView>,
    pub projectiles: Vec<ProjectileView>,
    pub wrecks: Vec<WreckView>,
    pub transports: Vec<TransportView>,
    pub pickups: Vec<PickupView>,
    pub events: Vec<SimEvent>,
    pub tally: Tally,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IslandView {
    pub center: Position,
    pub radius: f64,
    pub faction: Faction,
    pub port: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub id: u64,
    pub position: Position,
    pub direction: Direction,
    pub health: u32,
    pub max_health: u32,
    pub faction: Faction,
    pub attack_mode: bool,
    /// Target chosen on the last tick, if any.
    pub target: Option<u64>,
    /// Muzzle flash still visible.
    pub firing: bool,
    /// Wake samples, newest first.
    pub wake: Vec<Position>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub phase: ProjectilePhase,
    /// Ticks spent exploding or splashing.
    pub phase_ticks: u32,
    /// Live debris particle positions.
    pub debris: Vec<Position>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WreckView {
    pub position: Position,
    pub age: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportView {
    pub position: Position,
    pub faction: Faction,
    pub destination: Position,
    /// Remaining waypoints.
    pub route: Vec<Position>,
    pub arrived: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub position: Position,
    pub age: u32,
}

/// Running totals since the simulation started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub shots_fired: u32,
    pub hits: u32,
    pub misses: u32,
    pub ships_sunk: u32,
    pub ships_respawned: u32,
    pub pickups_collected: u32,
}
