//! Events emitted by the simulation for sound and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::Faction;
use crate::types::Position;

/// Something noteworthy that happened during a tick.
///
/// Entity references are `hecs::Entity::to_bits` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A ship fired a cannonball.
    ShipFired { ship: u64, target: u64, position: Position },
    /// A cannonball struck its target.
    ProjectileExploded { target: u64, position: Position },
    /// A cannonball ran out of range.
    ProjectileSplashed { position: Position },
    /// A ship's health reached zero.
    ShipSunk { faction: Faction, position: Position },
    /// A rowboat set off for its home port.
    TransportLaunched {
        faction: Faction,
        from: Position,
        to: Position,
        route_len: usize,
    },
    /// A rowboat delivered its crew and a new ship was launched.
    ShipRespawned { ship: u64, faction: Faction, position: Position },
    /// A ship picked up a health drop.
    PickupCollected { ship: u64, position: Position },
}
