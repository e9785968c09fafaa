//! Host commands sent to the simulation.
//!
//! Commands are queued and applied at the start of the next tick.

use serde::{Deserialize, Serialize};

use crate::enums::Faction;
use crate::types::Position;

/// All actions a host may request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    /// Stop advancing the simulation.
    Pause,
    /// Resume a paused simulation.
    Resume,
    /// Drop a health pickup at the given point.
    SpawnPickup { position: Position },
    /// Launch an extra ship from the faction's home port.
    SpawnShip { faction: Faction },
}
