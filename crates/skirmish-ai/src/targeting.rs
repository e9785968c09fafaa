//! Nearest-enemy and nearest-pickup selection.
//!
//! Both scans keep the first candidate on equal distance, so ties resolve by
//! the order of the slice the caller passes in.

use skirmish_core::enums::Faction;
use skirmish_core::types::Position;

/// A ship as seen by the targeting scan.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub position: Position,
    pub faction: Faction,
}

/// Result of a target scan: index into the contact slice plus distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetChoice {
    pub index: usize,
    pub position: Position,
    pub distance: f64,
}

/// Nearest hostile contact to `contacts[me]`, at any distance.
pub fn select_target(me: usize, contacts: &[Contact]) -> Option<TargetChoice> {
    let own = contacts.get(me)?;
    let mut best: Option<TargetChoice> = None;
    for (index, other) in contacts.iter().enumerate() {
        if index == me || !own.faction.is_hostile_to(other.faction) {
            continue;
        }
        let distance = own.position.distance_to(&other.position);
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(TargetChoice {
                index,
                position: other.position,
                distance,
            });
        }
    }
    best
}

/// Nearest pickup strictly closer than `range`.
pub fn nearest_pickup(position: &Position, pickups: &[Position], range: f64) -> Option<Position> {
    pickups
        .iter()
        .map(|p| (*p, position.distance_to(p)))
        .filter(|(_, d)| *d < range)
        .fold(None, |best: Option<(Position, f64)>, candidate| match best {
            Some(b) if b.1 <= candidate.1 => Some(b),
            _ => Some(candidate),
        })
        .map(|(p, _)| p)
}
