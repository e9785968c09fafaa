//! ObstacleMap: the static islands and map bounds, with clearance queries.

use skirmish_core::components::{Island, IslandId};
use skirmish_core::constants::{PORT_STANDOFF, SPAWN_BORDER_MARGIN};
use skirmish_core::enums::Faction;
use skirmish_core::types::{Bounds, Position};

/// Immutable set of circular no-go zones inside a rectangular map.
#[derive(Debug, Clone)]
pub struct ObstacleMap {
    bounds: Bounds,
    islands: Vec<Island>,
}

impl ObstacleMap {
    pub fn new(bounds: Bounds, islands: Vec<Island>) -> Self {
        Self { bounds, islands }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    pub fn island(&self, id: IslandId) -> Option<&Island> {
        self.islands.get(id.0)
    }

    /// True if `point` lies strictly within `radius + clearance` of any island.
    pub fn blocks(&self, point: &Position, clearance: f64) -> bool {
        self.first_blocking(point, clearance).is_some()
    }

    /// The first island (in map order) whose buffered radius contains `point`.
    pub fn first_blocking(&self, point: &Position, clearance: f64) -> Option<IslandId> {
        self.islands
            .iter()
            .position(|island| {
                let min_dist = island.radius + clearance;
                point.distance_sq_to(&island.center) < min_dist * min_dist
            })
            .map(IslandId)
    }

    /// Distance from `point` to the nearest buffered island edge.
    /// Negative inside an island. Infinite when the map has no islands.
    pub fn clearance_at(&self, point: &Position, clearance: f64) -> f64 {
        self.islands
            .iter()
            .map(|island| point.distance_to(&island.center) - island.radius - clearance)
            .fold(f64::INFINITY, f64::min)
    }

    /// The faction's home island and its port, if it has one.
    pub fn home_port(&self, faction: Faction) -> Option<(IslandId, Position)> {
        self.islands
            .iter()
            .position(|island| island.faction == faction)
            .map(|idx| (IslandId(idx), self.islands[idx].port))
    }
}

/// Docking point for an island: just off its edge along `bearing` (radians,
/// 0 = East, clockwise on screen), pulled inside the map's border margin.
pub fn port_point(center: &Position, radius: f64, bearing: f64, bounds: &Bounds) -> Position {
    let reach = radius + PORT_STANDOFF;
    let raw = center.offset(reach * bearing.cos(), reach * bearing.sin());
    bounds.clamp(&raw, SPAWN_BORDER_MARGIN)
}
