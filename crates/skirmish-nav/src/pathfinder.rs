//! Route planning capability shared by the rowboat strategies.

use std::collections::VecDeque;

use rand::RngCore;

use skirmish_core::enums::PathStrategy;
use skirmish_core::types::Position;

use crate::detour::DetourPathfinder;
use crate::grid::GridPathfinder;
use crate::obstacles::ObstacleMap;

/// Produces and maintains a waypoint route around islands.
pub trait Pathfinder: Send + Sync {
    /// Waypoints from `start` to `goal`, in travel order.
    ///
    /// An empty route means no route was found and the caller falls back to
    /// straight-line travel. Must return promptly even when `goal` is unreachable.
    fn plan(&self, map: &ObstacleMap, start: Position, goal: Position) -> Vec<Position>;

    /// Called once per tick before the traveller advances by `step`.
    /// Strategies that plan incrementally may edit `route` here.
    fn adjust(
        &self,
        _map: &ObstacleMap,
        _position: Position,
        _route: &mut VecDeque<Position>,
        _step: f64,
        _rng: &mut dyn RngCore,
    ) {
    }

    fn strategy(&self) -> PathStrategy;
}

/// Build the pathfinder for a strategy with default tuning.
pub fn pathfinder_for(strategy: PathStrategy) -> Box<dyn Pathfinder> {
    match strategy {
        PathStrategy::Grid => Box::new(GridPathfinder::default()),
        PathStrategy::Detour => Box::new(DetourPathfinder::default()),
    }
}
