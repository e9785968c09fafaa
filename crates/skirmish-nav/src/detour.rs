//! Incremental local detour strategy.
//!
//! The traveller heads straight for its next waypoint. Each tick the next
//! few step-samples along that line are checked against the islands; if one
//! is blocked, a single waypoint is inserted beside the blocking island,
//! perpendicular to the line of travel, on a randomly chosen side.
//!
//! Cheaper than a grid search but not complete: concave island clusters can
//! make the traveller loop or stall. The pending-detour cap keeps the route
//! bounded; past it the traveller presses on in a straight line.

use std::collections::VecDeque;

use glam::DVec2;
use rand::{Rng, RngCore};
use tracing::trace;

use skirmish_core::constants::{
    DETOUR_BUFFER, DETOUR_LOOKAHEAD_STEPS, MAX_PENDING_DETOURS, NAV_CLEARANCE,
};
use skirmish_core::components::IslandId;
use skirmish_core::enums::PathStrategy;
use skirmish_core::types::Position;

use crate::obstacles::ObstacleMap;
use crate::pathfinder::Pathfinder;

#[derive(Debug, Clone, Copy)]
pub struct DetourPathfinder {
    /// Island clearance used when sampling ahead.
    pub clearance: f64,
    /// Number of step-samples checked ahead.
    pub lookahead_steps: u32,
    /// Distance beyond the island edge for detour waypoints.
    pub buffer: f64,
    pub max_pending: usize,
}

impl Default for DetourPathfinder {
    fn default() -> Self {
        Self {
            clearance: NAV_CLEARANCE,
            lookahead_steps: DETOUR_LOOKAHEAD_STEPS,
            buffer: DETOUR_BUFFER,
            max_pending: MAX_PENDING_DETOURS,
        }
    }
}

impl DetourPathfinder {
    /// Sample `lookahead_steps` points along the line toward `target` and
    /// return the first blocking island, if any.
    fn blocked_ahead(
        &self,
        map: &ObstacleMap,
        position: &Position,
        target: &Position,
        step: f64,
    ) -> Option<IslandId> {
        let from = position.as_dvec2();
        let delta = target.as_dvec2() - from;
        let dist = delta.length();
        if dist < f64::EPSILON {
            return None;
        }
        let dir = delta / dist;
        (1..=self.lookahead_steps)
            .map(|i| (i as f64 * step).min(dist))
            .map(|d| Position::from(from + dir * d))
            .find_map(|sample| map.first_blocking(&sample, self.clearance))
    }
}

impl Pathfinder for DetourPathfinder {
    fn plan(&self, _map: &ObstacleMap, _start: Position, goal: Position) -> Vec<Position> {
        vec![goal]
    }

    fn adjust(
        &self,
        map: &ObstacleMap,
        position: Position,
        route: &mut VecDeque<Position>,
        step: f64,
        rng: &mut dyn RngCore,
    ) {
        // Everything but the final destination is a detour.
        if route.len() > self.max_pending {
            return;
        }
        let Some(next) = route.front().copied() else {
            return;
        };
        let Some(blocking) = self.blocked_ahead(map, &position, &next, step) else {
            return;
        };
        let Some(island) = map.island(blocking) else {
            return;
        };

        let heading = (next.as_dvec2() - position.as_dvec2()).normalize_or_zero();
        let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let perp = DVec2::new(-heading.y, heading.x) * side;
        let waypoint = Position::from(
            island.center.as_dvec2() + perp * (island.radius + self.buffer),
        );
        let waypoint = map.bounds().clamp(&waypoint, 0.0);

        trace!(
            island = blocking.0,
            x = waypoint.x,
            y = waypoint.y,
            "inserting detour waypoint"
        );
        route.push_front(waypoint);
    }

    fn strategy(&self) -> PathStrategy {
        PathStrategy::Detour
    }
}
