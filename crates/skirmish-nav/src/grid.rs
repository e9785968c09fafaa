//! Coarse navigation grid and breadth-first route planning.

use std::collections::VecDeque;

use tracing::trace;

use skirmish_core::constants::{NAV_CELL_SIZE, NAV_CLEARANCE};
use skirmish_core::enums::PathStrategy;
use skirmish_core::types::{Bounds, Position};

use crate::obstacles::ObstacleMap;
use crate::pathfinder::Pathfinder;

/// Neighbour expansion order: East, West, South, North.
const NEIGHBOR_OFFSETS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Uniform grid laid over the map. Cell (0, 0) is the top-left corner.
#[derive(Debug, Clone, Copy)]
pub struct NavGrid {
    pub cell_size: f64,
    pub cols: usize,
    pub rows: usize,
}

impl NavGrid {
    pub fn new(bounds: &Bounds, cell_size: f64) -> Self {
        Self {
            cell_size,
            cols: ((bounds.width / cell_size) as usize).max(1),
            rows: ((bounds.height / cell_size) as usize).max(1),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Cell containing `point`, clamped onto the grid.
    pub fn cell_of(&self, point: &Position) -> (usize, usize) {
        let col = (point.x / self.cell_size).floor().max(0.0) as usize;
        let row = (point.y / self.cell_size).floor().max(0.0) as usize;
        (col.min(self.cols - 1), row.min(self.rows - 1))
    }

    /// Continuous-space centre of a cell.
    pub fn center_of(&self, (col, row): (usize, usize)) -> Position {
        Position::new(
            col as f64 * self.cell_size + self.cell_size / 2.0,
            row as f64 * self.cell_size + self.cell_size / 2.0,
        )
    }

    fn index(&self, (col, row): (usize, usize)) -> usize {
        row * self.cols + col
    }

    fn cell_at(&self, index: usize) -> (usize, usize) {
        (index % self.cols, index / self.cols)
    }

    fn neighbor(&self, (col, row): (usize, usize), (dc, dr): (i64, i64)) -> Option<(usize, usize)> {
        let c = col as i64 + dc;
        let r = row as i64 + dr;
        if c < 0 || r < 0 || c >= self.cols as i64 || r >= self.rows as i64 {
            return None;
        }
        Some((c as usize, r as usize))
    }
}

/// Breadth-first search over a [`NavGrid`], four-way adjacency.
///
/// A cell is traversable when its centre is clear of every island by
/// `clearance`. The start cell is always expanded, even if blocked.
#[derive(Debug, Clone, Copy)]
pub struct GridPathfinder {
    pub cell_size: f64,
    pub clearance: f64,
}

impl Default for GridPathfinder {
    fn default() -> Self {
        Self {
            cell_size: NAV_CELL_SIZE,
            clearance: NAV_CLEARANCE,
        }
    }
}

impl GridPathfinder {
    /// Cell sequence from the cell after `start` up to and including the
    /// goal cell. `None` if the goal cannot be reached.
    pub fn find_cells(
        &self,
        map: &ObstacleMap,
        start: &Position,
        goal: &Position,
    ) -> Option<Vec<(usize, usize)>> {
        let grid = NavGrid::new(&map.bounds(), self.cell_size);
        let start_cell = grid.cell_of(start);
        let goal_cell = grid.cell_of(goal);
        let start_idx = grid.index(start_cell);
        let goal_idx = grid.index(goal_cell);

        let mut visited = vec![false; grid.cell_count()];
        let mut prev: Vec<Option<usize>> = vec![None; grid.cell_count()];
        let mut queue = VecDeque::new();
        visited[start_idx] = true;
        queue.push_back(start_cell);

        let mut expanded = 0usize;
        while let Some(cell) = queue.pop_front() {
            expanded += 1;
            if cell == goal_cell {
                break;
            }
            for offset in NEIGHBOR_OFFSETS {
                let Some(next) = grid.neighbor(cell, offset) else {
                    continue;
                };
                let idx = grid.index(next);
                if visited[idx] {
                    continue;
                }
                if map.blocks(&grid.center_of(next), self.clearance) {
                    continue;
                }
                visited[idx] = true;
                prev[idx] = Some(grid.index(cell));
                queue.push_back(next);
            }
        }
        trace!(expanded, reached = visited[goal_idx], "grid search finished");

        if !visited[goal_idx] {
            return None;
        }

        let mut cells = Vec::new();
        let mut idx = goal_idx;
        while idx != start_idx {
            cells.push(grid.cell_at(idx));
            idx = prev[idx]?;
        }
        cells.reverse();
        Some(cells)
    }
}

impl Pathfinder for GridPathfinder {
    fn plan(&self, map: &ObstacleMap, start: Position, goal: Position) -> Vec<Position> {
        let grid = NavGrid::new(&map.bounds(), self.cell_size);
        self.find_cells(map, &start, &goal)
            .map(|cells| cells.into_iter().map(|c| grid.center_of(c)).collect())
            .unwrap_or_default()
    }

    fn strategy(&self) -> PathStrategy {
        PathStrategy::Grid
    }
}
