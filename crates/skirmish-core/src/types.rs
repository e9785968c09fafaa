//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in map space (pixels).
/// x = East, y = South (screen convention, origin at the top-left corner).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in map space (pixels per tick).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Rectangular map extent. The valid area is `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.distance_sq_to(other).sqrt()
    }

    /// Squared Euclidean distance. Preferred for radius comparisons.
    pub fn distance_sq_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Position shifted by the given offset.
    pub fn offset(&self, dx: f64, dy: f64) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    /// Move up to `max_step` toward `target`, never overshooting it.
    pub fn step_toward(&self, target: &Position, max_step: f64) -> Position {
        let delta = target.as_dvec2() - self.as_dvec2();
        let dist = delta.length();
        if dist <= max_step || dist == 0.0 {
            return *target;
        }
        Position::from(self.as_dvec2() + delta / dist * max_step)
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Velocity of magnitude `speed` pointing from `from` to `to`.
    /// Zero if the two points coincide.
    pub fn aimed(from: &Position, to: &Position, speed: f64) -> Self {
        let dir = (to.as_dvec2() - from.as_dvec2()).normalize_or_zero();
        let v = dir * speed;
        Self { x: v.x, y: v.y }
    }

    /// Speed magnitude (pixels per tick).
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True if `point` lies at least `margin` inside every edge.
    pub fn contains(&self, point: &Position, margin: f64) -> bool {
        point.x - margin >= 0.0
            && point.x + margin <= self.width
            && point.y - margin >= 0.0
            && point.y + margin <= self.height
    }

    /// Clamp `point` into the rectangle shrunk by `margin` on every side.
    pub fn clamp(&self, point: &Position, margin: f64) -> Position {
        Position::new(
            point.x.clamp(margin, (self.width - margin).max(margin)),
            point.y.clamp(margin, (self.height - margin).max(margin)),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: crate::constants::WORLD_WIDTH,
            height: crate::constants::WORLD_HEIGHT,
        }
    }
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

/// True if two circles overlap (strictly closer than the sum of their radii).
pub fn circles_overlap(a: &Position, ra: f64, b: &Position, rb: f64) -> bool {
    let min_dist = ra + rb;
    a.distance_sq_to(b) < min_dist * min_dist
}
