//! Enumeration types used throughout the simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A side in the skirmish. Determines targeting exclusion and home port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl Faction {
    /// Every faction, in port-assignment order.
    pub const ALL: [Faction; 5] = [
        Faction::Red,
        Faction::Blue,
        Faction::Green,
        Faction::Yellow,
        Faction::Purple,
    ];

    /// Whether ships of `self` may target ships of `other`.
    pub fn is_hostile_to(self, other: Faction) -> bool {
        match (self, other) {
            (Faction::Red, Faction::Red)
            | (Faction::Blue, Faction::Blue)
            | (Faction::Green, Faction::Green)
            | (Faction::Yellow, Faction::Yellow)
            | (Faction::Purple, Faction::Purple) => false,
            _ => true,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Faction::Red => "red",
            Faction::Blue => "blue",
            Faction::Green => "green",
            Faction::Yellow => "yellow",
            Faction::Purple => "purple",
        }
    }
}

/// Cardinal heading of a ship. Ships move one unit per tick along it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit step (dx, dy). North is -y.
    pub fn step(self) -> (f64, f64) {
        match self {
            Direction::North => (0.0, -1.0),
            Direction::East => (1.0, 0.0),
            Direction::South => (0.0, 1.0),
            Direction::West => (-1.0, 0.0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Uniformly random heading.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Heading along the dominant axis of the offset (dx, dy).
    /// Ties go to the vertical axis.
    pub fn toward(dx: f64, dy: f64) -> Direction {
        if dx.abs() > dy.abs() {
            if dx > 0.0 {
                Direction::East
            } else {
                Direction::West
            }
        } else if dy > 0.0 {
            Direction::South
        } else {
            Direction::North
        }
    }

    /// Heading directly away from the offset (dx, dy) on its dominant axis.
    pub fn away_from(dx: f64, dy: f64) -> Direction {
        Self::toward(dx, dy).opposite()
    }
}

/// Cannonball lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectilePhase {
    /// Ballistic flight toward the original aim point.
    #[default]
    Flying,
    /// Hit its target; explosion and debris animating.
    Exploded,
    /// Ran out of range; splash animating.
    Splashed,
    /// Animation finished, awaiting removal.
    Expired,
}

impl ProjectilePhase {
    /// Whether the projectile has resolved (hit or missed).
    pub fn is_resolved(self) -> bool {
        !matches!(self, ProjectilePhase::Flying)
    }
}

/// Route planning strategy for rowboats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathStrategy {
    /// Breadth-first search over a coarse grid, precomputed at launch.
    #[default]
    Grid,
    /// Straight-line travel with local perpendicular detours around islands.
    Detour,
}

/// How long a missed cannonball lingers after splashing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplashMode {
    /// Splash animates for `SPLASH_DURATION` ticks before removal.
    #[default]
    Animated,
    /// Removed on the tick it splashes.
    Instant,
}

/// Top-level simulation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}
