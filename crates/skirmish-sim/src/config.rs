//! Scenario configuration: world size, islands, fleet size and tuning.

use std::path::Path;

use serde::{Deserialize, Serialize};

use skirmish_ai::profiles::BehaviorProfile;
use skirmish_core::constants::{SHIPS_PER_FACTION, WORLD_HEIGHT, WORLD_WIDTH};
use skirmish_core::enums::{Faction, PathStrategy, SplashMode};
use skirmish_core::types::{Bounds, Position};

use crate::error::ConfigError;

/// One island in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslandSpec {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub faction: Faction,
    /// Direction of the port from the centre, radians (0 = East, clockwise
    /// on screen). Drawn from the simulation RNG when absent.
    #[serde(default)]
    pub port_bearing: Option<f64>,
}

impl IslandSpec {
    pub fn new(x: f64, y: f64, radius: f64, faction: Faction) -> Self {
        Self {
            x,
            y,
            radius,
            faction,
            port_bearing: None,
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub world_width: f64,
    pub world_height: f64,
    pub islands: Vec<IslandSpec>,
    /// Ships placed at each island's port at start-up.
    pub ships_per_faction: u32,
    pub pathfinding: PathStrategy,
    pub splash: SplashMode,
    /// Leave a health pickup where a ship sinks.
    pub drop_pickup_on_death: bool,
    pub behavior: BehaviorProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            islands: default_islands(),
            ships_per_faction: SHIPS_PER_FACTION,
            pathfinding: PathStrategy::default(),
            splash: SplashMode::default(),
            drop_pickup_on_death: true,
            behavior: BehaviorProfile::default(),
        }
    }
}

/// One island per faction, spread over the default map.
fn default_islands() -> Vec<IslandSpec> {
    vec![
        IslandSpec::new(320.0, 240.0, 56.0, Faction::Red),
        IslandSpec::new(1480.0, 240.0, 48.0, Faction::Blue),
        IslandSpec::new(900.0, 500.0, 72.0, Faction::Green),
        IslandSpec::new(320.0, 760.0, 48.0, Faction::Yellow),
        IslandSpec::new(1480.0, 760.0, 56.0, Faction::Purple),
    ]
}

impl SimConfig {
    /// Parse a JSON scenario. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON scenario file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.world_width, self.world_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::InvalidWorld {
                width: self.world_width,
                height: self.world_height,
            });
        }
        let bounds = self.bounds();
        for (index, island) in self.islands.iter().enumerate() {
            if !(island.radius > 0.0) {
                return Err(ConfigError::InvalidIslandRadius {
                    index,
                    radius: island.radius,
                });
            }
            if !bounds.contains(&island.center(), 0.0) {
                return Err(ConfigError::IslandOutOfBounds {
                    index,
                    x: island.x,
                    y: island.y,
                });
            }
        }
        self.behavior.validate()?;
        Ok(())
    }
}
