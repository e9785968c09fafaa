//! Configuration errors.
//!
//! The simulation itself never fails once constructed; only loading and
//! validating a scenario can.

use std::path::PathBuf;

use skirmish_ai::profiles::ProfileError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("world size {width}x{height} must be positive")]
    InvalidWorld { width: f64, height: f64 },

    #[error("island {index} has non-positive radius {radius}")]
    InvalidIslandRadius { index: usize, radius: f64 },

    #[error("island {index} centre ({x}, {y}) lies outside the map")]
    IslandOutOfBounds { index: usize, x: f64, y: f64 },

    #[error("invalid behaviour profile: {0}")]
    InvalidProfile(#[from] ProfileError),
}
