//! Tunable behaviour parameters for the ship FSM.
//!
//! Consolidates every radius, probability and timer the Combat AI uses so a
//! scenario file can retune them without touching code.

use serde::{Deserialize, Serialize};

use skirmish_core::constants::*;

/// Behavioural profile shared by every ship in a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorProfile {
    /// Enemy distance below which a ship enters attack mode.
    pub engagement_radius: f64,
    /// Beyond this distance an attacking ship closes in.
    pub approach_distance: f64,
    /// Below this distance an attacking ship backs off.
    pub too_close_distance: f64,
    /// Enemy distance below which a ship may fire.
    pub firing_radius: f64,
    /// 1-in-N chance per tick of a new heading in the orbit band.
    pub orbit_turn_odds: u32,
    /// 1-in-N chance per tick of a new heading while wandering.
    pub wander_turn_odds: u32,
    pub fire_cooldown_ticks: u32,
    pub muzzle_flash_ticks: u32,
    /// Health fraction below which pickups override combat.
    pub seek_health_fraction: f64,
    pub pickup_detect_range: f64,
    pub pickup_seek_speed: f64,
}

impl Default for BehaviorProfile {
    fn default() -> Self {
        Self {
            engagement_radius: ENGAGEMENT_RADIUS,
            approach_distance: APPROACH_DISTANCE,
            too_close_distance: TOO_CLOSE_DISTANCE,
            firing_radius: FIRING_RADIUS,
            orbit_turn_odds: ORBIT_TURN_ODDS,
            wander_turn_odds: WANDER_TURN_ODDS,
            fire_cooldown_ticks: FIRE_COOLDOWN_TICKS,
            muzzle_flash_ticks: MUZZLE_FLASH_TICKS,
            seek_health_fraction: SEEK_HEALTH_FRACTION,
            pickup_detect_range: PICKUP_DETECT_RANGE,
            pickup_seek_speed: PICKUP_SEEK_SPEED,
        }
    }
}

/// Why a behaviour profile was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("expected 0 <= too_close ({too_close}) < approach ({approach}) < engagement ({engagement})")]
    BandsOutOfOrder {
        too_close: f64,
        approach: f64,
        engagement: f64,
    },

    #[error("firing radius {firing} must be positive and within the engagement radius {engagement}")]
    FiringRadius { firing: f64, engagement: f64 },

    #[error("turn odds must be at least 1")]
    ZeroTurnOdds,

    #[error("seek health fraction {0} outside (0, 1]")]
    SeekFraction(f64),

    #[error("pickup seek speed {speed} must be positive and detect range {range} non-negative")]
    PickupTuning { speed: f64, range: f64 },
}

impl BehaviorProfile {
    /// Check that the distance bands are ordered and the odds are usable.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !(self.too_close_distance >= 0.0
            && self.too_close_distance < self.approach_distance
            && self.approach_distance < self.engagement_radius)
        {
            return Err(ProfileError::BandsOutOfOrder {
                too_close: self.too_close_distance,
                approach: self.approach_distance,
                engagement: self.engagement_radius,
            });
        }
        if !(self.firing_radius > 0.0 && self.firing_radius <= self.engagement_radius) {
            return Err(ProfileError::FiringRadius {
                firing: self.firing_radius,
                engagement: self.engagement_radius,
            });
        }
        if self.orbit_turn_odds == 0 || self.wander_turn_odds == 0 {
            return Err(ProfileError::ZeroTurnOdds);
        }
        if !(self.seek_health_fraction > 0.0 && self.seek_health_fraction <= 1.0) {
            return Err(ProfileError::SeekFraction(self.seek_health_fraction));
        }
        if !(self.pickup_seek_speed > 0.0 && self.pickup_detect_range >= 0.0) {
            return Err(ProfileError::PickupTuning {
                speed: self.pickup_seek_speed,
                range: self.pickup_detect_range,
            });
        }
        Ok(())
    }
}
