use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Tunable parameters for one duel.
///
/// Every field has a default from [`crate::constants`], so a gesture log can
/// override only the values it cares about.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    pub smooth_factor: f64,
    pub arrive_seconds: f64,
    pub max_attempts: u32,
    pub collision_radius_factor: f64,
    pub turn_gain: f64,
    pub frames_per_second: f64,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            smooth_factor: SMOOTH_FACTOR,
            arrive_seconds: ARRIVE_SECONDS,
            max_attempts: MAX_ATTEMPTS,
            collision_radius_factor: COLLISION_RADIUS_FACTOR,
            turn_gain: TURN_GAIN,
            frames_per_second: FRAMES_PER_SECOND,
        }
    }
}

impl DuelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smooth_factor > 0.0 && self.smooth_factor <= 1.0) {
            return Err(ConfigError::SmoothFactor(self.smooth_factor));
        }
        if !(self.arrive_seconds.is_finite() && self.arrive_seconds > 0.0) {
            return Err(ConfigError::ArriveSeconds(self.arrive_seconds));
        }
        if !(self.frames_per_second.is_finite() && self.frames_per_second > 0.0) {
            return Err(ConfigError::FramesPerSecond(self.frames_per_second));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::MaxAttempts);
        }
        if !(self.collision_radius_factor.is_finite() && self.collision_radius_factor >= 0.0) {
            return Err(ConfigError::CollisionRadiusFactor(self.collision_radius_factor));
        }
        if !(self.turn_gain.is_finite() && self.turn_gain >= 0.0) {
            return Err(ConfigError::TurnGain(self.turn_gain));
        }
        Ok(())
    }
}
