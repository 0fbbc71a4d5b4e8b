//! Data-driven game balance
//!
//! Every knob the simulation and session read lives here, so difficulty can
//! be adjusted (or overridden from JSON) without touching control-flow code.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Tunable constants for one session
///
/// The physics fields are per-tick scalars calibrated against a 60 Hz driver;
/// drive at a different rate and they need re-tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Session length cap in seconds
    pub game_duration_secs: f64,
    /// Destabilizing acceleration per degree of tilt
    pub gravity_factor: f32,
    /// Scale applied to per-tick noise from [-0.5, 0.5)
    pub noise_strength: f32,
    /// Corrective impulse per tick while a side is pressed
    pub push_force: f32,
    /// Velocity damping multiplier in (0, 1)
    pub friction: f32,
    /// Failure threshold in degrees
    pub max_angle_deg: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_duration_secs: consts::GAME_DURATION_SECS,
            gravity_factor: consts::GRAVITY_FACTOR,
            noise_strength: consts::NOISE_STRENGTH,
            push_force: consts::PUSH_FORCE,
            friction: consts::FRICTION,
            max_angle_deg: consts::MAX_ANGLE_DEG,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning override from JSON
    ///
    /// Missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
