//! Steady Drop - an inverted-pendulum balance mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (per-tick physics, input signals)
//! - `session`: Session life-cycle state machine and result emission
//! - `score`: Survival-duration scoring tiers and messages
//! - `tuning`: Data-driven game balance
//! - `input`: Pointer/key event aggregation into level-triggered signals
//! - `driver`: Cancellable fixed-cadence tick scheduler

pub mod driver;
pub mod input;
pub mod score;
pub mod session;
pub mod sim;
pub mod tuning;

pub use score::GameResult;
pub use session::{GamePhase, Session, Snapshot};
pub use sim::{SimState, TickInput, step};
pub use tuning::Tuning;

/// Game configuration constants
///
/// Physics values are dimensionless per-tick scalars calibrated against the
/// 60 Hz driver. Changing `TICK_HZ` changes the feel; the physics constants
/// would need re-tuning to match.
pub mod consts {
    /// Driver tick rate (ticks per second)
    pub const TICK_HZ: f64 = 60.0;

    /// Session length cap in seconds (surviving this long is a win)
    pub const GAME_DURATION_SECS: f64 = 20.0;

    /// How hard the drop accelerates away from upright per degree of tilt
    pub const GRAVITY_FACTOR: f32 = 0.15;
    /// Random jitter intensity (scales noise drawn from [-0.5, 0.5))
    pub const NOISE_STRENGTH: f32 = 0.08;
    /// Corrective impulse per tick while a side is pressed
    pub const PUSH_FORCE: f32 = 0.4;
    /// Velocity damping multiplier, applied after integrating the angle
    pub const FRICTION: f32 = 0.96;
    /// Failure threshold in degrees of tilt
    pub const MAX_ANGLE_DEG: f32 = 45.0;
}
