//! Per-tick physics step
//!
//! Advances the drop one fixed timestep. The operation order below is the
//! game's feel and must not be rearranged: noise, then gravity, then input,
//! then integration, then damping.

use serde::{Deserialize, Serialize};

use super::state::SimState;
use crate::tuning::Tuning;

/// Input signals for a single tick
///
/// Level-triggered: a flag stays set for as long as the side is held. Both
/// sides may be held at once; the impulses are additive and cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the simulation by one logical tick
///
/// `noise` must be uniform in [-0.5, 0.5) (or a test-supplied value). Total
/// over its domain: no error conditions, no clamping, no side effects.
pub fn step(state: &mut SimState, input: &TickInput, noise: f32, tuning: &Tuning) {
    // Unavoidable instability
    state.velocity += noise * tuning.noise_strength;

    // Inverted pendulum: the further tilted, the faster it falls further
    state.velocity += state.angle * tuning.gravity_factor;

    // Corrective impulses
    if input.left {
        state.velocity -= tuning.push_force;
    }
    if input.right {
        state.velocity += tuning.push_force;
    }

    state.angle += state.velocity;

    // Damping, after integrating the angle
    state.velocity *= tuning.friction;
}
