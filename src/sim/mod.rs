//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one logical tick per `step` call)
//! - Seeded RNG only, noise supplied as a plain value
//! - No timing, rendering, or platform dependencies

pub mod state;
pub mod tick;

pub use state::{NoiseRng, SimState};
pub use tick::{TickInput, step};
