//! Simulation state and RNG plumbing

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Physical state of the drop
///
/// `angle` is the signed tilt from vertical in degrees (0 = balanced
/// upright); `velocity` is its per-tick rate of change. Neither is clamped:
/// the session ends once `|angle|` exceeds the failure threshold, so bounds
/// are enforced by termination, not by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimState {
    pub angle: f32,
    pub velocity: f32,
}

impl SimState {
    /// Perfectly balanced, at rest
    pub const UPRIGHT: Self = Self {
        angle: 0.0,
        velocity: 0.0,
    };
}

/// Seeded noise source for per-tick instability
///
/// Thin wrapper over `Pcg32` so the seed stays available for logging and
/// reproducing a session.
#[derive(Debug, Clone)]
pub struct NoiseRng {
    seed: u64,
    rng: Pcg32,
}

impl NoiseRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw one tick's noise, uniform in [-0.5, 0.5)
    pub fn next_noise(&mut self) -> f32 {
        self.rng.random::<f32>() - 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_range() {
        let mut rng = NoiseRng::new(12345);
        for _ in 0..10_000 {
            let n = rng.next_noise();
            assert!((-0.5..0.5).contains(&n), "noise out of range: {}", n);
        }
    }

    #[test]
    fn test_noise_determinism() {
        let mut a = NoiseRng::new(99999);
        let mut b = NoiseRng::new(99999);
        for _ in 0..100 {
            assert_eq!(a.next_noise(), b.next_noise());
        }
    }
}
