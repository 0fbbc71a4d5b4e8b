//! Session life-cycle state machine
//!
//! Owns one play-through: starts the simulation, drives it one tick at a
//! time, watches for the two terminal conditions (fall-over, time-cap), and
//! emits exactly one [`GameResult`] per finished session.
//!
//! Misuse (ticking outside Running, redundant input updates) is a documented
//! no-op throughout; the core has no recoverable errors of its own.

use serde::{Deserialize, Serialize};

use crate::score::GameResult;
use crate::sim::{NoiseRng, SimState, TickInput, step};
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No simulation state allocated yet
    Idle,
    /// Actively simulating
    Running,
    /// Terminal until restart; holds the computed result
    Finished,
}

/// Read-only per-tick view for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    /// Signed tilt in degrees
    pub angle: f32,
    /// Wall-clock seconds since the session started
    pub elapsed_secs: f64,
}

/// One play-through from start to fall-over or time-cap
///
/// Timestamps are caller-supplied monotonic seconds, so the controller never
/// touches a clock itself and tests can drive time directly.
#[derive(Debug, Clone)]
pub struct Session {
    tuning: Tuning,
    rng: NoiseRng,
    phase: GamePhase,
    started_at: f64,
    elapsed_secs: f64,
    sim: SimState,
    input: TickInput,
    result: Option<GameResult>,
}

impl Session {
    /// Create an idle session with a seeded noise source
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            tuning,
            rng: NoiseRng::new(seed),
            phase: GamePhase::Idle,
            started_at: 0.0,
            elapsed_secs: 0.0,
            sim: SimState::UPRIGHT,
            input: TickInput::default(),
            result: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Result of the last finished session, if any
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Enter Running as a fresh session
    ///
    /// Valid from any phase: starting over a live session abandons it without
    /// emitting a result, matching a fresh start.
    pub fn start(&mut self, now: f64) {
        self.phase = GamePhase::Running;
        self.started_at = now;
        self.elapsed_secs = 0.0;
        self.sim = SimState::UPRIGHT;
        self.input = TickInput::default();
        self.result = None;
        log::info!("Session started (seed: {})", self.rng.seed());
    }

    /// Restart: semantically identical to [`Session::start`]
    pub fn restart(&mut self, now: f64) {
        log::info!("Session restarted");
        self.start(now);
    }

    /// Update the level-triggered input flags
    ///
    /// Last-writer-wins; applied immediately, but only read while Running.
    pub fn set_input(&mut self, input: TickInput) {
        self.input = input;
    }

    /// Advance one logical tick at wall-clock time `now`
    ///
    /// Returns `Some` exactly once, at the Running -> Finished transition.
    /// No-op outside Running, so a stale scheduled tick after termination is
    /// harmless.
    pub fn tick(&mut self, now: f64) -> Option<GameResult> {
        if self.phase != GamePhase::Running {
            return None;
        }
        let noise = self.rng.next_noise();
        self.tick_with_noise(now, noise)
    }

    /// [`Session::tick`] with caller-supplied noise (deterministic testing)
    pub fn tick_with_noise(&mut self, now: f64, noise: f32) -> Option<GameResult> {
        if self.phase != GamePhase::Running {
            return None;
        }

        let elapsed = now - self.started_at;
        self.elapsed_secs = elapsed;

        // Time-cap win: report the cap exactly and skip this tick's physics
        if elapsed >= self.tuning.game_duration_secs {
            return Some(self.finish(self.tuning.game_duration_secs));
        }

        step(&mut self.sim, &self.input, noise, &self.tuning);

        // Fall-over: the duration is measured before the step that crossed
        if self.sim.angle.abs() > self.tuning.max_angle_deg {
            return Some(self.finish(elapsed));
        }

        None
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            angle: self.sim.angle,
            elapsed_secs: match self.phase {
                GamePhase::Idle => 0.0,
                GamePhase::Running => self.elapsed_secs,
                GamePhase::Finished => self
                    .result
                    .as_ref()
                    .map(|r| r.duration_secs)
                    .unwrap_or(self.elapsed_secs),
            },
        }
    }

    fn finish(&mut self, duration_secs: f64) -> GameResult {
        let result = GameResult::for_duration(duration_secs);
        log::info!(
            "Session finished: {:.1}s, score {}",
            result.duration_secs,
            result.score
        );
        self.phase = GamePhase::Finished;
        self.result = Some(result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    fn quiet_tuning() -> Tuning {
        Tuning {
            noise_strength: 0.0,
            ..Tuning::default()
        }
    }

    /// Drive with zero noise until finished or `max_ticks` elapse
    fn run_quiet(session: &mut Session, max_ticks: u64) -> Option<GameResult> {
        for i in 1..=max_ticks {
            if let Some(result) = session.tick_with_noise(i as f64 * DT, 0.0) {
                return Some(result);
            }
        }
        None
    }

    #[test]
    fn test_idle_until_started() {
        let mut session = Session::new(1, Tuning::default());
        assert_eq!(session.phase(), GamePhase::Idle);

        // Ticks before start are no-ops
        assert!(session.tick(0.5).is_none());
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.snapshot().elapsed_secs, 0.0);

        session.start(0.0);
        assert_eq!(session.phase(), GamePhase::Running);
    }

    #[test]
    fn test_balanced_session_wins_at_time_cap() {
        // Scenario A: zero noise, zero gravity, no input -> runs to the cap
        let tuning = Tuning {
            gravity_factor: 0.0,
            noise_strength: 0.0,
            ..Tuning::default()
        };
        let mut session = Session::new(7, tuning);
        session.start(0.0);

        let result = run_quiet(&mut session, 60 * 25).expect("should reach the cap");
        assert_eq!(result.score, 3);
        assert_eq!(result.duration_secs, 20.0);
        assert_eq!(session.phase(), GamePhase::Finished);
    }

    #[test]
    fn test_time_cap_reports_cap_exactly_and_skips_physics() {
        let tuning = Tuning {
            gravity_factor: 0.0,
            noise_strength: 0.0,
            ..Tuning::default()
        };
        let mut session = Session::new(7, tuning);
        session.start(0.0);
        session.set_input(TickInput {
            left: false,
            right: true,
        });

        let before = session.snapshot().angle;
        // True elapsed exceeds the cap, but the result must report 20.0 and
        // the pending push must not be applied on the finishing tick.
        let result = session.tick_with_noise(20.0173, 0.0).expect("time-cap");
        assert_eq!(result.duration_secs, 20.0);
        assert_eq!(result.score, 3);
        assert_eq!(session.snapshot().angle, before);
    }

    #[test]
    fn test_fall_over_uses_pre_step_elapsed() {
        // Scenario B: one huge spike past the threshold at elapsed = 3.2s
        let mut session = Session::new(7, quiet_tuning());
        session.start(0.0);

        for i in 1..=191 {
            assert!(session.tick_with_noise(i as f64 * DT, 0.0).is_none());
        }
        let result = session
            .tick_with_noise(3.2, 1000.0)
            .expect("spike should end the session");
        assert_eq!(result.duration_secs, 3.2);
        assert_eq!(result.score, 1);
        assert_eq!(session.phase(), GamePhase::Finished);
    }

    #[test]
    fn test_ticks_after_finished_are_no_ops() {
        let mut session = Session::new(7, quiet_tuning());
        session.start(0.0);
        session.tick_with_noise(1.0, 1000.0).expect("fall-over");

        let snap = session.snapshot();
        assert!(session.tick_with_noise(2.0, 1000.0).is_none());
        assert_eq!(session.snapshot(), snap);
        assert_eq!(session.phase(), GamePhase::Finished);
    }

    #[test]
    fn test_restart_mid_session_abandons_without_result() {
        // Scenario C: restart while Running at elapsed = 7s
        let mut session = Session::new(7, quiet_tuning());
        session.start(0.0);
        for i in 1..=420 {
            assert!(session.tick_with_noise(i as f64 * DT, 0.0).is_none());
        }
        assert!(session.snapshot().elapsed_secs > 6.9);

        session.restart(7.0);
        assert_eq!(session.phase(), GamePhase::Running);
        assert!(session.result().is_none());
        let snap = session.snapshot();
        assert_eq!(snap.angle, 0.0);
        assert_eq!(snap.elapsed_secs, 0.0);

        // Fresh clock base: first tick after restart sees a small elapsed
        session.tick_with_noise(7.0 + DT, 0.0);
        assert!((session.snapshot().elapsed_secs - DT).abs() < 1e-9);
    }

    #[test]
    fn test_restart_from_finished_clears_result() {
        let mut session = Session::new(7, quiet_tuning());
        session.start(0.0);
        session.tick_with_noise(1.0, 1000.0).expect("fall-over");
        assert!(session.result().is_some());

        session.restart(5.0);
        assert_eq!(session.phase(), GamePhase::Running);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_set_input_is_idempotent() {
        let press = TickInput {
            left: true,
            right: false,
        };

        let mut once = Session::new(42, quiet_tuning());
        once.start(0.0);
        once.set_input(press);

        let mut repeated = Session::new(42, quiet_tuning());
        repeated.start(0.0);

        for i in 1..=300 {
            repeated.set_input(press);
            once.tick_with_noise(i as f64 * DT, 0.0);
            repeated.tick_with_noise(i as f64 * DT, 0.0);
            assert_eq!(once.snapshot(), repeated.snapshot());
        }
    }

    #[test]
    fn test_input_ignored_while_idle() {
        let mut session = Session::new(7, quiet_tuning());
        session.set_input(TickInput {
            left: true,
            right: true,
        });
        // Starting resets the flags captured before the session began
        session.start(0.0);
        session.tick_with_noise(DT, 0.0);
        assert_eq!(session.snapshot().angle, 0.0);
    }

    #[test]
    fn test_unattended_session_falls_to_tier_one() {
        // With gravity on and real noise, hands-off play ends well before
        // the mid tier.
        let mut session = Session::new(1234, Tuning::default());
        session.start(0.0);

        let mut result = None;
        for i in 1..=60 * 30 {
            if let Some(r) = session.tick(i as f64 * DT) {
                result = Some(r);
                break;
            }
        }
        let result = result.expect("unattended drop must fall");
        assert_eq!(result.score, 1);
        assert!(result.duration_secs < 15.0);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let mut a = Session::new(555, Tuning::default());
        let mut b = Session::new(555, Tuning::default());
        a.start(0.0);
        b.start(0.0);
        for i in 1..=600 {
            let now = i as f64 * DT;
            assert_eq!(a.tick(now), b.tick(now));
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }
}
