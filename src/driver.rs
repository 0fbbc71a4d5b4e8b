//! Fixed-cadence tick scheduler
//!
//! Decouples the simulation from any particular frame-callback API: a
//! [`TickLoop`] owns a cancellable repeating task that invokes the tick
//! callback at a steady rate. Cancellation is immediate; a tick scheduled
//! before `stop` that would fire after it is a no-op.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// What the tick callback wants the loop to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    /// Stop from inside the callback (e.g. on the Finished transition)
    Stop,
}

/// A cancellable repeating tick task on a dedicated thread
///
/// The callback receives seconds elapsed since the loop started, from a
/// monotonic clock.
pub struct TickLoop {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TickLoop {
    /// Spawn the loop, invoking `tick_fn` at `hz` ticks per second
    pub fn start<F>(hz: f64, mut tick_fn: F) -> Self
    where
        F: FnMut(f64) -> LoopControl + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();

        let handle = thread::spawn(move || {
            let period = Duration::from_secs_f64(1.0 / hz);
            let epoch = Instant::now();
            let mut next = epoch + period;

            loop {
                let now = Instant::now();
                if now < next {
                    thread::sleep(next - now);
                }
                // Re-check after sleeping: a stale wakeup must not tick
                if !flag.load(Ordering::Acquire) {
                    break;
                }
                if tick_fn(epoch.elapsed().as_secs_f64()) == LoopControl::Stop {
                    flag.store(false, Ordering::Release);
                    break;
                }
                next += period;
                // Resync instead of bursting if we fell badly behind
                if next + period < Instant::now() {
                    next = Instant::now() + period;
                }
            }
        });

        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Whether the loop is still ticking
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Cancel and wait for the loop thread to exit
    ///
    /// Idempotent. After this returns, no further ticks run.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TickLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
