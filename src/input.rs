//! Input aggregation
//!
//! Collapses raw pointer/touch/key events into the two level-triggered
//! booleans the simulation reads. A pointer leaving its zone while pressed
//! counts as a release, so a signal can never get stuck on.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::sim::TickInput;

/// Which half of the play area an event landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Left,
    Right,
}

/// A raw pointer/touch event, already mapped to a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEvent {
    Press(Zone),
    Release(Zone),
    /// Pointer exited the zone; treated as a release
    Leave(Zone),
}

/// Single-threaded event-to-signal aggregator
///
/// Suitable when input and driver share one event loop (plain fields, no
/// synchronization needed).
#[derive(Debug, Clone, Copy, Default)]
pub struct InputTracker {
    signals: TickInput,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event; last-writer-wins
    pub fn apply(&mut self, event: ZoneEvent) {
        match event {
            ZoneEvent::Press(Zone::Left) => self.signals.left = true,
            ZoneEvent::Press(Zone::Right) => self.signals.right = true,
            ZoneEvent::Release(Zone::Left) | ZoneEvent::Leave(Zone::Left) => {
                self.signals.left = false
            }
            ZoneEvent::Release(Zone::Right) | ZoneEvent::Leave(Zone::Right) => {
                self.signals.right = false
            }
        }
    }

    /// Drop both signals (e.g. on session restart)
    pub fn clear(&mut self) {
        self.signals = TickInput::default();
    }

    pub fn signals(&self) -> TickInput {
        self.signals
    }
}

/// Cross-thread variant: atomic flags for when input events arrive on a
/// different thread than the driver tick
///
/// Level-triggered and last-writer-wins, so plain relaxed stores suffice; a
/// torn read is impossible on single booleans.
#[derive(Debug, Default)]
pub struct SharedInput {
    left: AtomicBool,
    right: AtomicBool,
}

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, event: ZoneEvent) {
        match event {
            ZoneEvent::Press(Zone::Left) => self.left.store(true, Ordering::Relaxed),
            ZoneEvent::Press(Zone::Right) => self.right.store(true, Ordering::Relaxed),
            ZoneEvent::Release(Zone::Left) | ZoneEvent::Leave(Zone::Left) => {
                self.left.store(false, Ordering::Relaxed)
            }
            ZoneEvent::Release(Zone::Right) | ZoneEvent::Leave(Zone::Right) => {
                self.right.store(false, Ordering::Relaxed)
            }
        }
    }

    pub fn clear(&self) {
        self.left.store(false, Ordering::Relaxed);
        self.right.store(false, Ordering::Relaxed);
    }

    /// Snapshot the flags for one tick
    pub fn signals(&self) -> TickInput {
        TickInput {
            left: self.left.load(Ordering::Relaxed),
            right: self.right.load(Ordering::Relaxed),
        }
    }
}
