//! Heartbeat indicator state machine.
//!
//! Runs entirely in the periodic tick context: every tick bumps a counter,
//! and when the counter reaches the toggle threshold the indicator flips and
//! the counter restarts from zero.  At the 12 Hz run-time tick rate and the
//! default threshold of 5 the LED toggles at 2.4 Hz.
//!
//! The state sits behind a critical-section mutex so the main context can
//! read a consistent snapshot (or reprogram the threshold) while ticks are
//! arriving.  The tick path never blocks, allocates, or touches the console.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Default ticks between toggles.
pub const DEFAULT_TOGGLE_TICKS: u32 = 5;

/// Snapshot of the heartbeat state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatState {
    /// Ticks since the last toggle.
    pub tick_count: u32,
    /// Whether the indicator is currently lit.
    pub indicator_on: bool,
    /// Ticks between toggles.
    pub threshold: u32,
}

impl HeartbeatState {
    pub const fn new(threshold: u32) -> Self {
        Self {
            tick_count: 0,
            indicator_on: false,
            threshold,
        }
    }

    /// Advance one tick; returns the new indicator state when it flips.
    pub fn advance(&mut self) -> Option<bool> {
        self.tick_count += 1;
        if self.tick_count < self.threshold {
            return None;
        }
        self.tick_count = 0;
        self.indicator_on = !self.indicator_on;
        Some(self.indicator_on)
    }
}

/// Interrupt-shared heartbeat.
pub struct Heartbeat {
    state: Mutex<CriticalSectionRawMutex, Cell<HeartbeatState>>,
}

impl Heartbeat {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(HeartbeatState::new(DEFAULT_TOGGLE_TICKS))),
        }
    }

    /// Tick handler.  Returns `Some(on)` when the indicator must be driven.
    pub fn on_tick(&self) -> Option<bool> {
        self.state.lock(|cell| {
            let mut state = cell.get();
            let flipped = state.advance();
            cell.set(state);
            flipped
        })
    }

    /// Reset to OFF with a zero counter and the given threshold.
    /// A zero threshold is treated as one (toggle every tick).
    pub fn reset(&self, threshold: u32) {
        self.state
            .lock(|cell| cell.set(HeartbeatState::new(threshold.max(1))));
    }

    pub fn snapshot(&self) -> HeartbeatState {
        self.state.lock(Cell::get)
    }
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new()
    }
}
