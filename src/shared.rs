//! State shared between the main loop and the preemptive contexts.
//!
//! Everything here is const-constructible so the firmware can keep one
//! instance in a `static` and hand `&'static` references to the timer
//! callbacks, while host tests build a local one per test.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::diagnostics::RigCounters;
use crate::drivers::heartbeat::Heartbeat;
use crate::inbox::ConsoleInbox;

pub struct SharedState {
    /// Last received console byte, written by the receive context.
    pub inbox: ConsoleInbox,
    /// Heartbeat state machine, advanced by the tick context.
    pub heartbeat: Heartbeat,
    pub counters: RigCounters,
    echo: AtomicBool,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            inbox: ConsoleInbox::new(),
            heartbeat: Heartbeat::new(),
            counters: RigCounters::new(),
            echo: AtomicBool::new(true),
        }
    }

    /// Whether the receive context echoes bytes back before depositing them.
    pub fn echo(&self) -> bool {
        self.echo.load(Ordering::Relaxed)
    }

    pub fn set_echo(&self, on: bool) {
        self.echo.store(on, Ordering::Relaxed);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
