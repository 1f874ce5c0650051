//! Run-time counters and the shutdown metrics snapshot.
//!
//! The rig core is permissive: unknown bytes are ignored, dropped console
//! bytes are not retried, and an overwritten inbox byte is lost. Each of
//! those events bumps a relaxed atomic counter here so the loss is at least
//! visible. Counting is a single `fetch_add` and never changes timing, so
//! the counters are safe to bump from the tick and receive contexts.

use core::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;

/// Event counters shared by every execution context.
pub struct RigCounters {
    unrecognized: AtomicU32,
    inbox_overwrites: AtomicU32,
    tx_dropped: AtomicU32,
    dispatched: AtomicU32,
    heartbeat_toggles: AtomicU32,
    pwm_saturated: AtomicU32,
}

macro_rules! counter {
    ($bump:ident, $field:ident) => {
        pub fn $bump(&self) {
            self.$field.fetch_add(1, Ordering::Relaxed);
        }
    };
}

impl RigCounters {
    pub const fn new() -> Self {
        Self {
            unrecognized: AtomicU32::new(0),
            inbox_overwrites: AtomicU32::new(0),
            tx_dropped: AtomicU32::new(0),
            dispatched: AtomicU32::new(0),
            heartbeat_toggles: AtomicU32::new(0),
            pwm_saturated: AtomicU32::new(0),
        }
    }

    counter!(record_unrecognized, unrecognized);
    counter!(record_inbox_overwrite, inbox_overwrites);
    counter!(record_dispatch, dispatched);
    counter!(record_heartbeat_toggle, heartbeat_toggles);
    counter!(record_pwm_saturation, pwm_saturated);

    /// Count `n` transmit bytes the console could not queue.
    pub fn record_tx_dropped(&self, n: u32) {
        if n > 0 {
            self.tx_dropped.fetch_add(n, Ordering::Relaxed);
        }
    }

    /// Consistent-enough copy of every counter (each load is independent).
    pub fn snapshot(&self) -> RuntimeMetrics {
        RuntimeMetrics {
            unrecognized: self.unrecognized.load(Ordering::Relaxed),
            inbox_overwrites: self.inbox_overwrites.load(Ordering::Relaxed),
            tx_dropped: self.tx_dropped.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            heartbeat_toggles: self.heartbeat_toggles.load(Ordering::Relaxed),
            pwm_saturated: self.pwm_saturated.load(Ordering::Relaxed),
        }
    }
}

impl Default for RigCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Counter snapshot, logged once at shutdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeMetrics {
    pub unrecognized: u32,
    pub inbox_overwrites: u32,
    pub tx_dropped: u32,
    pub dispatched: u32,
    pub heartbeat_toggles: u32,
    pub pwm_saturated: u32,
}

impl RuntimeMetrics {
    /// True when no byte was lost or ignored during the run.
    pub fn is_clean(&self) -> bool {
        self.unrecognized == 0 && self.inbox_overwrites == 0 && self.tx_dropped == 0
    }
}
