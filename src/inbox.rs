//! Single-slot console inbox.
//!
//! The console receive context deposits one byte at a time; the main loop
//! takes it.  There is no queue: a byte deposited before the previous one
//! was taken replaces it, so the main loop always sees the most recent
//! keystroke.
//!
//! ```text
//! ┌──────────────┐  deposit()  ┌──────────────┐  take()  ┌─────────────┐
//! │ RX context   │────────────▶│ AtomicU16    │────────▶│  Main loop  │
//! │ (producer)   │             │ pending|byte │          │ (consumer)  │
//! └──────────────┘             └──────────────┘          └─────────────┘
//! ```
//!
//! The pending flag and the byte share one atomic word, so a take can never
//! observe a flag from one deposit and a byte from another, and the
//! swap-to-empty both reads and clears in a single step.  A command is
//! therefore dispatched at most once and never torn.

use core::sync::atomic::{AtomicU16, Ordering};

const PENDING: u16 = 0x100;

/// Outcome of a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deposit {
    /// The slot was empty.
    Stored,
    /// An untaken byte was overwritten.
    Overwrote(u8),
}

/// One-element hand-off buffer between the receive context and the main loop.
pub struct ConsoleInbox {
    slot: AtomicU16,
}

impl ConsoleInbox {
    pub const fn new() -> Self {
        Self {
            slot: AtomicU16::new(0),
        }
    }

    /// Store `byte`, replacing any byte not yet taken.
    /// Safe to call from interrupt context (lock-free).
    pub fn deposit(&self, byte: u8) -> Deposit {
        let previous = self.slot.swap(PENDING | u16::from(byte), Ordering::AcqRel);
        if previous & PENDING != 0 {
            Deposit::Overwrote(previous as u8)
        } else {
            Deposit::Stored
        }
    }

    /// Take the pending byte, clearing the slot.
    pub fn take(&self) -> Option<u8> {
        let word = self.slot.swap(0, Ordering::AcqRel);
        if word & PENDING != 0 {
            Some(word as u8)
        } else {
            None
        }
    }
}

impl Default for ConsoleInbox {
    fn default() -> Self {
        Self::new()
    }
}
