//! Unified error types for the servo rig firmware.
//!
//! The command/control core never fails: unknown bytes are ignored and
//! dropped console bytes are counted. Errors only exist at the edges,
//! during bring-up and configuration, and every one of them is fatal to
//! the run. All variants are `Copy` so they can be returned from the
//! hardware ports without allocation.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A peripheral could not be brought up.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
    /// An ESP-IDF call failed during peripheral configuration.
    Hw(HwInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Hw(e) => write!(f, "hw: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Hw(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
