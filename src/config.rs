//! Rig configuration parameters
//!
//! All tunable parameters for the servo test rig. The defaults reproduce the
//! reference bench setup; a JSON document can override any subset of them.
//! Unknown keys are rejected rather than ignored.

use serde::{Deserialize, Serialize};

use crate::drivers::button::ButtonMask;
use crate::error::{Error, Result};

/// Core rig configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RigConfig {
    // --- Clock ---
    /// Target system clock (Hz)
    pub sys_clock_hz: u32,

    // --- Servo PWM ---
    /// Servo frame rate (Hz)
    pub servo_frequency_hz: u32,

    // --- Heartbeat ---
    /// Run-time heartbeat tick rate (Hz)
    pub heartbeat_tick_hz: u32,
    /// Ticks between heartbeat LED toggles
    pub heartbeat_toggle_ticks: u32,

    // --- Console ---
    /// Console UART baud rate
    pub console_baud: u32,
    /// Echo every received byte before it is dispatched
    pub echo_input: bool,

    // --- Start gate ---
    /// Button combination that releases the start gate
    pub start_button: ButtonMask,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            // Clock
            sys_clock_hz: 120_000_000,

            // Servo PWM
            servo_frequency_hz: 50,

            // Heartbeat
            heartbeat_tick_hz: 12,
            heartbeat_toggle_ticks: 5,

            // Console
            console_baud: 115_200,
            echo_input: true,

            // Start gate
            start_button: ButtonMask::LEFT,
        }
    }
}

impl RigConfig {
    /// Parse a (possibly partial) JSON override document.
    /// Missing fields keep their defaults; the result is validated.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the rig cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.sys_clock_hz == 0 {
            return Err(Error::Config("sys_clock_hz must be non-zero"));
        }
        if self.servo_frequency_hz == 0 {
            return Err(Error::Config("servo_frequency_hz must be non-zero"));
        }
        if self.heartbeat_tick_hz == 0 || self.heartbeat_tick_hz > self.sys_clock_hz {
            return Err(Error::Config("heartbeat_tick_hz out of range"));
        }
        if self.heartbeat_toggle_ticks == 0 {
            return Err(Error::Config("heartbeat_toggle_ticks must be non-zero"));
        }
        if self.console_baud == 0 {
            return Err(Error::Config("console_baud must be non-zero"));
        }
        if self.start_button.is_empty() {
            return Err(Error::Config("start_button must name at least one button"));
        }
        // The gate waits for an exact match, so a bit with no button behind
        // it would never open.
        if !ButtonMask::ALL.contains(self.start_button) {
            return Err(Error::Config("start_button names a button the rig does not have"));
        }
        Ok(())
    }
}
