//! Port traits: the hexagonal boundary between the rig logic and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RigService / lifecycle (domain)
//! ```
//!
//! The hardware adapter implements every port; host tests implement them
//! with recording mocks.  The domain consumes them via generics, so the
//! command/control core never touches a register directly.

use crate::drivers::button::ButtonObservation;
use crate::drivers::indicators::LedMask;
use crate::error::Result;

// ───────────────────────────────────────────────────────────────
// System port (clock, interrupt mask, heartbeat timer)
// ───────────────────────────────────────────────────────────────

/// Core processor services used during bring-up and by the main loop.
pub trait SystemPort {
    /// Make floating-point state safe to use from interrupt handlers.
    fn enable_fpu_context(&mut self);

    /// Request a system clock of `hz`; returns the clock actually running.
    fn configure_clock(&mut self, hz: u32) -> Result<u32>;

    /// Hold off the tick and receive contexts.
    fn disable_interrupts(&mut self);

    /// Let the tick and receive contexts run.
    fn enable_interrupts(&mut self);

    /// Program the heartbeat tick rate (Hz). Takes effect when enabled.
    fn set_heartbeat_rate(&mut self, hz: u32);

    /// Start delivering heartbeat ticks.
    fn enable_heartbeat(&mut self);

    /// Called on every busy-wait iteration; yield to the host scheduler.
    fn idle(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Indicator port
// ───────────────────────────────────────────────────────────────

pub trait IndicatorPort {
    fn init_indicators(&mut self) -> Result<()>;

    /// Switch every LED in `mask` on or off.
    fn set_indicators(&mut self, mask: LedMask, on: bool);

    fn all_off(&mut self) {
        self.set_indicators(LedMask::ALL, false);
    }
}

// ───────────────────────────────────────────────────────────────
// Button port
// ───────────────────────────────────────────────────────────────

pub trait ButtonPort {
    fn init_buttons(&mut self) -> Result<()>;

    /// Sample the raw lines and return the debounced view.
    fn poll_buttons(&mut self) -> ButtonObservation;
}

// ───────────────────────────────────────────────────────────────
// Console port (transmit side; receive arrives via the inbox)
// ───────────────────────────────────────────────────────────────

pub trait ConsolePort {
    fn init_console(&mut self, baud: u32) -> Result<()>;

    /// Queue one byte without blocking. `false` means it was dropped.
    fn put_byte(&mut self, byte: u8) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Servo port
// ───────────────────────────────────────────────────────────────

pub trait ServoPort {
    /// Configure the PWM generator for `frequency_hz`; returns its period
    /// in counter ticks.
    fn init_servo_pwm(&mut self, frequency_hz: u32) -> Result<u32>;

    /// Write `pulse` ticks to both servo channels.
    fn set_pulse(&mut self, pulse: u32);

    /// Connect both channels to their pins (generator may still be stopped).
    fn enable_output(&mut self);

    /// Start the PWM generator counting.
    fn enable_generator(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Everything the lifecycle needs from the board, as one bound.
pub trait RigHardware: SystemPort + IndicatorPort + ButtonPort + ConsolePort + ServoPort {}

impl<T> RigHardware for T where T: SystemPort + IndicatorPort + ButtonPort + ConsolePort + ServoPort {}
