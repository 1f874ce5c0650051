//! Outbound application events.
//!
//! The dispatcher and the lifecycle emit these through the
//! [`EventSink`](super::ports::EventSink) port.  They are observability
//! only: the operator-facing console text is written separately and does
//! not depend on any sink.

use crate::app::commands::Command;
use crate::control::servo::ServoRange;
use crate::diagnostics::RuntimeMetrics;
use crate::drivers::button::ButtonMask;

/// Structured events emitted by the rig core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Bring-up finished; the servo range is fixed from here on.
    Started { period: u32, range: ServoRange },

    /// The start gate opened.
    StartGateOpened(ButtonMask),

    /// A command moved the servos.
    PulseChanged { command: Command, pulse: u32 },

    /// The menu was printed.
    MenuShown,

    /// The operator asked to quit.
    QuitRequested,

    /// A byte that is not a command was received.
    Ignored(u8),

    /// The main loop exited; final counters.
    Shutdown(RuntimeMetrics),
}
