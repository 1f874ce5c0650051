//! Command dispatcher, the rig's application core.
//!
//! [`RigService`] owns the servo drive and the quit flag.  The main loop
//! hands it every byte taken from the console inbox; all I/O flows
//! through port traits injected at the call site.
//!
//! ```text
//!   inbox byte ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                  │      RigService      │
//!   ServoPort  ◀── │ Command · ServoDrive │ ──▶ ConsolePort
//!                  └──────────────────────┘
//! ```

use log::{debug, info};

use crate::control::servo::{ServoDrive, ServoRange, StepDirection};
use crate::diagnostics::RigCounters;
use crate::drivers::console::console_print;

use super::commands::Command;
use super::events::AppEvent;
use super::ports::{ConsolePort, EventSink, ServoPort};

/// Operator menu, printed at start-up and on `M`.
pub const MENU: &str = "Menu:\r\n\
                        M - Print this menu.\r\n\
                        Q - Quit this program.\r\n\
                        w - Increase servo angle (CW).\r\n\
                        s - Decrease servo angle (CCW).\r\n\
                        x - Reset the servo angle.\r\n\
                        e - Set servo angle furthest CCW.\r\n";

/// Print [`MENU`] on `console`.
pub fn print_menu<C: ConsolePort + ?Sized>(console: &mut C, counters: &RigCounters) {
    console_print(console, counters, format_args!("{}", MENU));
}

// ───────────────────────────────────────────────────────────────
// RigService
// ───────────────────────────────────────────────────────────────

pub struct RigService<'a> {
    drive: ServoDrive,
    quit: bool,
    counters: &'a RigCounters,
}

impl<'a> RigService<'a> {
    /// The drive starts at `range.start_pulse`, matching what bring-up
    /// already wrote to the channels.
    pub fn new(range: ServoRange, counters: &'a RigCounters) -> Self {
        Self {
            drive: ServoDrive::new(range),
            quit: false,
            counters,
        }
    }

    /// Decode and execute one received byte. Returns the command it mapped
    /// to, or `None` for an ignored byte.
    pub fn dispatch(
        &mut self,
        byte: u8,
        hw: &mut (impl ServoPort + ConsolePort),
        sink: &mut impl EventSink,
    ) -> Option<Command> {
        let Some(command) = Command::from_byte(byte) else {
            debug!("dispatch: ignoring byte 0x{:02x}", byte);
            self.counters.record_unrecognized();
            sink.emit(&AppEvent::Ignored(byte));
            return None;
        };

        self.counters.record_dispatch();
        self.handle_command(command, hw, sink);
        Some(command)
    }

    /// Execute a decoded command.
    pub fn handle_command(
        &mut self,
        command: Command,
        hw: &mut (impl ServoPort + ConsolePort),
        sink: &mut impl EventSink,
    ) {
        let (pulse, label) = match command {
            Command::Menu => {
                print_menu(hw, self.counters);
                sink.emit(&AppEvent::MenuShown);
                return;
            }
            Command::Quit => {
                if !self.quit {
                    info!("dispatch: quit requested");
                }
                self.quit = true;
                sink.emit(&AppEvent::QuitRequested);
                return;
            }
            Command::Increase => (
                self.drive.pulse_for_angle_step(StepDirection::Increase),
                "Angle Increase",
            ),
            Command::Decrease => (
                self.drive.pulse_for_angle_step(StepDirection::Decrease),
                "Angle Decrease",
            ),
            Command::Reset => (self.drive.reset_to_start(), "Start Position"),
            Command::End => (self.drive.drive_to_end(), "End Position"),
        };

        hw.set_pulse(pulse);
        console_print(hw, self.counters, format_args!("{}: {}\r\n", label, pulse));
        sink.emit(&AppEvent::PulseChanged { command, pulse });
    }

    /// Once set, stays set.
    pub fn is_quit(&self) -> bool {
        self.quit
    }

    pub fn current_pulse(&self) -> u32 {
        self.drive.current_pulse()
    }

    pub fn range(&self) -> ServoRange {
        self.drive.range()
    }
}
