//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured rig events to the
//! ESP-IDF logger (UART / USB-CDC in production).  The operator console
//! text is written separately; this is the engineering trace.
//!
//! The logger and the operator console share UART0, so events raised once
//! per keystroke are logged at `debug` and stay out of the operator's
//! character stream at the default `info` level.

use log::{Level, log};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }

    /// Level `event` is logged at.
    pub fn level(event: &AppEvent) -> Level {
        match event {
            AppEvent::PulseChanged { .. } | AppEvent::MenuShown | AppEvent::Ignored(_) => {
                Level::Debug
            }
            AppEvent::Started { .. }
            | AppEvent::StartGateOpened(_)
            | AppEvent::QuitRequested
            | AppEvent::Shutdown(_) => Level::Info,
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        let level = Self::level(event);
        match event {
            AppEvent::Started { period, range } => {
                log!(
                    level,
                    "START | period={} | start={} end={} step={}",
                    period, range.start_pulse, range.end_pulse, range.step
                );
            }
            AppEvent::StartGateOpened(mask) => {
                log!(level, "GATE  | opened by {}", mask.describe());
            }
            AppEvent::PulseChanged { command, pulse } => {
                log!(level, "SERVO | {:?} -> pulse={}", command, pulse);
            }
            AppEvent::MenuShown => {
                log!(level, "CMD   | menu");
            }
            AppEvent::QuitRequested => {
                log!(level, "CMD   | quit");
            }
            AppEvent::Ignored(byte) => {
                log!(level, "CMD   | ignored 0x{:02x}", byte);
            }
            AppEvent::Shutdown(m) => {
                log!(
                    level,
                    "STOP  | dispatched={} ignored={} overwrites={} tx_dropped={} \
                     toggles={} saturated={} clean={}",
                    m.dispatched,
                    m.unrecognized,
                    m.inbox_overwrites,
                    m.tx_dropped,
                    m.heartbeat_toggles,
                    m.pwm_saturated,
                    m.is_clean(),
                );
            }
        }
    }
}
