//! Serial console: receive hook and fire-and-forget transmit.
//!
//! Receive side: [`console_rx_isr`] runs in the receive context for every
//! byte. It echoes the byte (when enabled) and deposits it in the shared
//! inbox. It never dispatches; the main loop does that.
//!
//! Transmit side: [`ConsoleWriter`] adapts any [`ConsolePort`] to
//! `core::fmt::Write`. A byte the port cannot queue is dropped and
//! counted. There is no retry and no backpressure, so a formatted line
//! may reach the operator truncated but the caller never stalls.

use core::fmt;

use crate::app::ports::ConsolePort;
use crate::diagnostics::RigCounters;
use crate::inbox::Deposit;
use crate::shared::SharedState;

/// Receive-context handler for one byte.
///
/// `tx` is the non-blocking transmit primitive used for the echo; it
/// returns `false` when the byte was dropped.
pub fn console_rx_isr(shared: &SharedState, byte: u8, tx: impl FnOnce(u8) -> bool) {
    if shared.echo() && !tx(byte) {
        shared.counters.record_tx_dropped(1);
    }
    if let Deposit::Overwrote(_) = shared.inbox.deposit(byte) {
        shared.counters.record_inbox_overwrite();
    }
}

/// `fmt::Write` over a console port; counts dropped bytes.
pub struct ConsoleWriter<'a, C: ConsolePort + ?Sized> {
    port: &'a mut C,
    dropped: u32,
}

impl<'a, C: ConsolePort + ?Sized> ConsoleWriter<'a, C> {
    pub fn new(port: &'a mut C) -> Self {
        Self { port, dropped: 0 }
    }

    /// Bytes dropped so far by this writer.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

/// Format `args` onto the console, adding any dropped bytes to `counters`.
pub fn console_print<C: ConsolePort + ?Sized>(
    console: &mut C,
    counters: &RigCounters,
    args: fmt::Arguments<'_>,
) {
    let mut writer = ConsoleWriter::new(console);
    // ConsoleWriter never reports an error; drops are counted instead.
    let _ = fmt::Write::write_fmt(&mut writer, args);
    counters.record_tx_dropped(writer.dropped());
}

impl<C: ConsolePort + ?Sized> fmt::Write for ConsoleWriter<'_, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if !self.port.put_byte(byte) {
                self.dropped += 1;
            }
        }
        // Dropping is not an error for the caller.
        Ok(())
    }
}
