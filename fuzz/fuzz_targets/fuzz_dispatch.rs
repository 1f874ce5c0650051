//! Fuzz target: console bytes → inbox → `RigService::dispatch`
//!
//! Pushes arbitrary byte streams through the receive handler and the
//! dispatcher, taking from the inbox after every other byte so overwrites
//! happen too.  Asserts that nothing panics (all pulse math wraps) and
//! that every taken byte is accounted for exactly once.
//!
//! cargo fuzz run fuzz_dispatch

#![no_main]

use libfuzzer_sys::fuzz_target;
use servorig::app::events::AppEvent;
use servorig::app::ports::{ConsolePort, EventSink, ServoPort};
use servorig::app::service::RigService;
use servorig::control::servo::ServoRange;
use servorig::drivers::console::console_rx_isr;
use servorig::error::Result;
use servorig::shared::SharedState;

struct Sink;

impl EventSink for Sink {
    fn emit(&mut self, _event: &AppEvent) {}
}

struct Rig;

impl ServoPort for Rig {
    fn init_servo_pwm(&mut self, _frequency_hz: u32) -> Result<u32> {
        Ok(16_384)
    }
    fn set_pulse(&mut self, _pulse: u32) {}
    fn enable_output(&mut self) {}
    fn enable_generator(&mut self) {}
}

impl ConsolePort for Rig {
    fn init_console(&mut self, _baud: u32) -> Result<()> {
        Ok(())
    }
    fn put_byte(&mut self, byte: u8) -> bool {
        // Drop roughly half the output to exercise the drop path.
        byte & 1 == 0
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&period_seed, bytes)) = data.split_first() else {
        return;
    };
    let shared = SharedState::new();
    let period = u32::from(period_seed) * 1_000;
    let mut svc = RigService::new(ServoRange::from_period(period), &shared.counters);

    let mut taken = 0u32;
    for (i, &b) in bytes.iter().enumerate() {
        console_rx_isr(&shared, b, |e| e & 1 == 0);
        if i % 2 == 1 {
            if let Some(byte) = shared.inbox.take() {
                taken += 1;
                svc.dispatch(byte, &mut Rig, &mut Sink);
            }
        }
    }

    let leftover = u32::from(shared.inbox.take().is_some());
    let m = shared.counters.snapshot();
    assert_eq!(m.dispatched + m.unrecognized, taken);
    assert_eq!(taken + m.inbox_overwrites + leftover, bytes.len() as u32);
});
