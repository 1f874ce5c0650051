//! Two servo channels driven with the same pulse.
//!
//! The rig mounts two servos that must move together, so every pulse is
//! written to both channels back to back. The writes are independent: a
//! failure on one channel is logged and does not stop the other.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

pub struct ServoPair<A, B> {
    first: A,
    second: B,
}

impl<A: SetDutyCycle, B: SetDutyCycle> ServoPair<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Write `pulse` (counter ticks) to both channels.
    ///
    /// Returns `true` when the pulse exceeded the channel's duty range and
    /// was saturated to `max_duty_cycle()` for the register write.
    pub fn set_pulse(&mut self, pulse: u32) -> bool {
        let first = Self::write(&mut self.first, pulse, 1);
        let second = Self::write(&mut self.second, pulse, 2);
        first || second
    }

    fn write<C: SetDutyCycle>(channel: &mut C, pulse: u32, index: u8) -> bool {
        let max = channel.max_duty_cycle();
        let saturated = pulse > u32::from(max);
        let duty = if saturated {
            warn!("servo{}: pulse {} exceeds duty range, saturating to {}", index, pulse, max);
            max
        } else {
            pulse as u16
        };

        if let Err(e) = channel.set_duty_cycle(duty) {
            warn!("servo{}: duty write failed: {:?}", index, e);
        }
        saturated
    }
}
