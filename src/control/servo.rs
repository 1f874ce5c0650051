//! Servo pulse arithmetic.
//!
//! Pulse widths are expressed in PWM counter ticks. For a generator period
//! of `P` ticks (one 20 ms frame at 50 Hz):
//!
//! | Quantity      | Formula                         | P = 37500 |
//! |---------------|---------------------------------|-----------|
//! | `start_pulse` | `floor(P * 0.025)` (0.5 ms)     | 937       |
//! | `end_pulse`   | `start_pulse * 5` (2.5 ms)      | 4685      |
//! | `step`        | `(end - start) / 100`           | 37        |
//!
//! `step` is non-zero only for `P >= 1000`; below that the range still has a
//! start and an end but angle steps do nothing.
//!
//! The current pulse is deliberately *not* clamped to the range. Repeated
//! increases walk past `end_pulse`, and a decrease below zero wraps like the
//! 32-bit unsigned register the value is written to.

/// Pulse bounds derived once from the PWM period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoRange {
    pub start_pulse: u32,
    pub end_pulse: u32,
    pub step: u32,
}

impl ServoRange {
    pub const fn from_period(period: u32) -> Self {
        // u64 keeps P * 25 exact for every u32 period.
        let start_pulse = (period as u64 * 25 / 1000) as u32;
        let end_pulse = start_pulse * 5;
        Self {
            start_pulse,
            end_pulse,
            step: (end_pulse - start_pulse) / 100,
        }
    }
}

/// Direction of a single angle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Increase,
    Decrease,
}

/// Commanded position of the servo pair.
#[derive(Debug, Clone)]
pub struct ServoDrive {
    range: ServoRange,
    current_pulse: u32,
}

impl ServoDrive {
    /// Starts at `range.start_pulse`.
    pub fn new(range: ServoRange) -> Self {
        Self {
            range,
            current_pulse: range.start_pulse,
        }
    }

    /// Move one step and return the new pulse.
    pub fn pulse_for_angle_step(&mut self, direction: StepDirection) -> u32 {
        self.current_pulse = match direction {
            StepDirection::Increase => self.current_pulse.wrapping_add(self.range.step),
            StepDirection::Decrease => self.current_pulse.wrapping_sub(self.range.step),
        };
        self.current_pulse
    }

    pub fn reset_to_start(&mut self) -> u32 {
        self.current_pulse = self.range.start_pulse;
        self.current_pulse
    }

    pub fn drive_to_end(&mut self) -> u32 {
        self.current_pulse = self.range.end_pulse;
        self.current_pulse
    }

    pub fn current_pulse(&self) -> u32 {
        self.current_pulse
    }

    pub fn range(&self) -> ServoRange {
        self.range
    }
}
