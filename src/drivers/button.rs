//! Polled button debouncer for the left/right start-gate buttons.
//!
//! ## Hardware
//!
//! Two active-low momentary switches with pull-ups. There is no edge
//! interrupt: the caller samples both lines on every poll and the
//! debouncer filters the raw samples into a stable state.
//!
//! ## Debounce rule
//!
//! A button's stable state flips only after [`DEBOUNCE_POLLS`] consecutive
//! raw samples disagree with it. Any agreeing sample restarts the count.
//! Each poll reports the stable mask and the bits that flipped on that poll.

use core::ops::BitOr;

use embedded_hal::digital::InputPin;
use log::warn;
use serde::{Deserialize, Serialize};

/// Consecutive disagreeing samples required before a state change.
pub const DEBOUNCE_POLLS: u8 = 4;

/// Bitset over the two start-gate buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonMask(u8);

impl ButtonMask {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(0b01);
    pub const RIGHT: Self = Self(0b10);
    pub const ALL: Self = Self(0b11);

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Operator-facing name, used in the start-gate prompt.
    pub fn describe(self) -> &'static str {
        match self {
            Self::LEFT => "left button",
            Self::RIGHT => "right button",
            Self::ALL => "both buttons",
            _ => "no button",
        }
    }
}

impl BitOr for ButtonMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Result of one debounced poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonObservation {
    /// Debounced pressed state.
    pub stable: ButtonMask,
    /// Buttons whose debounced state changed on this poll.
    pub changed: ButtonMask,
}

/// Per-button consecutive-sample debouncer. Stack-allocated, no heap.
#[derive(Debug, Default)]
pub struct ButtonDebouncer {
    stable: u8,
    counts: [u8; 2],
}

impl ButtonDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw sample (pressed = bit set) and return the debounced view.
    pub fn update(&mut self, raw: ButtonMask) -> ButtonObservation {
        let mut changed = 0u8;

        for (bit_index, count) in self.counts.iter_mut().enumerate() {
            let bit = 1u8 << bit_index;
            if (raw.0 ^ self.stable) & bit == 0 {
                *count = 0;
                continue;
            }

            *count += 1;
            if *count >= DEBOUNCE_POLLS {
                self.stable ^= bit;
                changed |= bit;
                *count = 0;
            }
        }

        ButtonObservation {
            stable: ButtonMask(self.stable),
            changed: ButtonMask(changed),
        }
    }
}

/// The left/right button pair on two active-low input pins.
pub struct ButtonPair<L, R> {
    left: L,
    right: R,
    debouncer: ButtonDebouncer,
}

impl<L: InputPin, R: InputPin> ButtonPair<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self {
            left,
            right,
            debouncer: ButtonDebouncer::new(),
        }
    }

    /// Sample both lines and run the debouncer.
    pub fn poll(&mut self) -> ButtonObservation {
        let raw = self.sample();
        self.debouncer.update(raw)
    }

    fn sample(&mut self) -> ButtonMask {
        let mut raw = ButtonMask::NONE;
        if Self::is_pressed(&mut self.left) {
            raw = raw | ButtonMask::LEFT;
        }
        if Self::is_pressed(&mut self.right) {
            raw = raw | ButtonMask::RIGHT;
        }
        raw
    }

    fn is_pressed(pin: &mut impl InputPin) -> bool {
        // A failed read counts as released so a faulty line cannot open the gate.
        pin.is_low().unwrap_or_else(|e| {
            warn!("button read failed: {:?}", e);
            false
        })
    }
}
