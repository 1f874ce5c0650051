//! Four user indicator LEDs.
//!
//! LEDs are addressed by [`LedMask`] so one call can switch a single LED
//! or a group.  The rig gives three of the masks a meaning:
//!
//! | Mask           | LEDs    | Meaning                          |
//! |----------------|---------|----------------------------------|
//! | `INITIALIZING` | 1       | bring-up in progress             |
//! | `HEARTBEAT`    | 4       | toggled by the tick context      |
//! | `READY`        | 1–4     | waiting on the start gate        |

use core::ops::BitOr;

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

/// Bitset over LED1..LED4 (bit 0 = LED1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LedMask(u8);

impl LedMask {
    pub const NONE: Self = Self(0);
    pub const LED1: Self = Self(0b0001);
    pub const LED2: Self = Self(0b0010);
    pub const LED3: Self = Self(0b0100);
    pub const LED4: Self = Self(0b1000);
    pub const ALL: Self = Self(0b1111);

    pub const INITIALIZING: Self = Self::LED1;
    pub const HEARTBEAT: Self = Self::LED4;
    pub const READY: Self = Self::ALL;

    /// Iterate LED indices (0-based) selected by this mask.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        (0..4).filter(move |i| self.0 & (1 << i) != 0)
    }
}

impl BitOr for LedMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Four active-high indicator outputs.
pub struct Indicators<P> {
    pins: [P; 4],
}

impl<P: OutputPin> Indicators<P> {
    pub fn new(pins: [P; 4]) -> Self {
        Self { pins }
    }

    /// Drive every LED in `mask` on or off; LEDs outside the mask keep their state.
    pub fn set(&mut self, mask: LedMask, on: bool) {
        for i in mask.indices() {
            if let Some(pin) = self.pins.get_mut(i) {
                if let Err(e) = pin.set_state(PinState::from(on)) {
                    warn!("indicator LED{} write failed: {:?}", i + 1, e);
                }
            }
        }
    }
}
