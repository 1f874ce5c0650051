//! embedded-hal pin and PWM handles over the raw `hw_init` helpers.
//!
//! These let the generic drivers ([`ButtonPair`](super::button::ButtonPair),
//! [`Indicators`](super::indicators::Indicators),
//! [`ServoPair`](super::servo_pwm::ServoPair)) run on the real board while
//! tests plug in fakes implementing the same traits.

use core::convert::Infallible;

use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use super::hw_init;

/// A GPIO already configured by `hw_init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SysPin(i32);

impl SysPin {
    pub const fn new(gpio: i32) -> Self {
        Self(gpio)
    }
}

impl digital::ErrorType for SysPin {
    type Error = Infallible;
}

impl InputPin for SysPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(hw_init::gpio_read(self.0))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!hw_init::gpio_read(self.0))
    }
}

impl OutputPin for SysPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        hw_init::gpio_write(self.0, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        hw_init::gpio_write(self.0, true);
        Ok(())
    }
}

/// One LEDC channel on the servo timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedcChannel(u32);

impl LedcChannel {
    pub const fn new(channel: u32) -> Self {
        Self(channel)
    }
}

impl pwm::ErrorType for LedcChannel {
    type Error = Infallible;
}

impl SetDutyCycle for LedcChannel {
    fn max_duty_cycle(&self) -> u16 {
        hw_init::SERVO_MAX_DUTY as u16
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        hw_init::ledc_set_duty(self.0, u32::from(duty));
        Ok(())
    }
}
