//! Peripheral drivers, hardware initialisation, and timer contexts.

pub mod button;
pub mod console;
pub mod gpio;
pub mod heartbeat;
pub mod hw_init;
pub mod hw_timer;
pub mod indicators;
pub mod servo_pwm;
