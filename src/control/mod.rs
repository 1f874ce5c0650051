//! Servo position control.
//!
//! Open-loop only: the commanded pulse is arithmetic on the PWM period, and
//! nothing reads the servo back.

pub mod servo;
