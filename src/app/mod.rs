//! Application core: pure rig logic, zero register access.
//!
//! Command decoding, the dispatcher, and the bring-up/run/shutdown
//! sequence.  All interaction with the board happens through the **port
//! traits** in [`ports`], keeping this layer fully testable on the host.

pub mod commands;
pub mod events;
pub mod lifecycle;
pub mod ports;
pub mod service;
