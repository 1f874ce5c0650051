//! Servo Rig Firmware: Main Entry Point
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                      │
//! │                                                               │
//! │  HardwareAdapter                          LogEventSink        │
//! │  (System+Indicator+Button+Console+Servo)  (EventSink)         │
//! │                                                               │
//! │  ─────────────── Port Trait Boundary ──────────────────       │
//! │                                                               │
//! │  ┌─────────────────────────────────────────────────────┐      │
//! │  │  lifecycle::run  ──▶  RigService (dispatcher)       │      │
//! │  │  bring-up · start gate · main loop · shutdown       │      │
//! │  └─────────────────────────────────────────────────────┘      │
//! │                                                               │
//! │  esp_timer contexts: heartbeat tick · console receive poll    │
//! └───────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use servorig::adapters::hardware::HardwareAdapter;
use servorig::adapters::log_sink::LogEventSink;
use servorig::app::lifecycle;
use servorig::config::RigConfig;
use servorig::shared::SharedState;

/// Inbox, heartbeat and counters shared with the timer callbacks.
static SHARED: SharedState = SharedState::new();

/// Optional JSON overrides baked in at build time.
const CONFIG_OVERRIDES: Option<&str> = option_env!("SERVORIG_CONFIG");

fn load_config() -> RigConfig {
    match CONFIG_OVERRIDES {
        Some(json) => match RigConfig::from_json(json) {
            Ok(cfg) => {
                info!("Config overrides applied");
                cfg
            }
            Err(e) => {
                warn!("Config overrides rejected ({}), using defaults", e);
                RigConfig::default()
            }
        },
        None => RigConfig::default(),
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Servo Rig v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config();
    info!(
        "Config: clock={}Hz servo={}Hz heartbeat={}Hz/{} ticks baud={} start={}",
        config.sys_clock_hz,
        config.servo_frequency_hz,
        config.heartbeat_tick_hz,
        config.heartbeat_toggle_ticks,
        config.console_baud,
        config.start_button.describe()
    );

    // ── 3. Hardware + run ─────────────────────────────────────
    let mut hw = HardwareAdapter::new(&SHARED)?;
    let mut sink = LogEventSink::new();

    match lifecycle::run(&mut hw, &SHARED, &config, &mut sink) {
        Ok(summary) => {
            info!(
                "Run complete: servos parked at {} (range {}..={}, step {})",
                summary.final_pulse,
                summary.range.start_pulse,
                summary.range.end_pulse,
                summary.range.step
            );
            Ok(())
        }
        Err(e) => {
            error!("Rig bring-up failed: {}, halting", e);
            Err(e.into())
        }
    }
}
