//! Hardware adapter: bridges the real board to the rig port traits.
//!
//! Owns the indicator, button and servo drivers and exposes them through
//! every port the lifecycle needs.  This is the only module in the system
//! that touches actual hardware.  On non-espidf targets the underlying
//! `hw_init`/`hw_timer` calls are cfg-gated simulation stubs.

use log::{debug, warn};

use crate::app::ports::{ButtonPort, ConsolePort, IndicatorPort, ServoPort, SystemPort};
use crate::drivers::button::{ButtonObservation, ButtonPair};
use crate::drivers::gpio::{LedcChannel, SysPin};
use crate::drivers::indicators::{Indicators, LedMask};
use crate::drivers::servo_pwm::ServoPair;
use crate::drivers::{hw_init, hw_timer};
use crate::error::Result;
use crate::pins;
use crate::shared::SharedState;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    shared: &'static SharedState,
    indicators: Indicators<SysPin>,
    buttons: ButtonPair<SysPin, SysPin>,
    servos: ServoPair<LedcChannel, LedcChannel>,
    heartbeat_hz: u32,
}

impl HardwareAdapter {
    /// Create the adapter and its timer contexts. Timers stay masked until
    /// the lifecycle enables interrupts.
    pub fn new(shared: &'static SharedState) -> Result<Self> {
        hw_timer::create_timers(shared)?;

        Ok(Self {
            shared,
            indicators: Indicators::new(pins::LED_GPIOS.map(SysPin::new)),
            buttons: ButtonPair::new(
                SysPin::new(pins::LEFT_BUTTON_GPIO),
                SysPin::new(pins::RIGHT_BUTTON_GPIO),
            ),
            servos: ServoPair::new(
                LedcChannel::new(hw_init::LEDC_CH_SERVO_1),
                LedcChannel::new(hw_init::LEDC_CH_SERVO_2),
            ),
            heartbeat_hz: 1,
        })
    }
}

impl Drop for HardwareAdapter {
    fn drop(&mut self) {
        hw_timer::stop_timers();
    }
}

// ── SystemPort implementation ─────────────────────────────────

impl SystemPort for HardwareAdapter {
    fn enable_fpu_context(&mut self) {
        // FreeRTOS on the S3 saves FPU state lazily per task; the timer
        // callbacks run in a task, so nothing to switch on.
        debug!("hw: FPU context handled by FreeRTOS");
    }

    fn configure_clock(&mut self, hz: u32) -> Result<u32> {
        let actual = hw_init::cpu_clock_hz();
        if actual != hz {
            // The CPU clock is fixed by sdkconfig at boot.
            warn!("hw: requested {} Hz clock, running at {} Hz", hz, actual);
        }
        Ok(actual)
    }

    fn disable_interrupts(&mut self) {
        hw_timer::irq_disable();
    }

    fn enable_interrupts(&mut self) {
        hw_timer::irq_enable();
    }

    fn set_heartbeat_rate(&mut self, hz: u32) {
        self.heartbeat_hz = hz;
    }

    fn enable_heartbeat(&mut self) {
        hw_timer::start_heartbeat(self.heartbeat_hz);
    }

    #[cfg(target_os = "espidf")]
    fn idle(&mut self) {
        // SAFETY: vTaskDelay is safe to call from any task context.
        unsafe { esp_idf_svc::sys::vTaskDelay(1) };
    }

    #[cfg(not(target_os = "espidf"))]
    fn idle(&mut self) {
        std::thread::yield_now();
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn init_indicators(&mut self) -> Result<()> {
        hw_init::init_indicators()?;
        Ok(())
    }

    fn set_indicators(&mut self, mask: LedMask, on: bool) {
        self.indicators.set(mask, on);
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl ButtonPort for HardwareAdapter {
    fn init_buttons(&mut self) -> Result<()> {
        hw_init::init_buttons()?;
        Ok(())
    }

    fn poll_buttons(&mut self) -> ButtonObservation {
        self.buttons.poll()
    }
}

// ── ConsolePort implementation ────────────────────────────────

impl ConsolePort for HardwareAdapter {
    fn init_console(&mut self, baud: u32) -> Result<()> {
        hw_init::init_console(baud)?;
        Ok(())
    }

    fn put_byte(&mut self, byte: u8) -> bool {
        hw_init::uart_put_byte(byte)
    }
}

// ── ServoPort implementation ──────────────────────────────────

impl ServoPort for HardwareAdapter {
    fn init_servo_pwm(&mut self, frequency_hz: u32) -> Result<u32> {
        Ok(hw_init::init_servo_pwm(frequency_hz)?)
    }

    fn set_pulse(&mut self, pulse: u32) {
        if self.servos.set_pulse(pulse) {
            self.shared.counters.record_pwm_saturation();
        }
    }

    fn enable_output(&mut self) {
        hw_init::servo_outputs_enable();
    }

    fn enable_generator(&mut self) {
        hw_init::servo_generator_enable();
    }
}
