//! One-shot peripheral bring-up and raw register helpers.
//!
//! Configures the indicator and button GPIOs, the console UART, and the
//! LEDC servo timer/channels using raw ESP-IDF sys calls. Every bring-up
//! step is called once from the main task before interrupts are enabled.
//! Host builds get no-op stubs so the adapters compile and link in tests.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    UartInstallFailed(i32),
    UartConfigFailed(i32),
    LedcInitFailed(i32),
    TimerCreateFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc)  => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartInstallFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
            Self::UartConfigFailed(rc)  => write!(f, "UART param/pin config failed (rc={})", rc),
            Self::LedcInitFailed(rc)    => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::TimerCreateFailed(rc) => write!(f, "esp_timer create/start failed (rc={})", rc),
        }
    }
}

/// LEDC channels carrying the two servo signals.
pub const LEDC_CH_SERVO_1: u32 = 0;
pub const LEDC_CH_SERVO_2: u32 = 1;

/// Largest duty value the servo timer resolution can hold.
pub const SERVO_MAX_DUTY: u32 = (1 << crate::pins::SERVO_LEDC_RESOLUTION_BITS) - 1;

// ── Clock ─────────────────────────────────────────────────────

/// Current CPU clock in Hz.
#[cfg(target_os = "espidf")]
pub fn cpu_clock_hz() -> u32 {
    // SAFETY: ROM getter, no side effects.
    (unsafe { ets_get_cpu_frequency() }) * 1_000_000
}

/// Simulated ESP32-S3 default CPU clock.
#[cfg(not(target_os = "espidf"))]
pub fn cpu_clock_hz() -> u32 {
    240_000_000
}

// ── Indicator outputs ─────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_indicators() -> Result<(), HwInitError> {
    for &pin in &pins::LED_GPIOS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: single-threaded bring-up; cfg outlives the call.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: indicator LEDs configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_indicators() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): indicator init skipped");
    Ok(())
}

// ── Button inputs ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_buttons() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: (1u64 << pins::LEFT_BUTTON_GPIO) | (1u64 << pins::RIGHT_BUTTON_GPIO),
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        // Polled, never interrupt-driven.
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: single-threaded bring-up.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK { return Err(HwInitError::GpioConfigFailed(ret)); }

    info!("hw_init: buttons configured (active-low, pull-up)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_buttons() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): button init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: read-only register access on a configured input.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Simulated inputs read high (released for active-low buttons).
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: pin was configured as an output in init_indicators().
    unsafe { gpio_set_level(pin, u32::from(high)); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Console UART ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_console(baud: u32) -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: baud as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };

    // SAFETY: single-threaded bring-up. No TX buffer: uart_tx_chars writes
    // straight into the FIFO and never blocks.
    unsafe {
        let ret = uart_driver_install(
            pins::CONSOLE_UART_NUM,
            pins::CONSOLE_RX_BUFFER,
            0,
            0,
            core::ptr::null_mut(),
            0,
        );
        if ret != ESP_OK { return Err(HwInitError::UartInstallFailed(ret)); }

        let ret = uart_param_config(pins::CONSOLE_UART_NUM, &cfg);
        if ret != ESP_OK { return Err(HwInitError::UartConfigFailed(ret)); }

        let ret = uart_set_pin(
            pins::CONSOLE_UART_NUM,
            pins::CONSOLE_TX_GPIO,
            pins::CONSOLE_RX_GPIO,
            -1,
            -1,
        );
        if ret != ESP_OK { return Err(HwInitError::UartConfigFailed(ret)); }
    }

    info!("hw_init: console UART{} at {} baud", pins::CONSOLE_UART_NUM, baud);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_console(baud: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): console init skipped ({} baud)", baud);
    Ok(())
}

/// Queue one byte in the TX FIFO. Returns `false` if the FIFO was full.
#[cfg(target_os = "espidf")]
pub fn uart_put_byte(byte: u8) -> bool {
    // SAFETY: the driver is installed; uart_tx_chars does not block.
    let n = unsafe {
        uart_tx_chars(pins::CONSOLE_UART_NUM, (&raw const byte).cast(), 1)
    };
    n == 1
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_put_byte(_byte: u8) -> bool {
    true
}

/// Non-blocking read of one received byte.
#[cfg(target_os = "espidf")]
pub fn uart_read_byte() -> Option<u8> {
    let mut byte = 0u8;
    // SAFETY: the driver is installed; zero-tick timeout never blocks.
    let n = unsafe {
        uart_read_bytes(pins::CONSOLE_UART_NUM, (&raw mut byte).cast(), 1, 0)
    };
    (n == 1).then_some(byte)
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_read_byte() -> Option<u8> {
    None
}

// ── LEDC servo PWM ────────────────────────────────────────────

/// Configure the servo timer and both channels. The timer is left paused
/// and the outputs idle low; returns the generator period in duty ticks.
#[cfg(target_os = "espidf")]
pub fn init_servo_pwm(frequency_hz: u32) -> Result<u32, HwInitError> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_14_BIT,
        freq_hz: frequency_hz,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    // SAFETY: single-threaded bring-up.
    let ret = unsafe { ledc_timer_config(&timer) };
    if ret != ESP_OK { return Err(HwInitError::LedcInitFailed(ret)); }
    unsafe { ledc_timer_pause(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_timer_t_LEDC_TIMER_0) };

    let channels = [
        (LEDC_CH_SERVO_1, pins::SERVO_1_GPIO),
        (LEDC_CH_SERVO_2, pins::SERVO_2_GPIO),
    ];
    for (channel, gpio) in channels {
        let ret = unsafe {
            ledc_channel_config(&ledc_channel_config_t {
                speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
                channel,
                timer_sel: ledc_timer_t_LEDC_TIMER_0,
                gpio_num: gpio,
                duty: 0,
                hpoint: 0,
                ..Default::default()
            })
        };
        if ret != ESP_OK { return Err(HwInitError::LedcInitFailed(ret)); }
        unsafe { ledc_stop(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, 0) };
    }

    info!(
        "hw_init: LEDC servo timer {} Hz, {}-bit (servo1=CH{}, servo2=CH{})",
        frequency_hz,
        pins::SERVO_LEDC_RESOLUTION_BITS,
        LEDC_CH_SERVO_1,
        LEDC_CH_SERVO_2
    );
    Ok(1 << pins::SERVO_LEDC_RESOLUTION_BITS)
}

#[cfg(not(target_os = "espidf"))]
pub fn init_servo_pwm(frequency_hz: u32) -> Result<u32, HwInitError> {
    log::info!("hw_init(sim): servo PWM init skipped ({} Hz)", frequency_hz);
    Ok(1 << crate::pins::SERVO_LEDC_RESOLUTION_BITS)
}

/// Latch a new duty into `channel`. Takes effect at the next PWM frame.
#[cfg(target_os = "espidf")]
pub fn ledc_set_duty(channel: u32, duty: u32) {
    // SAFETY: channels were configured in init_servo_pwm(); only the main
    // loop writes duty.
    unsafe {
        esp_idf_svc::sys::ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set_duty(_channel: u32, _duty: u32) {}

/// Re-enable the signal output of both servo channels.
#[cfg(target_os = "espidf")]
pub fn servo_outputs_enable() {
    // SAFETY: ledc_update_duty re-arms a channel stopped by ledc_stop().
    unsafe {
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_CH_SERVO_1);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_CH_SERVO_2);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn servo_outputs_enable() {}

/// Start the servo timer counting.
#[cfg(target_os = "espidf")]
pub fn servo_generator_enable() {
    // SAFETY: timer 0 was configured in init_servo_pwm().
    unsafe { ledc_timer_resume(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_timer_t_LEDC_TIMER_0) };
}

#[cfg(not(target_os = "espidf"))]
pub fn servo_generator_enable() {}
