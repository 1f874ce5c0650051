//! Periodic timer contexts using ESP-IDF's esp_timer API.
//!
//! Two timers preempt the main loop:
//!
//! | Timer     | Period                  | Work per call                       |
//! |-----------|-------------------------|-------------------------------------|
//! | heartbeat | `1 / heartbeat_tick_hz` | advance heartbeat, drive LED4       |
//! | console   | 2 ms                    | read ≤ 1 UART byte, echo, deposit   |
//!
//! Callbacks run in the esp_timer task and receive the `&'static
//! SharedState` through the timer argument pointer. Both honour a global
//! interrupt mask ([`irq_enable`]/[`irq_disable`]) so bring-up can hold them
//! off until the main loop is ready, and both return immediately while
//! masked.
//!
//! On simulation targets no timers exist; tests drive the same handlers
//! directly.

use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init::HwInitError;
use crate::shared::SharedState;

static IRQ_ENABLED: AtomicBool = AtomicBool::new(false);

/// Let the timer contexts run.
pub fn irq_enable() {
    IRQ_ENABLED.store(true, Ordering::Release);
}

/// Hold the timer contexts off. A callback already running finishes.
pub fn irq_disable() {
    IRQ_ENABLED.store(false, Ordering::Release);
}

pub fn irq_enabled() -> bool {
    IRQ_ENABLED.load(Ordering::Acquire)
}

/// Heartbeat tick body. Returns the new LED state when it flips.
pub fn heartbeat_tick(shared: &SharedState) -> Option<bool> {
    if !irq_enabled() {
        return None;
    }
    let flipped = shared.heartbeat.on_tick();
    if flipped.is_some() {
        shared.counters.record_heartbeat_toggle();
    }
    flipped
}

/// Microseconds between heartbeat ticks; a zero rate is treated as 1 Hz.
pub fn heartbeat_period_us(rate_hz: u32) -> u64 {
    1_000_000 / u64::from(rate_hz.max(1))
}

#[cfg(target_os = "espidf")]
static mut HEARTBEAT_TIMER: esp_timer_handle_t = core::ptr::null_mut();
#[cfg(target_os = "espidf")]
static mut CONSOLE_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: HEARTBEAT_TIMER is written once in `create_timers()` before any
/// other access.  Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn heartbeat_timer() -> esp_timer_handle_t { unsafe { HEARTBEAT_TIMER } }

/// SAFETY: Same invariants as `heartbeat_timer()`.
#[cfg(target_os = "espidf")]
unsafe fn console_timer() -> esp_timer_handle_t { unsafe { CONSOLE_TIMER } }

#[cfg(target_os = "espidf")]
unsafe extern "C" fn heartbeat_cb(arg: *mut core::ffi::c_void) {
    // SAFETY: arg is the &'static SharedState passed to create_timers().
    let shared = unsafe { &*(arg as *const SharedState) };
    if let Some(on) = heartbeat_tick(shared) {
        crate::drivers::hw_init::gpio_write(crate::pins::LED4_GPIO, on);
    }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn console_poll_cb(arg: *mut core::ffi::c_void) {
    if !irq_enabled() {
        return;
    }
    // SAFETY: arg is the &'static SharedState passed to create_timers().
    let shared = unsafe { &*(arg as *const SharedState) };
    if let Some(byte) = crate::drivers::hw_init::uart_read_byte() {
        crate::drivers::console::console_rx_isr(shared, byte, crate::drivers::hw_init::uart_put_byte);
    }
}

/// Create both timers and start the console poll. The heartbeat timer is
/// created stopped; see [`start_heartbeat`].
#[cfg(target_os = "espidf")]
pub fn create_timers(shared: &'static SharedState) -> Result<(), HwInitError> {
    let arg = core::ptr::from_ref(shared).cast_mut().cast::<core::ffi::c_void>();

    // SAFETY: HEARTBEAT_TIMER and CONSOLE_TIMER are written here once at
    // boot from the main task before either callback can fire.
    unsafe {
        let heartbeat_args = esp_timer_create_args_t {
            callback: Some(heartbeat_cb),
            arg,
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"heartbeat".as_ptr(),
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&heartbeat_args, &raw mut HEARTBEAT_TIMER);
        if ret != ESP_OK { return Err(HwInitError::TimerCreateFailed(ret)); }

        let console_args = esp_timer_create_args_t {
            callback: Some(console_poll_cb),
            arg,
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"console_rx".as_ptr(),
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&console_args, &raw mut CONSOLE_TIMER);
        if ret != ESP_OK { return Err(HwInitError::TimerCreateFailed(ret)); }

        let ret = esp_timer_start_periodic(CONSOLE_TIMER, crate::pins::CONSOLE_POLL_PERIOD_US);
        if ret != ESP_OK { return Err(HwInitError::TimerCreateFailed(ret)); }
    }

    info!("hw_timer: console poll @{}us started", crate::pins::CONSOLE_POLL_PERIOD_US);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn create_timers(_shared: &'static SharedState) -> Result<(), crate::drivers::hw_init::HwInitError> {
    log::info!("hw_timer(sim): timers not created (handlers driven by tests)");
    Ok(())
}

/// (Re)start the heartbeat timer at `rate_hz`.
#[cfg(target_os = "espidf")]
pub fn start_heartbeat(rate_hz: u32) {
    let period_us = heartbeat_period_us(rate_hz);
    // SAFETY: heartbeat_timer() contract, main task only.
    unsafe {
        let t = heartbeat_timer();
        if t.is_null() {
            log::error!("hw_timer: heartbeat timer missing, create_timers() not called");
            return;
        }
        if esp_timer_is_active(t) {
            esp_timer_stop(t);
        }
        let ret = esp_timer_start_periodic(t, period_us);
        if ret != ESP_OK {
            log::error!("hw_timer: heartbeat start failed (rc={})", ret);
            return;
        }
    }
    info!("hw_timer: heartbeat @{}Hz", rate_hz);
}

#[cfg(not(target_os = "espidf"))]
pub fn start_heartbeat(rate_hz: u32) {
    log::debug!("hw_timer(sim): heartbeat period {}us", heartbeat_period_us(rate_hz));
}

/// Stop both timers.
#[cfg(target_os = "espidf")]
pub fn stop_timers() {
    // SAFETY: handles are valid if create_timers() succeeded; null-check
    // covers the failure path.
    unsafe {
        let ht = heartbeat_timer();
        if !ht.is_null() && esp_timer_is_active(ht) { esp_timer_stop(ht); }
        let ct = console_timer();
        if !ct.is_null() && esp_timer_is_active(ct) { esp_timer_stop(ct); }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_timers() {}
