//! Rig lifecycle: bring-up, start gate, main loop, shutdown.
//!
//! ```text
//!  bring_up ──▶ open_start_gate ──▶ arm ──▶ run_until_quit ──▶ shutdown
//!  (irq off)    (READY, buttons)    (irq on)  (inbox → dispatch)  (irq off)
//! ```
//!
//! Every step talks to the board only through the port traits, so the
//! whole sequence runs unchanged against the host mock.

use log::{info, warn};

use crate::config::RigConfig;
use crate::control::servo::ServoRange;
use crate::diagnostics::{RigCounters, RuntimeMetrics};
use crate::drivers::button::{ButtonMask, ButtonObservation};
use crate::drivers::console::console_print;
use crate::drivers::indicators::LedMask;
use crate::error::{Error, Result};
use crate::shared::SharedState;

use super::commands::Command;
use super::events::AppEvent;
use super::ports::{ButtonPort, EventSink, RigHardware, SystemPort};
use super::service::{RigService, print_menu};

/// Printed exactly once when the main loop exits.
pub const SHUTDOWN_MESSAGE: &str = "Dave, I'm scared. Will I dream?\r\n";

/// Outcome of bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BringUp {
    pub clock_hz: u32,
    pub period: u32,
    pub range: ServoRange,
}

/// What a completed run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub range: ServoRange,
    pub final_pulse: u32,
    pub metrics: RuntimeMetrics,
}

/// Clock, indicators, buttons, console and servo PWM, with interrupts held
/// off. Leaves both channels at `start_pulse` with the generator stopped.
pub fn bring_up<H: RigHardware>(
    hw: &mut H,
    config: &RigConfig,
    counters: &RigCounters,
) -> Result<BringUp> {
    hw.enable_fpu_context();
    let clock_hz = hw.configure_clock(config.sys_clock_hz)?;
    hw.disable_interrupts();

    hw.init_indicators()?;
    hw.all_off();
    hw.set_indicators(LedMask::INITIALIZING, true);

    hw.init_buttons()?;

    hw.init_console(config.console_baud)?;
    console_print(hw, counters, format_args!("Clock speed: {}\r\n", clock_hz));

    console_print(hw, counters, format_args!("Initializing servo motors...\n\r"));
    let period = hw.init_servo_pwm(config.servo_frequency_hz)?;
    if period == 0 {
        return Err(Error::Init("servo PWM reported a zero period"));
    }
    console_print(hw, counters, format_args!("PWM generator period: {}\r\n", period));

    let range = ServoRange::from_period(period);
    if range.step == 0 {
        warn!("bring_up: PWM period {} gives a zero angle step; w/s will not move", period);
    }
    hw.set_pulse(range.start_pulse);
    hw.enable_output();
    console_print(hw, counters, format_args!("Done!\n\r"));

    info!(
        "bring_up: clock={}Hz period={} start={} end={} step={}",
        clock_hz, period, range.start_pulse, range.end_pulse, range.step
    );
    Ok(BringUp { clock_hz, period, range })
}

/// Busy-poll the buttons until the debounced state equals `mask` exactly.
/// There is no timeout; `idle()` runs between polls.
pub fn wait_for_buttons<H: ButtonPort + SystemPort>(
    hw: &mut H,
    mask: ButtonMask,
) -> ButtonObservation {
    loop {
        let observation = hw.poll_buttons();
        if observation.stable == mask {
            return observation;
        }
        hw.idle();
    }
}

/// Prompt the operator, light READY, and block until the start buttons.
pub fn open_start_gate<H: RigHardware>(
    hw: &mut H,
    start_button: ButtonMask,
    counters: &RigCounters,
    sink: &mut impl EventSink,
) {
    console_print(
        hw,
        counters,
        format_args!(
            "Initialization Complete!\r\nPress {} to start.\r\n",
            start_button.describe()
        ),
    );
    hw.set_indicators(LedMask::READY, true);
    wait_for_buttons(hw, start_button);
    hw.set_indicators(LedMask::READY, false);

    info!("start gate: {} pressed", start_button.describe());
    sink.emit(&AppEvent::StartGateOpened(start_button));
}

/// Start the heartbeat and the PWM generator, print the menu, and let the
/// tick and receive contexts run.
pub fn arm<H: RigHardware>(hw: &mut H, shared: &SharedState, config: &RigConfig) {
    hw.set_indicators(LedMask::INITIALIZING, false);

    shared.heartbeat.reset(config.heartbeat_toggle_ticks);
    hw.set_heartbeat_rate(config.heartbeat_tick_hz);
    hw.enable_heartbeat();

    hw.enable_generator();
    print_menu(hw, &shared.counters);

    shared.set_echo(config.echo_input);
    hw.enable_interrupts();
}

/// Take and dispatch inbox bytes until a quit command is seen.
pub fn run_until_quit<H: RigHardware>(
    service: &mut RigService<'_>,
    shared: &SharedState,
    hw: &mut H,
    sink: &mut impl EventSink,
) {
    while !service.is_quit() {
        match shared.inbox.take() {
            Some(byte) => {
                service.dispatch(byte, hw, sink);
            }
            None => hw.idle(),
        }
    }
}

/// Park the servos at the start pulse, say goodbye, and mask interrupts.
pub fn shutdown<H: RigHardware>(
    service: &mut RigService<'_>,
    shared: &SharedState,
    hw: &mut H,
    sink: &mut impl EventSink,
) -> RunSummary {
    service.handle_command(Command::Reset, hw, sink);
    console_print(hw, &shared.counters, format_args!("{}", SHUTDOWN_MESSAGE));
    hw.set_indicators(LedMask::READY, false);
    hw.disable_interrupts();

    let metrics = shared.counters.snapshot();
    info!(
        "shutdown: dispatched={} ignored={} overwrites={} tx_dropped={} toggles={} saturated={}",
        metrics.dispatched,
        metrics.unrecognized,
        metrics.inbox_overwrites,
        metrics.tx_dropped,
        metrics.heartbeat_toggles,
        metrics.pwm_saturated
    );
    sink.emit(&AppEvent::Shutdown(metrics));

    RunSummary {
        range: service.range(),
        final_pulse: service.current_pulse(),
        metrics,
    }
}

/// The whole program: bring-up through shutdown.
pub fn run<H: RigHardware>(
    hw: &mut H,
    shared: &SharedState,
    config: &RigConfig,
    sink: &mut impl EventSink,
) -> Result<RunSummary> {
    config.validate()?;

    let boot = bring_up(hw, config, &shared.counters)?;
    sink.emit(&AppEvent::Started {
        period: boot.period,
        range: boot.range,
    });

    open_start_gate(hw, config.start_button, &shared.counters, sink);
    arm(hw, shared, config);

    let mut service = RigService::new(boot.range, &shared.counters);
    run_until_quit(&mut service, shared, hw, sink);

    Ok(shutdown(&mut service, shared, hw, sink))
}
