//! End-to-end runs of the full lifecycle against the mock rig.

use crate::mock_hw::{HwCall, MockRig, RecordingSink};
use servorig::app::events::AppEvent;
use servorig::app::lifecycle::{self, SHUTDOWN_MESSAGE};
use servorig::app::service::MENU;
use servorig::config::RigConfig;
use servorig::drivers::button::{ButtonMask, DEBOUNCE_POLLS};
use servorig::drivers::indicators::LedMask;
use servorig::error::Error;
use servorig::shared::SharedState;

fn rig_with_left_press(shared: &SharedState) -> MockRig<'_> {
    let mut rig = MockRig::new(shared);
    rig.press_buttons(ButtonMask::LEFT, 3);
    rig
}

#[test]
fn scenario_a_five_increases() {
    let shared = SharedState::new();
    let mut rig = rig_with_left_press(&shared);
    rig.type_keys(b"wwwwwQ");
    let mut sink = RecordingSink::new();

    let summary = lifecycle::run(&mut rig, &shared, &RigConfig::default(), &mut sink).unwrap();

    let printed = rig.printed();
    let menu_at = printed.find(MENU).expect("menu printed");
    let mut cursor = menu_at + MENU.len();
    for n in 1..=5u32 {
        let line = format!("Angle Increase: {}\r\n", 937 + n * 37);
        let at = printed[cursor..].find(&line).expect("increase line");
        cursor += at + line.len();
    }
    assert_eq!(rig.pulses, vec![937, 974, 1011, 1048, 1085, 1122, 937]);
    assert_eq!(summary.range.step, 37);
    assert_eq!(summary.metrics.dispatched, 6);
    // Every command byte was echoed before dispatch.
    assert_eq!(rig.echoed, b"wwwwwQ");
}

#[test]
fn scenario_b_quit_parks_and_says_goodbye_once() {
    let shared = SharedState::new();
    let mut rig = rig_with_left_press(&shared);
    rig.type_keys(b"eQ");
    let mut sink = RecordingSink::new();

    let summary = lifecycle::run(&mut rig, &shared, &RigConfig::default(), &mut sink).unwrap();

    assert_eq!(summary.final_pulse, 937);
    assert_eq!(rig.pulses.last(), Some(&937));
    let printed = rig.printed();
    assert_eq!(printed.matches(SHUTDOWN_MESSAGE).count(), 1);
    assert!(printed.ends_with(&format!("Start Position: 937\r\n{}", SHUTDOWN_MESSAGE)));
    assert_eq!(rig.leds, [false; 4]);
    assert!(!rig.irq_enabled);
    assert_eq!(rig.calls.last(), Some(&HwCall::DisableIrq));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Shutdown(_))), 1);
}

#[test]
fn bring_up_order() {
    let shared = SharedState::new();
    let mut rig = rig_with_left_press(&shared);
    rig.type_keys(b"Q");
    let mut sink = RecordingSink::new();
    let config = RigConfig::default();

    lifecycle::run(&mut rig, &shared, &config, &mut sink).unwrap();

    let expected_prefix = [
        HwCall::EnableFpu,
        HwCall::ConfigureClock(120_000_000),
        HwCall::DisableIrq,
        HwCall::InitIndicators,
        HwCall::SetLeds(LedMask::ALL, false),
        HwCall::SetLeds(LedMask::INITIALIZING, true),
        HwCall::InitButtons,
        HwCall::InitConsole(115_200),
        HwCall::InitPwm(50),
        HwCall::SetPulse(937),
        HwCall::EnableOutput,
        HwCall::SetLeds(LedMask::READY, true),
        HwCall::SetLeds(LedMask::READY, false),
        HwCall::SetLeds(LedMask::INITIALIZING, false),
        HwCall::SetHeartbeatRate(12),
        HwCall::EnableHeartbeat,
        HwCall::EnableGenerator,
        HwCall::EnableIrq,
    ];
    assert_eq!(&rig.calls[..expected_prefix.len()], &expected_prefix);

    let printed = rig.printed();
    assert!(printed.starts_with(
        "Clock speed: 120000000\r\n\
         Initializing servo motors...\n\r\
         PWM generator period: 37500\r\n\
         Done!\n\r\
         Initialization Complete!\r\n\
         Press left button to start.\r\n"
    ));
}

#[test]
fn generator_waits_for_the_start_gate() {
    let shared = SharedState::new();
    let mut rig = MockRig::new(&shared);
    rig.press_buttons(ButtonMask::LEFT, 50);
    rig.type_keys(b"Q");
    let mut sink = RecordingSink::new();

    lifecycle::run(&mut rig, &shared, &RigConfig::default(), &mut sink).unwrap();

    assert!(rig.button_polls >= 50 + DEBOUNCE_POLLS as usize);
    let gate_closed = rig.position(&HwCall::SetLeds(LedMask::READY, false)).unwrap();
    let generator = rig.position(&HwCall::EnableGenerator).unwrap();
    assert!(gate_closed < generator);
    assert_eq!(rig.count_calls(&HwCall::EnableGenerator), 1);
}

#[test]
fn wrong_button_keeps_the_gate_shut() {
    let shared = SharedState::new();
    let mut rig = MockRig::new(&shared);
    rig.press_buttons(ButtonMask::RIGHT, 0);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        lifecycle::wait_for_buttons(&mut rig, ButtonMask::LEFT);
    }));
    assert!(result.is_err(), "gate opened for the wrong button");
}

#[test]
fn both_buttons_gate_needs_both() {
    let shared = SharedState::new();
    let mut rig = MockRig::new(&shared);
    rig.press_buttons(ButtonMask::ALL, 2);

    let obs = lifecycle::wait_for_buttons(&mut rig, ButtonMask::ALL);
    assert_eq!(obs.stable, ButtonMask::ALL);
    assert_eq!(rig.button_polls, 2 + DEBOUNCE_POLLS as usize);
}

#[test]
fn heartbeat_runs_independently_of_commands() {
    let shared = SharedState::new();
    let mut rig = rig_with_left_press(&shared);
    rig.ticks_per_idle = 1;
    // 23 idle calls with no traffic, then quit.
    let mut keys = vec![b'?'; 23];
    keys.push(b'Q');
    rig.type_keys(&keys);
    let mut sink = RecordingSink::new();

    let summary = lifecycle::run(&mut rig, &shared, &RigConfig::default(), &mut sink).unwrap();

    // 24 ticks at threshold 5: flips on ticks 5, 10, 15, 20.
    assert_eq!(summary.metrics.heartbeat_toggles, 4);
    assert_eq!(summary.metrics.unrecognized, 23);
    assert_eq!(shared.heartbeat.snapshot().tick_count, 4);
}

#[test]
fn burst_before_take_loses_the_older_byte() {
    let shared = SharedState::new();
    let mut rig = rig_with_left_press(&shared);
    rig.type_burst(b"ew");
    rig.type_keys(b"Q");
    let mut sink = RecordingSink::new();

    let summary = lifecycle::run(&mut rig, &shared, &RigConfig::default(), &mut sink).unwrap();

    assert_eq!(rig.pulses, vec![937, 974, 937]);
    assert_eq!(summary.metrics.inbox_overwrites, 1);
    assert_eq!(rig.echoed, b"ewQ");
}

#[test]
fn echo_can_be_disabled() {
    let shared = SharedState::new();
    let mut rig = rig_with_left_press(&shared);
    rig.type_keys(b"wQ");
    let mut sink = RecordingSink::new();
    let config = RigConfig {
        echo_input: false,
        ..RigConfig::default()
    };

    lifecycle::run(&mut rig, &shared, &config, &mut sink).unwrap();
    assert!(rig.echoed.is_empty());
    assert_eq!(rig.tx_text(), rig.printed());
}

#[test]
fn console_failure_aborts_bring_up() {
    let shared = SharedState::new();
    let mut rig = rig_with_left_press(&shared);
    rig.fail_console = true;
    let mut sink = RecordingSink::new();

    let result = lifecycle::run(&mut rig, &shared, &RigConfig::default(), &mut sink);
    assert_eq!(result, Err(Error::Init("console")));
    assert_eq!(rig.count_calls(&HwCall::InitPwm(50)), 0);
    assert!(sink.events.is_empty());
}

#[test]
fn invalid_config_is_rejected_before_touching_hardware() {
    let shared = SharedState::new();
    let mut rig = rig_with_left_press(&shared);
    let mut sink = RecordingSink::new();
    let config = RigConfig {
        servo_frequency_hz: 0,
        ..RigConfig::default()
    };

    assert!(lifecycle::run(&mut rig, &shared, &config, &mut sink).is_err());
    assert!(rig.calls.is_empty());
}

#[test]
fn start_mask_without_a_button_is_rejected_before_the_gate() {
    let shared = SharedState::new();
    let mut rig = rig_with_left_press(&shared);
    rig.press_buttons(ButtonMask::ALL, 0);
    let mut sink = RecordingSink::new();
    let config = RigConfig {
        start_button: serde_json::from_str("4").unwrap(),
        ..RigConfig::default()
    };

    let result = lifecycle::run(&mut rig, &shared, &config, &mut sink);
    assert_eq!(
        result,
        Err(Error::Config("start_button names a button the rig does not have"))
    );
    assert!(rig.calls.is_empty());
    assert_eq!(rig.button_polls, 0);
}

#[test]
fn zero_pwm_period_aborts_bring_up() {
    let shared = SharedState::new();
    let mut rig = rig_with_left_press(&shared);
    rig.period = 0;
    let mut sink = RecordingSink::new();

    let result = lifecycle::run(&mut rig, &shared, &RigConfig::default(), &mut sink);
    assert_eq!(result, Err(Error::Init("servo PWM reported a zero period")));
    assert_eq!(rig.count_calls(&HwCall::EnableOutput), 0);
    assert!(rig.pulses.is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn heartbeat_led_is_off_after_shutdown() {
    let shared = SharedState::new();
    let mut rig = rig_with_left_press(&shared);
    rig.ticks_per_idle = 1;
    // Q lands on the fifth tick, right after the heartbeat LED comes on.
    rig.type_keys(b"????Q");
    let mut sink = RecordingSink::new();

    let summary = lifecycle::run(&mut rig, &shared, &RigConfig::default(), &mut sink).unwrap();

    assert_eq!(summary.metrics.heartbeat_toggles, 1);
    assert!(shared.heartbeat.snapshot().indicator_on);
    assert_eq!(rig.leds, [false; 4]);
}

#[test]
fn small_period_warns_but_runs() {
    let shared = SharedState::new();
    let mut rig = rig_with_left_press(&shared);
    rig.period = 999;
    rig.type_keys(b"wwQ");
    let mut sink = RecordingSink::new();

    let summary = lifecycle::run(&mut rig, &shared, &RigConfig::default(), &mut sink).unwrap();
    assert_eq!(summary.range.step, 0);
    assert_eq!(rig.pulses, vec![24, 24, 24, 24]);
}
