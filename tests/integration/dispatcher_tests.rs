//! Dispatcher behaviour against the mock rig: command effects, console
//! text, counters, and the single-slot inbox feeding it.

use crate::mock_hw::{MockRig, RecordingSink};
use servorig::app::commands::Command;
use servorig::app::events::AppEvent;
use servorig::app::service::{MENU, RigService};
use servorig::control::servo::ServoRange;
use servorig::drivers::console::console_rx_isr;
use servorig::shared::SharedState;

const PERIOD: u32 = 37_500;

fn feed(service: &mut RigService<'_>, rig: &mut MockRig<'_>, sink: &mut RecordingSink, keys: &[u8]) {
    for &k in keys {
        service.dispatch(k, rig, sink);
    }
}

#[test]
fn reset_is_idempotent() {
    let shared = SharedState::new();
    let mut rig = MockRig::new(&shared);
    let mut sink = RecordingSink::new();
    let mut svc = RigService::new(ServoRange::from_period(PERIOD), &shared.counters);

    feed(&mut svc, &mut rig, &mut sink, b"wwx");
    assert_eq!(svc.current_pulse(), 937);
    feed(&mut svc, &mut rig, &mut sink, b"x");
    assert_eq!(svc.current_pulse(), 937);
    assert_eq!(rig.pulses, vec![974, 1011, 937, 937]);
}

#[test]
fn end_is_idempotent() {
    let shared = SharedState::new();
    let mut rig = MockRig::new(&shared);
    let mut sink = RecordingSink::new();
    let mut svc = RigService::new(ServoRange::from_period(PERIOD), &shared.counters);

    feed(&mut svc, &mut rig, &mut sink, b"ee");
    assert_eq!(svc.current_pulse(), 4685);
    assert_eq!(rig.printed(), "End Position: 4685\r\nEnd Position: 4685\r\n");
}

#[test]
fn increase_past_end_is_not_clamped() {
    let shared = SharedState::new();
    let mut rig = MockRig::new(&shared);
    let mut sink = RecordingSink::new();
    let mut svc = RigService::new(ServoRange::from_period(PERIOD), &shared.counters);

    feed(&mut svc, &mut rig, &mut sink, &[b'w'; 120]);
    assert_eq!(svc.current_pulse(), 937 + 120 * 37);
    assert!(svc.current_pulse() > svc.range().end_pulse);
}

#[test]
fn every_pulse_reaches_the_servo_port() {
    let shared = SharedState::new();
    let mut rig = MockRig::new(&shared);
    let mut sink = RecordingSink::new();
    let mut svc = RigService::new(ServoRange::from_period(PERIOD), &shared.counters);

    feed(&mut svc, &mut rig, &mut sink, b"wsex");
    assert_eq!(rig.pulses, vec![974, 937, 4685, 937]);
    assert_eq!(
        rig.printed(),
        "Angle Increase: 974\r\n\
         Angle Decrease: 937\r\n\
         End Position: 4685\r\n\
         Start Position: 937\r\n"
    );
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::PulseChanged { .. })),
        4
    );
}

#[test]
fn menu_and_unknown_bytes_do_not_move_servos() {
    let shared = SharedState::new();
    let mut rig = MockRig::new(&shared);
    let mut sink = RecordingSink::new();
    let mut svc = RigService::new(ServoRange::from_period(PERIOD), &shared.counters);

    feed(&mut svc, &mut rig, &mut sink, b"Mmq\r\n?");
    assert!(rig.pulses.is_empty());
    assert_eq!(rig.printed(), MENU);
    let m = shared.counters.snapshot();
    assert_eq!(m.dispatched, 1);
    assert_eq!(m.unrecognized, 5);
    assert!(!svc.is_quit());
}

#[test]
fn quit_is_terminal() {
    let shared = SharedState::new();
    let mut rig = MockRig::new(&shared);
    let mut sink = RecordingSink::new();
    let mut svc = RigService::new(ServoRange::from_period(PERIOD), &shared.counters);

    assert_eq!(svc.dispatch(b'Q', &mut rig, &mut sink), Some(Command::Quit));
    assert!(svc.is_quit());
    svc.dispatch(b'w', &mut rig, &mut sink);
    assert!(svc.is_quit());
}

#[test]
fn two_bytes_before_take_dispatch_only_the_latest() {
    let shared = SharedState::new();
    let mut rig = MockRig::new(&shared);
    let mut sink = RecordingSink::new();
    let mut svc = RigService::new(ServoRange::from_period(PERIOD), &shared.counters);

    console_rx_isr(&shared, b'w', |_| true);
    console_rx_isr(&shared, b'e', |_| true);

    while let Some(byte) = shared.inbox.take() {
        svc.dispatch(byte, &mut rig, &mut sink);
    }
    assert_eq!(rig.pulses, vec![4685]);
    assert_eq!(shared.counters.snapshot().inbox_overwrites, 1);
}

#[test]
fn full_transmit_buffer_drops_silently() {
    let shared = SharedState::new();
    let mut rig = MockRig::new(&shared);
    rig.tx_capacity = Some(8);
    let mut sink = RecordingSink::new();
    let mut svc = RigService::new(ServoRange::from_period(PERIOD), &shared.counters);

    feed(&mut svc, &mut rig, &mut sink, b"w");
    // The servo still moves; only the text is cut short.
    assert_eq!(rig.pulses, vec![974]);
    assert_eq!(rig.printed(), "Angle In");
    assert_eq!(shared.counters.snapshot().tx_dropped, 13);
}
