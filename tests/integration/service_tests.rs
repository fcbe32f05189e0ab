//! Integration tests for the actuator service: movement lifecycle, busy
//! policy, interrupts, and error responses.

use shutterlink::app::commands::{CommandKind, InterruptRequest};
use shutterlink::app::events::AppEvent;
use shutterlink::app::ports::DrivePort;
use shutterlink::app::service::{ActuatorService, BAD_ARGUMENTS, BUSY, ROLL_STATUS, UNPAIR_WAITING};
use shutterlink::app::state::{ActuatorState, Direction, MOVING_POLL, UNPAIRING_POLL};
use shutterlink::config::PairingRecord;
use shutterlink::error::ProtocolError;
use shutterlink::rpc::registry::token_for;

use crate::mock_ports::{DriveCall, MemoryStore, MockDrive, SinkSpy};

/// Service over a default (unpaired) record; commands token with salt "0".
fn service() -> ActuatorService {
    ActuatorService::new(PairingRecord::default())
}

fn token(kind: CommandKind) -> String {
    token_for(kind, "0")
}

#[test]
fn roll_drives_and_deadline_stops_exactly_once() {
    let mut svc = service();
    let mut hw = MockDrive::new();
    let store = MemoryStore::empty();
    let mut sink = SinkSpy::new();

    let resp = svc
        .dispatch(&token(CommandKind::Roll), &["up", "2"], 0, &mut hw, &store, &mut sink)
        .unwrap();
    assert_eq!(resp.as_str(), "Rolle nach up fuer 2 Sekunden\n");
    assert_eq!(
        svc.state(),
        &ActuatorState::Moving {
            direction: Direction::Up,
            deadline_ms: 2_000,
        }
    );
    assert!(hw.is_driving());

    // Loop polls before the deadline: nothing happens yet.
    assert_eq!(svc.deadline_ms(), Some(2_000));

    // Deadline passed: exactly one stop, then idle.
    svc.finalize_deadline(&mut hw, &store, &mut sink);
    assert_eq!(hw.calls, vec![DriveCall::Drive(Direction::Up), DriveCall::Stop]);
    assert!(svc.state().is_idle());

    // Further finalizations are no-ops.
    svc.finalize_deadline(&mut hw, &store, &mut sink);
    assert_eq!(hw.stop_count(), 1);

    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::MovementStarted { .. })),
        1
    );
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::MovementStopped { .. })),
        1
    );
}

#[test]
fn roll_with_huge_duration_saturates_instead_of_overflowing() {
    let mut svc = service();
    let mut hw = MockDrive::new();
    let store = MemoryStore::empty();
    let mut sink = SinkSpy::new();

    // u64::MAX seconds: the deadline arithmetic must clamp, not wrap or
    // panic, and the motor must keep driving.
    let resp = svc
        .dispatch(
            &token(CommandKind::Roll),
            &["up", "18446744073709551615"],
            5_000,
            &mut hw,
            &store,
            &mut sink,
        )
        .unwrap();
    assert_eq!(
        resp.as_str(),
        "Rolle nach up fuer 18446744073709551615 Sekunden\n"
    );
    assert!(hw.is_driving());
    assert_eq!(svc.deadline_ms(), Some(u64::MAX));
}

#[test]
fn roll_while_moving_redrives_and_replaces_deadline() {
    let mut svc = service();
    let mut hw = MockDrive::new();
    let store = MemoryStore::empty();
    let mut sink = SinkSpy::new();

    svc.dispatch(&token(CommandKind::Roll), &["up", "5"], 0, &mut hw, &store, &mut sink)
        .unwrap();
    svc.dispatch(
        &token(CommandKind::Roll),
        &["down", "3"],
        1_000,
        &mut hw,
        &store,
        &mut sink,
    )
    .unwrap();

    // No intermediate stop; the second deadline replaces the first.
    assert_eq!(
        hw.calls,
        vec![
            DriveCall::Drive(Direction::Up),
            DriveCall::Drive(Direction::Down)
        ]
    );
    assert_eq!(svc.deadline_ms(), Some(4_000));
}

#[test]
fn bad_roll_arguments_change_nothing() {
    let mut svc = service();
    let mut hw = MockDrive::new();
    let store = MemoryStore::empty();
    let mut sink = SinkSpy::new();
    let roll = token(CommandKind::Roll);

    for args in [
        &[][..],
        &["up"][..],
        &["sideways", "5"][..],
        &["up", "0"][..],
        &["up", "later"][..],
    ] {
        let resp = svc
            .dispatch(&roll, args, 0, &mut hw, &store, &mut sink)
            .unwrap();
        assert_eq!(resp.as_str(), BAD_ARGUMENTS);
    }

    assert!(hw.calls.is_empty());
    assert!(svc.state().is_idle());
    assert!(sink.events.is_empty());
}

#[test]
fn unknown_token_is_rejected_without_side_effects() {
    let mut svc = service();
    let mut hw = MockDrive::new();
    let store = MemoryStore::empty();
    let mut sink = SinkSpy::new();

    let err = svc
        .dispatch("0badc0ffee", &["up", "5"], 0, &mut hw, &store, &mut sink)
        .unwrap_err();
    assert_eq!(err, ProtocolError::UnknownToken);
    assert!(hw.calls.is_empty());
    assert!(svc.state().is_idle());
}

#[test]
fn unpair_window_refuses_pair_unpair_and_roll() {
    let mut record = PairingRecord::default();
    record.paired = Some("10.0.0.9".to_owned());
    let store = MemoryStore::with_record(&record);
    let mut svc = ActuatorService::new(record);
    let mut hw = MockDrive::new();
    let mut sink = SinkSpy::new();

    let resp = svc
        .dispatch(&token(CommandKind::Unpair), &[], 0, &mut hw, &store, &mut sink)
        .unwrap();
    assert_eq!(resp.as_str(), UNPAIR_WAITING);

    for (kind, args) in [
        (CommandKind::Pair, &["10.0.0.8", "7"][..]),
        (CommandKind::Unpair, &[][..]),
        (CommandKind::Roll, &["up", "5"][..]),
    ] {
        let resp = svc
            .dispatch(&token(kind), args, 1_000, &mut hw, &store, &mut sink)
            .unwrap();
        assert_eq!(resp.as_str(), BUSY, "{:?} must be refused", kind);
    }

    // Still unpairing, deadline untouched.
    assert_eq!(svc.deadline_ms(), Some(30_000));
    assert!(hw.calls.is_empty());
}

#[test]
fn unpair_stops_a_running_motor_first() {
    let mut svc = service();
    let mut hw = MockDrive::new();
    let store = MemoryStore::with_record(&PairingRecord::default());
    let mut sink = SinkSpy::new();

    svc.dispatch(&token(CommandKind::Roll), &["down", "60"], 0, &mut hw, &store, &mut sink)
        .unwrap();
    svc.dispatch(&token(CommandKind::Unpair), &[], 5_000, &mut hw, &store, &mut sink)
        .unwrap();

    assert_eq!(
        hw.calls,
        vec![DriveCall::Drive(Direction::Down), DriveCall::Stop]
    );
    assert!(matches!(svc.state(), ActuatorState::Unpairing { .. }));
    assert_eq!(svc.deadline_ms(), Some(35_000));
}

#[test]
fn interrupt_stop_halts_movement_immediately() {
    let mut svc = service();
    let mut hw = MockDrive::new();
    let store = MemoryStore::empty();
    let mut sink = SinkSpy::new();

    svc.dispatch(&token(CommandKind::Roll), &["up", "60"], 0, &mut hw, &store, &mut sink)
        .unwrap();
    svc.handle_interrupt(InterruptRequest::Stop, 1_000, &mut hw, &store, &mut sink);

    assert_eq!(hw.stop_count(), 1);
    assert!(svc.state().is_idle());
    assert_eq!(svc.deadline_ms(), None);
}

#[test]
fn interrupt_stop_while_idle_is_a_noop() {
    let mut svc = service();
    let mut hw = MockDrive::new();
    let store = MemoryStore::empty();
    let mut sink = SinkSpy::new();

    svc.handle_interrupt(InterruptRequest::Stop, 0, &mut hw, &store, &mut sink);
    assert!(hw.calls.is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn interrupt_roll_behaves_like_the_command() {
    let mut svc = service();
    let mut hw = MockDrive::new();
    let store = MemoryStore::empty();
    let mut sink = SinkSpy::new();

    svc.handle_interrupt(
        InterruptRequest::Roll {
            direction: Direction::Down,
            seconds: 4,
        },
        0,
        &mut hw,
        &store,
        &mut sink,
    );
    assert_eq!(
        svc.state(),
        &ActuatorState::Moving {
            direction: Direction::Down,
            deadline_ms: 4_000,
        }
    );
}

#[test]
fn rollstatus_answers_without_touching_state() {
    let mut svc = service();
    let mut hw = MockDrive::new();
    let store = MemoryStore::empty();
    let mut sink = SinkSpy::new();

    let resp = svc
        .dispatch(&token(CommandKind::RollStatus), &[], 0, &mut hw, &store, &mut sink)
        .unwrap();
    assert_eq!(resp.as_str(), ROLL_STATUS);
    assert!(hw.calls.is_empty());
    assert!(svc.state().is_idle());
}

#[test]
fn poll_interval_follows_the_state_machine() {
    let mut svc = service();
    let mut hw = MockDrive::new();
    let store = MemoryStore::with_record(&PairingRecord::default());
    let mut sink = SinkSpy::new();

    assert_eq!(svc.poll_interval(), None);

    svc.dispatch(&token(CommandKind::Roll), &["up", "5"], 0, &mut hw, &store, &mut sink)
        .unwrap();
    assert_eq!(svc.poll_interval(), Some(MOVING_POLL));

    svc.handle_interrupt(InterruptRequest::Stop, 0, &mut hw, &store, &mut sink);
    svc.dispatch(&token(CommandKind::Unpair), &[], 0, &mut hw, &store, &mut sink)
        .unwrap();
    assert_eq!(svc.poll_interval(), Some(UNPAIRING_POLL));
}
