//! End-to-end service tests: command gating, relay pulse waveform, sensor
//! reconciliation, manual-motion tracking, and timeout handling, all driven
//! through the public [`DoorService`] API against the mock GPIO port.

use doorctl::app::events::AppEvent;
use doorctl::app::ports::{Level, Pull};
use doorctl::app::service::DoorService;
use doorctl::config::DoorConfig;
use doorctl::door::{DoorState, TargetState};
use doorctl::error::{CommandError, Error};

use crate::mock_gpio::{GpioCall, MockGpio, VecSink};

const TRIGGER: u8 = 12;
const OPEN_PIN: u8 = 25;
const CLOSED_PIN: u8 = 26;

fn config_both_sensors() -> DoorConfig {
    DoorConfig {
        open_sensor_pin: Some(OPEN_PIN),
        closed_sensor_pin: Some(CLOSED_PIN),
        ..DoorConfig::default()
    }
}

fn config_closed_sensor_only() -> DoorConfig {
    DoorConfig {
        closed_sensor_pin: Some(CLOSED_PIN),
        ..DoorConfig::default()
    }
}

fn config_sensorless() -> DoorConfig {
    DoorConfig::default()
}

/// Initialize a service with the closed sensor asserted (door at rest,
/// fully closed).
fn closed_door(
    config: &DoorConfig,
    gpio: &mut MockGpio,
    sink: &mut VecSink,
) -> DoorService {
    if config.closed_sensor_pin.is_some() {
        gpio.set_level(CLOSED_PIN, Level::Low);
    }
    DoorService::initialize(config, gpio, sink).expect("initialize")
}

// ── Initialization ────────────────────────────────────────────

#[test]
fn initialize_configures_all_pins() {
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let service = closed_door(&config_both_sensors(), &mut gpio, &mut sink);

    assert!(gpio.calls.contains(&GpioCall::ConfigureOutput {
        pin: TRIGGER,
        initial: Level::High,
    }));
    assert!(gpio.calls.contains(&GpioCall::ConfigureInput {
        pin: OPEN_PIN,
        pull: Pull::Up,
    }));
    assert!(gpio.calls.contains(&GpioCall::ConfigureInput {
        pin: CLOSED_PIN,
        pull: Pull::Up,
    }));
    assert_eq!(service.current_state(), DoorState::Closed);
    assert_eq!(sink.events, vec![AppEvent::Started(DoorState::Closed)]);
}

#[test]
fn initialize_rejects_pin_collision_before_touching_gpio() {
    let config = DoorConfig {
        open_sensor_pin: Some(TRIGGER),
        ..DoorConfig::default()
    };
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();

    let result = DoorService::initialize(&config, &mut gpio, &mut sink);
    assert!(matches!(result, Err(Error::Config(_))));
    assert!(gpio.calls.is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn initialize_with_open_sensor_silent_starts_stopped() {
    // Neither sensor asserted but an open sensor is wired: the door is
    // somewhere mid-travel and the model must not claim a resting state.
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let service =
        DoorService::initialize(&config_both_sensors(), &mut gpio, &mut sink).expect("initialize");

    assert_eq!(service.current_state(), DoorState::Stopped);
    assert_eq!(sink.events, vec![AppEvent::Started(DoorState::Stopped)]);
}

// ── Command path ──────────────────────────────────────────────

#[test]
fn open_command_pulses_once_and_enters_opening() {
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let mut service = closed_door(&config_both_sensors(), &mut gpio, &mut sink);

    service
        .set_target(TargetState::Open, 1_000, &mut gpio, &mut sink)
        .expect("command accepted");

    assert_eq!(service.current_state(), DoorState::Opening);
    assert_eq!(service.target_state(), TargetState::Open);
    assert_eq!(gpio.pulse_count(TRIGGER), 1);
    assert_eq!(
        gpio.waveform(TRIGGER),
        vec![
            GpioCall::Write { pin: TRIGGER, level: Level::Low },
            GpioCall::Sleep { ms: 500 },
            GpioCall::Write { pin: TRIGGER, level: Level::High },
        ]
    );
    assert_eq!(
        sink.events,
        vec![
            AppEvent::Started(DoorState::Closed),
            AppEvent::TargetChanged(TargetState::Open),
            AppEvent::StateChanged {
                from: DoorState::Closed,
                to: DoorState::Opening,
            },
        ]
    );
}

#[test]
fn command_rejected_when_already_at_target() {
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let mut service = closed_door(&config_both_sensors(), &mut gpio, &mut sink);

    let result = service.set_target(TargetState::Closed, 1_000, &mut gpio, &mut sink);
    assert_eq!(
        result,
        Err(Error::Command(CommandError::BusyOrInvalid(
            DoorState::Closed
        )))
    );
    assert_eq!(gpio.pulse_count(TRIGGER), 0);
    assert_eq!(service.current_state(), DoorState::Closed);
    assert_eq!(sink.events, vec![AppEvent::Started(DoorState::Closed)]);
}

#[test]
fn command_rejected_while_moving() {
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let mut service = closed_door(&config_both_sensors(), &mut gpio, &mut sink);

    service
        .set_target(TargetState::Open, 1_000, &mut gpio, &mut sink)
        .expect("first command accepted");
    let result = service.set_target(TargetState::Closed, 2_000, &mut gpio, &mut sink);

    assert!(matches!(
        result,
        Err(Error::Command(CommandError::BusyOrInvalid(
            DoorState::Opening
        )))
    ));
    // Still only the original pulse.
    assert_eq!(gpio.pulse_count(TRIGGER), 1);
    assert_eq!(service.current_state(), DoorState::Opening);
}

#[test]
fn failed_pulse_leaves_model_untouched() {
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let mut service = closed_door(&config_both_sensors(), &mut gpio, &mut sink);
    gpio.fail_writes = true;

    let result = service.set_target(TargetState::Open, 1_000, &mut gpio, &mut sink);

    assert!(matches!(result, Err(Error::Actuation(_))));
    assert_eq!(service.current_state(), DoorState::Closed);
    assert_eq!(service.target_state(), TargetState::Closed);
    assert_eq!(sink.events, vec![AppEvent::Started(DoorState::Closed)]);
}

// ── Sensor-confirmed transitions ──────────────────────────────

#[test]
fn open_transition_confirmed_by_sensor() {
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let mut service = closed_door(&config_both_sensors(), &mut gpio, &mut sink);

    service
        .set_target(TargetState::Open, 1_000, &mut gpio, &mut sink)
        .expect("command accepted");

    // Door leaves the closed position: both sensors clear, still opening.
    gpio.set_level(CLOSED_PIN, Level::High);
    service.poll_cycle(2_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Opening);

    // Open sensor fires: transition complete, no extra pulse.
    gpio.set_level(OPEN_PIN, Level::Low);
    service.poll_cycle(3_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Open);
    assert!(!service.obstruction_detected());
    assert_eq!(gpio.pulse_count(TRIGGER), 1);
    assert!(sink.contains(&AppEvent::StateChanged {
        from: DoorState::Opening,
        to: DoorState::Open,
    }));

    // Confirming polls afterward change nothing and emit nothing.
    let events_before = sink.events.len();
    service.poll_cycle(4_000, &mut gpio, &mut sink);
    service.poll_cycle(5_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Open);
    assert_eq!(sink.events.len(), events_before);
}

#[test]
fn late_deadline_never_fires_after_sensor_confirmation() {
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let mut service = closed_door(&config_both_sensors(), &mut gpio, &mut sink);

    service
        .set_target(TargetState::Open, 0, &mut gpio, &mut sink)
        .expect("command accepted");
    gpio.set_level(CLOSED_PIN, Level::High);
    gpio.set_level(OPEN_PIN, Level::Low);
    service.poll_cycle(5_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Open);
    assert!(!service.status().transition_pending);

    // Well past the original budget: the settled state must hold.
    service.poll_cycle(60_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Open);
    assert!(!service.obstruction_detected());
}

// ── Obstruction and timeout ───────────────────────────────────

#[test]
fn stalled_transition_stops_and_reports_obstruction() {
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let mut service = closed_door(&config_both_sensors(), &mut gpio, &mut sink);

    service
        .set_target(TargetState::Open, 0, &mut gpio, &mut sink)
        .expect("command accepted");
    gpio.set_level(CLOSED_PIN, Level::High);

    // Budget is 15s by default; one poll short of it changes nothing.
    service.poll_cycle(14_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Opening);
    assert!(!service.obstruction_detected());

    service.poll_cycle(15_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Stopped);
    assert!(service.obstruction_detected());
    assert!(sink.contains(&AppEvent::ObstructionDetected));
    assert!(sink.contains(&AppEvent::StateChanged {
        from: DoorState::Opening,
        to: DoorState::Stopped,
    }));

    // The deadline fired once; later polls are quiet.
    let events_before = sink.events.len();
    service.poll_cycle(30_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Stopped);
    assert_eq!(sink.events.len(), events_before);
}

#[test]
fn sensor_clears_obstruction_after_stall() {
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let mut service = closed_door(&config_both_sensors(), &mut gpio, &mut sink);

    service
        .set_target(TargetState::Open, 0, &mut gpio, &mut sink)
        .expect("command accepted");
    gpio.set_level(CLOSED_PIN, Level::High);
    service.poll_cycle(15_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Stopped);

    // Someone frees the door and it settles closed again.
    gpio.set_level(CLOSED_PIN, Level::Low);
    service.poll_cycle(16_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Closed);
    assert!(!service.obstruction_detected());
    assert!(sink.contains(&AppEvent::ObstructionCleared));
}

#[test]
fn dead_sensor_degrades_to_timeout() {
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let mut service = closed_door(&config_both_sensors(), &mut gpio, &mut sink);

    service
        .set_target(TargetState::Open, 0, &mut gpio, &mut sink)
        .expect("command accepted");
    gpio.fail_reads = true;

    // Reads fail every cycle, but the deadline still fires.
    service.poll_cycle(5_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Opening);
    service.poll_cycle(15_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Stopped);
    assert!(service.obstruction_detected());
}

#[test]
fn sensorless_door_assumes_completion_at_budget() {
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let mut service = closed_door(&config_sensorless(), &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Closed);

    service
        .set_target(TargetState::Open, 0, &mut gpio, &mut sink)
        .expect("command accepted");
    service.poll_cycle(14_999, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Opening);

    service.poll_cycle(15_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Open);
    assert!(!service.obstruction_detected());
}

// ── Manual motion reconciliation ──────────────────────────────

#[test]
fn manual_open_is_tracked_without_a_pulse() {
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let mut service = closed_door(&config_closed_sensor_only(), &mut gpio, &mut sink);

    // Wall button: closed sensor releases with no command issued.
    gpio.set_level(CLOSED_PIN, Level::High);
    service.poll_cycle(5_000, &mut gpio, &mut sink);

    assert_eq!(service.current_state(), DoorState::Opening);
    assert_eq!(service.target_state(), TargetState::Open);
    assert_eq!(gpio.pulse_count(TRIGGER), 0);
    assert!(sink.contains(&AppEvent::TargetChanged(TargetState::Open)));
    assert!(sink.contains(&AppEvent::StateChanged {
        from: DoorState::Closed,
        to: DoorState::Opening,
    }));

    // No open sensor to confirm, so the budget settles it optimistically.
    service.poll_cycle(20_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Open);
    assert!(!service.obstruction_detected());
}

#[test]
fn manual_close_completes_via_closed_sensor() {
    let mut gpio = MockGpio::new();
    let mut sink = VecSink::new();
    let mut service = closed_door(&config_closed_sensor_only(), &mut gpio, &mut sink);

    // Manual open, then manual close, all sensor-driven.
    gpio.set_level(CLOSED_PIN, Level::High);
    service.poll_cycle(1_000, &mut gpio, &mut sink);
    service.poll_cycle(16_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Open);

    gpio.set_level(CLOSED_PIN, Level::Low);
    service.poll_cycle(17_000, &mut gpio, &mut sink);
    assert_eq!(service.current_state(), DoorState::Closed);
    assert_eq!(service.target_state(), TargetState::Closed);
    assert_eq!(gpio.pulse_count(TRIGGER), 0);
}
