//! Door service — the hexagonal core.
//!
//! [`DoorService`] owns the pure [`DoorController`], the trigger driver,
//! and the sensor reader, and exposes the two operations the remote
//! control layer consumes: read state and set target. All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  GpioPort ──▶ ┌───────────────────────────┐ ──▶ EventSink
//!               │        DoorService         │
//!  set_target ─▶│  gate · pulse · reconcile  │
//!               └───────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::DoorConfig;
use crate::door::{DoorController, DoorState, SensorCaps, TargetState};
use crate::drivers::trigger::Trigger;
use crate::error::{Error, Result};
use crate::sensors::SensorReader;

use super::events::{AppEvent, StatusSnapshot};
use super::ports::{EventSink, GpioPort, Level, Pull};

/// The application service orchestrating one door.
pub struct DoorService {
    controller: DoorController,
    trigger: Trigger,
    sensors: SensorReader,
}

impl DoorService {
    /// Configure the pins, take the synchronous initial sensor sample, and
    /// derive the starting state. No external command is accepted before
    /// this completes.
    pub fn initialize(
        config: &DoorConfig,
        gpio: &mut impl GpioPort,
        sink: &mut impl EventSink,
    ) -> Result<Self> {
        config.validate().map_err(Error::Config)?;

        // Trigger idles HIGH; the pulse drives it LOW.
        gpio.configure_output(config.trigger_pin, Level::High)
            .map_err(|_| Error::Init("trigger pin"))?;
        if let Some(pin) = config.open_sensor_pin {
            gpio.configure_input(pin, Pull::Up)
                .map_err(|_| Error::Init("open sensor pin"))?;
        }
        if let Some(pin) = config.closed_sensor_pin {
            gpio.configure_input(pin, Pull::Up)
                .map_err(|_| Error::Init("closed sensor pin"))?;
        }

        let trigger = Trigger::new(config.trigger_pin, config.pulse_width_ms);
        let sensors = SensorReader::new(config.open_sensor_pin, config.closed_sensor_pin);

        let obs = sensors.sample(gpio)?;
        let controller =
            DoorController::from_observation(obs, sensors.caps(), config.transition_budget_ms());

        info!(
            "door '{}' ready: trigger pin {}, sensors open={:?} closed={:?}",
            config.name, config.trigger_pin, config.open_sensor_pin, config.closed_sensor_pin
        );
        sink.emit(&AppEvent::Started(controller.state()));

        Ok(Self {
            controller,
            trigger,
            sensors,
        })
    }

    // ── Command path ──────────────────────────────────────────

    /// The only externally callable command: move the door to `value`.
    ///
    /// Ordering matters: the gate is checked first (rejection mutates
    /// nothing), then the relay is pulsed, and only then does the model
    /// enter the moving state — a concurrent observer never sees
    /// `Opening`/`Closing` before the physical switch has fired. A failed
    /// pulse is surfaced unchanged with no retry.
    pub fn set_target(
        &mut self,
        value: TargetState,
        now_ms: u64,
        gpio: &mut impl GpioPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        if let Err(e) = self.controller.gate(value) {
            info!("set_target({value}) rejected: {e}");
            return Err(e.into());
        }

        info!("set_target({value}) accepted, pulsing trigger");
        self.trigger.pulse(gpio)?;

        let prev = self.controller.state();
        let was_obstructed = self.controller.obstructed();
        self.controller.begin_transition(value, now_ms);

        sink.emit(&AppEvent::TargetChanged(value));
        sink.emit(&AppEvent::StateChanged {
            from: prev,
            to: self.controller.state(),
        });
        if was_obstructed {
            sink.emit(&AppEvent::ObstructionCleared);
        }
        Ok(())
    }

    // ── Poll path ─────────────────────────────────────────────

    /// One poll cycle: sample the sensors, reconcile, then evaluate the
    /// transition deadline. A failed read skips reconciliation for this
    /// cycle only; deadline expiry is still checked so a dead sensor
    /// degrades to the timeout-based assumption instead of wedging a
    /// transition forever.
    pub fn poll_cycle(&mut self, now_ms: u64, gpio: &mut impl GpioPort, sink: &mut impl EventSink) {
        let prev_state = self.controller.state();
        let prev_target = self.controller.target();
        let prev_obstructed = self.controller.obstructed();

        match self.sensors.sample(gpio) {
            Ok(obs) => self.controller.observe(obs, now_ms),
            Err(e) => warn!("poll cycle skipped: {e}"),
        }
        self.controller.tick(now_ms);

        let state = self.controller.state();
        let target = self.controller.target();
        let obstructed = self.controller.obstructed();

        if target != prev_target {
            sink.emit(&AppEvent::TargetChanged(target));
        }
        if state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: state,
            });
        }
        if obstructed && !prev_obstructed {
            sink.emit(&AppEvent::ObstructionDetected);
        } else if !obstructed && prev_obstructed {
            sink.emit(&AppEvent::ObstructionCleared);
        }
    }

    // ── Queries (the remote-facing read interface) ────────────

    pub fn current_state(&self) -> DoorState {
        self.controller.state()
    }

    pub fn target_state(&self) -> TargetState {
        self.controller.target()
    }

    pub fn obstruction_detected(&self) -> bool {
        self.controller.obstructed()
    }

    pub fn sensor_caps(&self) -> SensorCaps {
        self.controller.caps()
    }

    /// Snapshot for periodic status logging.
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.controller.state(),
            target: self.controller.target(),
            obstructed: self.controller.obstructed(),
            transition_pending: self.controller.transition_pending(),
        }
    }
}
