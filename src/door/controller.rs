//! Pure door state machine.
//!
//! [`DoorController`] holds the current/target state, the obstruction flag,
//! and the single transition deadline. It performs no I/O: the service layer
//! pulses the relay and samples sensors, then feeds observations and the
//! monotonic clock in here. That keeps every rule in this file directly
//! testable on the host.
//!
//! ## Timer model
//!
//! The completion timeout is a stored deadline (milliseconds, monotonic)
//! fired from [`tick`](DoorController::tick) on the poll cadence rather
//! than an OS timer object. Arming replaces any previous deadline and
//! cancellation clears it, so at most one timeout is ever pending, and a
//! reconciliation that confirms a state clears the deadline in the same
//! call that updates the state — a stale timeout can never fire afterward.
//!
//! Invariant: a deadline is armed if and only if the door is `Opening` or
//! `Closing`.

use log::{info, warn};

use crate::error::CommandError;

use super::state::{DoorState, SensorObservation, TargetState};

/// Which proximity sensors are physically wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorCaps {
    pub open: bool,
    pub closed: bool,
}

impl SensorCaps {
    /// Whether the sensor confirming `target`'s terminal state exists.
    fn completion_sensor(self, target: TargetState) -> bool {
        match target {
            TargetState::Open => self.open,
            TargetState::Closed => self.closed,
        }
    }
}

/// The door-state reconciliation engine.
pub struct DoorController {
    state: DoorState,
    target: TargetState,
    obstructed: bool,
    /// Armed exactly while a transition is in flight.
    deadline_ms: Option<u64>,
    caps: SensorCaps,
    budget_ms: u64,
}

impl DoorController {
    /// Derive the initial state from one synchronous sensor sample.
    ///
    /// Decision order (first match wins):
    /// 1. open sensor triggered → `Open`
    /// 2. closed sensor triggered → `Closed`
    /// 3. open sensor wired but silent → `Stopped` (door is somewhere
    ///    in between; there is no way to know which way it was going)
    /// 4. only a closed sensor, silent → `Open` (not proven closed)
    /// 5. no sensors at all → `Closed` (the safe assumption)
    ///
    /// The initial target is the current state coerced to open/closed;
    /// `Stopped` coerces to `Open` and the next command decides the retry
    /// direction.
    pub fn from_observation(obs: SensorObservation, caps: SensorCaps, budget_ms: u64) -> Self {
        let state = match obs {
            SensorObservation::OpenDetected => DoorState::Open,
            SensorObservation::ClosedDetected => DoorState::Closed,
            SensorObservation::Clear if caps.open => DoorState::Stopped,
            SensorObservation::Clear if caps.closed => DoorState::Open,
            SensorObservation::Clear => DoorState::Closed,
        };
        let target = if state == DoorState::Closed {
            TargetState::Closed
        } else {
            TargetState::Open
        };
        info!("initial door state: {state} (target {target})");
        Self {
            state,
            target,
            obstructed: false,
            deadline_ms: None,
            caps,
            budget_ms,
        }
    }

    // ── Command path ──────────────────────────────────────────

    /// Check whether a `set_target` command is acceptable right now.
    ///
    /// Open is only accepted from `Closed`, closed only from `Open`.
    /// Anything else — already there, already moving, or stopped — is
    /// rejected without mutating state, and the caller retries later.
    pub fn gate(&self, value: TargetState) -> Result<(), CommandError> {
        let accepted = match value {
            TargetState::Open => self.state == DoorState::Closed,
            TargetState::Closed => self.state == DoorState::Open,
        };
        if accepted {
            Ok(())
        } else {
            Err(CommandError::BusyOrInvalid(self.state))
        }
    }

    /// Enter a transition toward `value`: set the moving state, flip the
    /// target, clear the obstruction flag, and arm the completion deadline
    /// (replacing any armed one).
    ///
    /// Called after the relay pulse on the command path, and with no pulse
    /// at all on the reconciliation path (the door already moved).
    pub fn begin_transition(&mut self, value: TargetState, now_ms: u64) {
        self.state = value.moving();
        self.target = value;
        self.obstructed = false;
        self.deadline_ms = Some(now_ms + self.budget_ms);
    }

    // ── Reconciliation path ───────────────────────────────────

    /// Reconcile one sensor observation into the model. Never pulses the
    /// actuator; idempotent when the observation matches the model.
    pub fn observe(&mut self, obs: SensorObservation, now_ms: u64) {
        match obs {
            SensorObservation::OpenDetected => {
                if self.state != DoorState::Open {
                    info!("sensor confirms door open (was {})", self.state);
                    self.settle(DoorState::Open, TargetState::Open);
                }
            }
            SensorObservation::ClosedDetected => {
                if self.state != DoorState::Closed {
                    info!("sensor confirms door closed (was {})", self.state);
                    self.settle(DoorState::Closed, TargetState::Closed);
                }
            }
            SensorObservation::Clear => {
                // The door left a sensor-proven resting position without a
                // command: synthesize the matching transition so the model
                // tracks the manual motion. Physical movement already
                // happened, so no pulse is issued.
                if self.caps.closed
                    && self.state == DoorState::Closed
                    && self.target != TargetState::Open
                {
                    info!("closed sensor released without a command: door is opening");
                    self.begin_transition(TargetState::Open, now_ms);
                } else if self.caps.open
                    && self.state == DoorState::Open
                    && self.target != TargetState::Closed
                {
                    info!("open sensor released without a command: door is closing");
                    self.begin_transition(TargetState::Closed, now_ms);
                }
            }
        }
    }

    // ── Timeout path ──────────────────────────────────────────

    /// Fire the completion deadline if it has expired. At most one firing
    /// per armed transition; a no-op whenever no deadline is pending.
    pub fn tick(&mut self, now_ms: u64) {
        let Some(deadline) = self.deadline_ms else {
            return;
        };
        if now_ms < deadline {
            return;
        }
        self.deadline_ms = None;

        let target = self.target;
        debug_assert!(
            self.state == target.moving(),
            "deadline armed outside of a transition"
        );
        if self.caps.completion_sensor(target) {
            // The sensor that should have confirmed this transition never
            // did: the door is stuck somewhere along its travel.
            warn!("transition to {target} timed out without sensor confirmation");
            self.state = DoorState::Stopped;
            self.obstructed = true;
        } else {
            // No way to detect a stall — assume the transition completed.
            info!("transition budget elapsed, assuming door is {target}");
            self.state = target.terminal();
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn target(&self) -> TargetState {
        self.target
    }

    pub fn obstructed(&self) -> bool {
        self.obstructed
    }

    /// Whether a completion deadline is armed.
    pub fn transition_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn caps(&self) -> SensorCaps {
        self.caps
    }

    // ── Internal ──────────────────────────────────────────────

    /// Snap to a sensor-proven resting state, cancelling any pending
    /// deadline before the state is updated.
    fn settle(&mut self, state: DoorState, target: TargetState) {
        self.deadline_ms = None;
        self.state = state;
        self.target = target;
        self.obstructed = false;
    }
}
