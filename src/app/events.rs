//! Outbound application events.
//!
//! The [`DoorService`](super::service::DoorService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them — log to serial, notify a remote-control
//! characteristic, publish over MQTT, etc.

use crate::door::{DoorState, TargetState};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service finished initialization (carries the derived state).
    Started(DoorState),

    /// The door moved between states (commanded, reconciled, or timed out).
    StateChanged { from: DoorState, to: DoorState },

    /// The target flipped — by a command or by observed manual motion.
    TargetChanged(TargetState),

    /// A commanded transition stalled past its budget.
    ObstructionDetected,

    /// A sensor observation cleared a previously reported obstruction.
    ObstructionCleared,

    /// Periodic status snapshot.
    Status(StatusSnapshot),
}

/// A point-in-time snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub state: DoorState,
    pub target: TargetState,
    pub obstructed: bool,
    /// Whether a transition deadline is armed.
    pub transition_pending: bool,
}
