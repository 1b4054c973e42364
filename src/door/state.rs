//! State enums shared across the door subsystem.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The door's current physical (or assumed) state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorState {
    Open,
    Closed,
    Opening,
    Closing,
    /// A commanded transition stalled: the budget elapsed and the
    /// completion sensor never confirmed the terminal state.
    Stopped,
}

impl DoorState {
    /// Whether a transition is in flight.
    pub fn is_moving(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Closing => "closing",
            Self::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// The commanded state. Only these two values are externally settable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetState {
    Open,
    Closed,
}

impl TargetState {
    /// The `DoorState` this target resolves to once reached.
    pub fn terminal(self) -> DoorState {
        match self {
            Self::Open => DoorState::Open,
            Self::Closed => DoorState::Closed,
        }
    }

    /// The transient state while moving toward this target.
    pub fn moving(self) -> DoorState {
        match self {
            Self::Open => DoorState::Opening,
            Self::Closed => DoorState::Closing,
        }
    }
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "open",
            Self::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Classified result of one sensor poll.
///
/// When both sensors somehow report triggered at once, open takes priority:
/// one reading is necessarily stale, and "open" is the safer assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorObservation {
    /// The open sensor reads triggered.
    OpenDetected,
    /// The closed sensor reads triggered (and the open sensor does not).
    ClosedDetected,
    /// No configured sensor reads triggered (or none are configured).
    Clear,
}
