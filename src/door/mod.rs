//! Door state machine — the reconciliation core.
//!
//! ```text
//!            set_target(Open)                 set_target(Closed)
//!   CLOSED ───────────────────▶ OPENING          OPEN ───────────▶ CLOSING
//!      ▲                          │  │              ▲                │  │
//!      │        [closed sensor]   │  │ [budget      │ [open sensor]  │  │
//!      └──────────────────────────┘  │  elapsed]    └────────────────┘  │
//!                                    ▼                                  ▼
//!                  completion sensor present: STOPPED (obstructed)
//!                  completion sensor absent:  terminal state (optimistic)
//! ```
//!
//! Sensor observations always win: a poll that proves the door open or
//! closed cancels any in-flight transition deadline and snaps the model to
//! reality, including motion that was never commanded (a manual pull).

pub mod controller;
pub mod state;

pub use controller::{DoorController, SensorCaps};
pub use state::{DoorState, SensorObservation, TargetState};
