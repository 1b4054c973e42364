//! Application core — pure domain logic, zero I/O.
//!
//! The door state machine, command gating, and reconciliation rules live
//! under [`crate::door`]; this module holds the port traits that bound the
//! domain ([`ports`]), the structured events it emits ([`events`]), and the
//! orchestrating service ([`service`]). All hardware interaction happens
//! through the port traits, keeping the whole layer testable without real
//! peripherals.

pub mod events;
pub mod ports;
pub mod service;
