//! DoorCtl firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod door;
pub mod poller;
pub mod sensors;

pub mod error;

// Hardware-facing modules; the actual device implementations are guarded
// by cfg attributes inside.
pub mod adapters;
pub mod drivers;
