//! Unified error types for the door controller.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! top-level control loop's error handling uniform. All variants are `Copy`
//! so they can be passed through the service and state machine without
//! allocation.

use core::fmt;

use crate::door::DoorState;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A command was rejected by the state machine gating rules.
    Command(CommandError),
    /// The physical trigger pulse failed to complete.
    Actuation(ActuationError),
    /// A sensor pin could not be read.
    Sensor(SensorReadError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(e) => write!(f, "command: {e}"),
            Self::Actuation(e) => write!(f, "actuation: {e}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

/// Rejection of a `set_target` command.
///
/// Recoverable: the caller is expected to surface it as "operation in
/// progress, retry later". No state is mutated on rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The door is already at the commanded state, already moving, or
    /// stopped. Carries the current state at rejection time.
    BusyOrInvalid(DoorState),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusyOrInvalid(state) => {
                write!(f, "door is busy or command invalid (currently {state})")
            }
        }
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

// ---------------------------------------------------------------------------
// Actuation errors
// ---------------------------------------------------------------------------

/// The relay pulse could not be completed.
///
/// Fatal to that command attempt: the attempt is treated as not having
/// happened and there is no automatic retry — repeating a relay pulse
/// mid-press is not safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuationError {
    /// The underlying GPIO write failed.
    Gpio(GpioError),
}

impl fmt::Display for ActuationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(e) => write!(f, "trigger pulse failed: {e}"),
        }
    }
}

impl From<ActuationError> for Error {
    fn from(e: ActuationError) -> Self {
        Self::Actuation(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// A poll-cycle sensor read failed. The cycle is skipped; not fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorReadError {
    /// The underlying GPIO read failed.
    Gpio(GpioError),
}

impl fmt::Display for SensorReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(e) => write!(f, "sensor read failed: {e}"),
        }
    }
}

impl From<SensorReadError> for Error {
    fn from(e: SensorReadError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

/// Errors from the [`GpioPort`](crate::app::ports::GpioPort) capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// The pin was never configured through this port.
    NotConfigured,
    /// The level read returned an error.
    ReadFailed,
    /// The level write returned an error.
    WriteFailed,
    /// Pin direction/pull configuration failed.
    ConfigFailed,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "pin not configured"),
            Self::ReadFailed => write!(f, "GPIO read failed"),
            Self::WriteFailed => write!(f, "GPIO write failed"),
            Self::ConfigFailed => write!(f, "GPIO config failed"),
        }
    }
}

impl From<GpioError> for ActuationError {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

impl From<GpioError> for SensorReadError {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
