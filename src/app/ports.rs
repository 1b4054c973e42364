//! Port traits — the hexagonal boundary between domain logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DoorService (domain)
//! ```
//!
//! Driven adapters (GPIO, event sinks, config storage) implement these
//! traits. The [`DoorService`](super::service::DoorService) consumes them
//! via generics, so the domain core never touches hardware directly.

use crate::config::DoorConfig;
use crate::error::GpioError;

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: domain ↔ digital I/O)
// ───────────────────────────────────────────────────────────────

/// A digital level on a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// Input pull configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    Up,
    Down,
    Floating,
}

/// Abstract digital I/O capability.
///
/// The door service is the exclusive owner of its port instance: nothing
/// else may write the trigger pin. `sleep_ms` is part of the capability
/// because the trigger pulse is a timed waveform on a pin, and adapters
/// know the right way to wait on their platform (`FreeRTOS` delay on
/// device, `thread::sleep` on the host, a recorded no-op in tests).
pub trait GpioPort {
    /// Configure `pin` as an output, driving `initial` immediately.
    fn configure_output(&mut self, pin: u8, initial: Level) -> Result<(), GpioError>;

    /// Configure `pin` as an input with the given pull.
    fn configure_input(&mut self, pin: u8, pull: Pull) -> Result<(), GpioError>;

    /// Read the current level of an input pin.
    fn read_level(&mut self, pin: u8) -> Result<Level, GpioError>;

    /// Drive an output pin to `level`.
    fn write_level(&mut self, pin: u8, level: Level) -> Result<(), GpioError>;

    /// Block for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, a remote
/// accessory characteristic, MQTT, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the door configuration.
///
/// Implementations MUST validate before persisting: invalid values are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped,
/// so a corrupted blob cannot rewire pins underneath a live door.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`ConfigError::NotFound`] if nothing is stored yet.
    fn load(&self) -> Result<DoorConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&mut self, config: &DoorConfig) -> Result<(), ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
