//! System configuration parameters
//!
//! All tunable parameters for a single door. Values can be overridden via
//! NVS (non-volatile storage) on device or a JSON file on the host.

use serde::{Deserialize, Serialize};

/// Door controller configuration, immutable after startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorConfig {
    /// Accessory name reported to the remote-control layer.
    pub name: heapless::String<32>,

    // --- Pins ---
    /// Output pin pulsed to simulate a button press on the opener.
    pub trigger_pin: u8,
    /// Proximity sensor proving the fully-open position. `None` = absent.
    pub open_sensor_pin: Option<u8>,
    /// Proximity sensor proving the fully-closed position. `None` = absent.
    pub closed_sensor_pin: Option<u8>,

    // --- Timing ---
    /// How long a commanded transition may take before it is declared
    /// stalled (or optimistically complete, without a completion sensor).
    pub transition_budget_secs: u16,
    /// Sensor poll cadence (milliseconds).
    pub poll_interval_ms: u32,
    /// How long the trigger pin is held LOW during a pulse (milliseconds).
    pub pulse_width_ms: u32,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            name: heapless::String::try_from("Garage Door").unwrap_or_default(),
            trigger_pin: 12,
            open_sensor_pin: None,
            closed_sensor_pin: None,
            transition_budget_secs: 15,
            poll_interval_ms: 1000,
            pulse_width_ms: 500,
        }
    }
}

impl DoorConfig {
    /// Transition budget in milliseconds.
    pub fn transition_budget_ms(&self) -> u64 {
        u64::from(self.transition_budget_secs) * 1000
    }

    /// Range-check the configuration. Invalid configs are rejected, not
    /// clamped, so a bad stored blob cannot silently change pin wiring.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.transition_budget_secs == 0 {
            return Err("transition_budget_secs must be at least 1");
        }
        if self.poll_interval_ms < 10 {
            return Err("poll_interval_ms must be at least 10");
        }
        if self.pulse_width_ms == 0 || self.pulse_width_ms > 5000 {
            return Err("pulse_width_ms must be within 1..=5000");
        }
        if self.open_sensor_pin == Some(self.trigger_pin)
            || self.closed_sensor_pin == Some(self.trigger_pin)
        {
            return Err("sensor pin collides with trigger pin");
        }
        if let (Some(open), Some(closed)) = (self.open_sensor_pin, self.closed_sensor_pin) {
            if open == closed {
                return Err("open and closed sensors share a pin");
            }
        }
        Ok(())
    }
}
