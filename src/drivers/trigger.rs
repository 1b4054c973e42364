//! Actuator trigger — momentary relay pulse.
//!
//! Garage door openers expose a single dry-contact input: shorting it
//! briefly is equivalent to pressing the wall button. The trigger pin
//! idles HIGH, and a pulse drives it LOW for the configured width before
//! restoring HIGH.
//!
//! ## Safety contract
//!
//! A pulse is issued exactly once per accepted command and never for a
//! rejected one; that gating lives in the service. A failed write aborts
//! the pulse with no retry — re-pulsing a relay mid-press can double-toggle
//! the door.

use crate::app::ports::{GpioPort, Level};
use crate::error::ActuationError;

pub struct Trigger {
    pin: u8,
    pulse_ms: u32,
}

impl Trigger {
    pub fn new(pin: u8, pulse_ms: u32) -> Self {
        Self { pin, pulse_ms }
    }

    /// Pin this trigger drives.
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Issue one momentary press: LOW, hold, HIGH.
    ///
    /// Blocks for the pulse width — an intentional, bounded wait that
    /// represents the physical switch-press duration.
    pub fn pulse(&self, gpio: &mut impl GpioPort) -> Result<(), ActuationError> {
        gpio.write_level(self.pin, Level::Low)?;
        gpio.sleep_ms(self.pulse_ms);
        gpio.write_level(self.pin, Level::High)?;
        Ok(())
    }
}
