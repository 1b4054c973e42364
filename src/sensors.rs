//! Proximity sensor reader.
//!
//! Zero, one, or two normally-open magnetic switches wired to pull-up
//! inputs: LOW means the magnet is present, i.e. the door is at that
//! position. [`SensorReader::sample`] classifies the raw levels into a
//! single [`SensorObservation`].
//!
//! Open takes priority over closed when both somehow read triggered at
//! once — physically impossible, so one reading is stale, and treating the
//! door as open is the safer call than reporting it fully shut.

use crate::app::ports::{GpioPort, Level};
use crate::door::{SensorCaps, SensorObservation};
use crate::error::SensorReadError;

pub struct SensorReader {
    open_pin: Option<u8>,
    closed_pin: Option<u8>,
}

impl SensorReader {
    pub fn new(open_pin: Option<u8>, closed_pin: Option<u8>) -> Self {
        Self {
            open_pin,
            closed_pin,
        }
    }

    /// Which sensors are wired.
    pub fn caps(&self) -> SensorCaps {
        SensorCaps {
            open: self.open_pin.is_some(),
            closed: self.closed_pin.is_some(),
        }
    }

    /// Read the configured pins and classify. With no sensors configured
    /// this touches no GPIO and always returns [`SensorObservation::Clear`].
    pub fn sample(&self, gpio: &mut impl GpioPort) -> Result<SensorObservation, SensorReadError> {
        if let Some(pin) = self.open_pin {
            if gpio.read_level(pin)? == Level::Low {
                return Ok(SensorObservation::OpenDetected);
            }
        }
        if let Some(pin) = self.closed_pin {
            if gpio.read_level(pin)? == Level::Low {
                return Ok(SensorObservation::ClosedDetected);
            }
        }
        Ok(SensorObservation::Clear)
    }
}
