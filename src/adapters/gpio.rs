//! GPIO port adapters.
//!
//! - **`target_os = "espidf"`** — [`EspGpio`], raw `esp-idf-sys` calls
//!   (`gpio_config` / `gpio_set_level` / `gpio_get_level`) with FreeRTOS
//!   delays.
//! - **host** — [`SimGpio`], an in-memory pin table with simulation
//!   setters, used by the host binary's simulation loop.

use crate::app::ports::{GpioPort, Level, Pull};
use crate::error::GpioError;

// ───────────────────────────────────────────────────────────────
// ESP-IDF implementation
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub use esp_impl::EspGpio;

#[cfg(target_os = "espidf")]
mod esp_impl {
    use esp_idf_hal::delay::FreeRtos;
    use esp_idf_sys::{
        gpio_config, gpio_config_t, gpio_get_level, gpio_int_type_t_GPIO_INTR_DISABLE,
        gpio_mode_t_GPIO_MODE_INPUT, gpio_mode_t_GPIO_MODE_OUTPUT,
        gpio_pulldown_t_GPIO_PULLDOWN_DISABLE, gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
        gpio_pullup_t_GPIO_PULLUP_DISABLE, gpio_pullup_t_GPIO_PULLUP_ENABLE, gpio_set_level,
        ESP_OK,
    };

    use super::{GpioError, GpioPort, Level, Pull};

    /// GPIO port backed by the ESP-IDF driver.
    pub struct EspGpio;

    impl EspGpio {
        pub fn new() -> Self {
            Self
        }
    }

    impl GpioPort for EspGpio {
        fn configure_output(&mut self, pin: u8, initial: Level) -> Result<(), GpioError> {
            let cfg = gpio_config_t {
                pin_bit_mask: 1u64 << pin,
                mode: gpio_mode_t_GPIO_MODE_OUTPUT,
                pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
                pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
                intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
            };
            // SAFETY: plain FFI into the IDF GPIO driver; the config struct
            // is fully initialised above.
            if unsafe { gpio_config(&cfg) } != ESP_OK {
                return Err(GpioError::ConfigFailed);
            }
            self.write_level(pin, initial)
        }

        fn configure_input(&mut self, pin: u8, pull: Pull) -> Result<(), GpioError> {
            let (pull_up, pull_down) = match pull {
                Pull::Up => (
                    gpio_pullup_t_GPIO_PULLUP_ENABLE,
                    gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
                ),
                Pull::Down => (
                    gpio_pullup_t_GPIO_PULLUP_DISABLE,
                    gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
                ),
                Pull::Floating => (
                    gpio_pullup_t_GPIO_PULLUP_DISABLE,
                    gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
                ),
            };
            let cfg = gpio_config_t {
                pin_bit_mask: 1u64 << pin,
                mode: gpio_mode_t_GPIO_MODE_INPUT,
                pull_up_en: pull_up,
                pull_down_en: pull_down,
                intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
            };
            // SAFETY: see configure_output.
            if unsafe { gpio_config(&cfg) } != ESP_OK {
                return Err(GpioError::ConfigFailed);
            }
            Ok(())
        }

        fn read_level(&mut self, pin: u8) -> Result<Level, GpioError> {
            // SAFETY: gpio_get_level is safe for any valid pin number and
            // returns 0 for pins that are not inputs.
            let raw = unsafe { gpio_get_level(i32::from(pin)) };
            Ok(if raw == 0 { Level::Low } else { Level::High })
        }

        fn write_level(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
            let raw = match level {
                Level::Low => 0,
                Level::High => 1,
            };
            // SAFETY: plain FFI; pin validity was checked by gpio_config.
            if unsafe { gpio_set_level(i32::from(pin), raw) } != ESP_OK {
                return Err(GpioError::WriteFailed);
            }
            Ok(())
        }

        fn sleep_ms(&mut self, ms: u32) {
            FreeRtos::delay_ms(ms);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation implementation
// ───────────────────────────────────────────────────────────────

/// In-memory GPIO for the host simulation loop.
///
/// Unconfigured pins reject reads and writes, mirroring how the real
/// driver behaves when `gpio_config` was never called. Inputs default to
/// HIGH (pull-up, sensor not triggered).
#[cfg(not(target_os = "espidf"))]
pub struct SimGpio {
    pins: std::collections::HashMap<u8, SimPin>,
}

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone, Copy)]
struct SimPin {
    level: Level,
    output: bool,
}

#[cfg(not(target_os = "espidf"))]
impl SimGpio {
    pub fn new() -> Self {
        Self {
            pins: std::collections::HashMap::new(),
        }
    }

    /// Force an input pin to a level, simulating the physical sensor.
    pub fn sim_set_level(&mut self, pin: u8, level: Level) {
        let pin = self.pins.entry(pin).or_insert(SimPin {
            level,
            output: false,
        });
        pin.level = level;
    }

    /// Last driven/simulated level of a pin, if configured.
    pub fn level(&self, pin: u8) -> Option<Level> {
        self.pins.get(&pin).map(|p| p.level)
    }
}

#[cfg(not(target_os = "espidf"))]
impl GpioPort for SimGpio {
    fn configure_output(&mut self, pin: u8, initial: Level) -> Result<(), GpioError> {
        self.pins.insert(
            pin,
            SimPin {
                level: initial,
                output: true,
            },
        );
        Ok(())
    }

    fn configure_input(&mut self, pin: u8, _pull: Pull) -> Result<(), GpioError> {
        self.pins.entry(pin).or_insert(SimPin {
            level: Level::High,
            output: false,
        });
        Ok(())
    }

    fn read_level(&mut self, pin: u8) -> Result<Level, GpioError> {
        self.pins
            .get(&pin)
            .map(|p| p.level)
            .ok_or(GpioError::NotConfigured)
    }

    fn write_level(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        match self.pins.get_mut(&pin) {
            Some(p) if p.output => {
                p.level = level;
                Ok(())
            }
            Some(_) => Err(GpioError::WriteFailed),
            None => Err(GpioError::NotConfigured),
        }
    }

    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
