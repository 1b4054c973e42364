//! Adapters — bridge real platforms to the domain port traits.
//!
//! Everything ESP-IDF-specific is guarded by `#[cfg(target_os = "espidf")]`
//! inside each module; host builds get in-memory / filesystem counterparts.

pub mod config_file;
pub mod gpio;
pub mod log_sink;
#[cfg(target_os = "espidf")]
pub mod nvs;
pub mod time;
