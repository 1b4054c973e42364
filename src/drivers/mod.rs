//! Hardware-facing drivers.

pub mod trigger;
