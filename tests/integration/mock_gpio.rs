//! Mock GPIO port and event sink for integration tests.
//!
//! Records every configure/write/sleep call so tests can assert on the
//! exact pulse waveform and count, and lets tests script sensor levels.

use std::collections::HashMap;

use doorctl::app::events::AppEvent;
use doorctl::app::ports::{EventSink, GpioPort, Level, Pull};
use doorctl::error::GpioError;

// ── GPIO call record ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioCall {
    ConfigureOutput { pin: u8, initial: Level },
    ConfigureInput { pin: u8, pull: Pull },
    Write { pin: u8, level: Level },
    Sleep { ms: u32 },
}

// ── MockGpio ──────────────────────────────────────────────────

pub struct MockGpio {
    pub calls: Vec<GpioCall>,
    levels: HashMap<u8, Level>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl MockGpio {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            levels: HashMap::new(),
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// Script the level an input pin will read.
    pub fn set_level(&mut self, pin: u8, level: Level) {
        self.levels.insert(pin, level);
    }

    /// How many LOW pulses were driven onto `pin`.
    pub fn pulse_count(&self, pin: u8) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, GpioCall::Write { pin: p, level: Level::Low } if *p == pin))
            .count()
    }

    /// The writes and sleeps issued on `pin` (ignores configuration).
    pub fn waveform(&self, pin: u8) -> Vec<GpioCall> {
        self.calls
            .iter()
            .filter(|c| match c {
                GpioCall::Write { pin: p, .. } => *p == pin,
                GpioCall::Sleep { .. } => true,
                _ => false,
            })
            .copied()
            .collect()
    }
}

impl Default for MockGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioPort for MockGpio {
    fn configure_output(&mut self, pin: u8, initial: Level) -> Result<(), GpioError> {
        self.levels.insert(pin, initial);
        self.calls.push(GpioCall::ConfigureOutput { pin, initial });
        Ok(())
    }

    fn configure_input(&mut self, pin: u8, pull: Pull) -> Result<(), GpioError> {
        // Pull-up inputs idle HIGH unless the test scripted otherwise.
        self.levels.entry(pin).or_insert(Level::High);
        self.calls.push(GpioCall::ConfigureInput { pin, pull });
        Ok(())
    }

    fn read_level(&mut self, pin: u8) -> Result<Level, GpioError> {
        if self.fail_reads {
            return Err(GpioError::ReadFailed);
        }
        Ok(*self.levels.get(&pin).unwrap_or(&Level::High))
    }

    fn write_level(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        if self.fail_writes {
            return Err(GpioError::WriteFailed);
        }
        self.levels.insert(pin, level);
        self.calls.push(GpioCall::Write { pin, level });
        Ok(())
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.calls.push(GpioCall::Sleep { ms });
    }
}

// ── VecSink ───────────────────────────────────────────────────

/// Event sink that records everything emitted.
pub struct VecSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }
}

impl Default for VecSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
