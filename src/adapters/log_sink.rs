//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on device, stderr on the host). A remote
//! accessory adapter would implement the same trait to push the values
//! into its characteristics instead.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={state}");
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {from} -> {to}");
            }
            AppEvent::TargetChanged(target) => {
                info!("TARGET | {target}");
            }
            AppEvent::ObstructionDetected => {
                warn!("OBSTRUCTION | transition timed out, door stopped");
            }
            AppEvent::ObstructionCleared => {
                info!("OBSTRUCTION | cleared");
            }
            AppEvent::Status(s) => {
                info!(
                    "STATUS | state={} target={} obstructed={} pending={}",
                    s.state, s.target, s.obstructed, s.transition_pending,
                );
            }
        }
    }
}
