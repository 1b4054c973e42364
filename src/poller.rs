//! Poll cadence tracker.
//!
//! Decides *when* a poll cycle is due from the monotonic clock; the main
//! loop decides *what* a cycle does. Kept separate from the event loop so
//! the cadence logic is independently testable.
//!
//! After a stall (e.g. the 500 ms pulse blocking the loop) the next cycle
//! fires immediately and the schedule re-anchors to the current time — no
//! burst of catch-up cycles.

pub struct Poller {
    interval_ms: u64,
    next_due_ms: u64,
}

impl Poller {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            next_due_ms: 0,
        }
    }

    /// True when a cycle is due; advances the schedule when it fires.
    pub fn due(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms = now_ms + self.interval_ms;
        true
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}
