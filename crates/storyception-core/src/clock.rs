//! Clock abstraction used to timestamp story events.

use chrono::{DateTime, Utc};

/// Source of "now" for event metadata and history entries. Tests inject a
/// fixed clock so recorded events compare equal across runs.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
