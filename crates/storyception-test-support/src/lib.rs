//! Shared test doubles for the Storyception workspace.

mod clock;
mod rng;
mod logging;

pub use clock::{FixedClock, fixed_clock, fixed_now};
pub use rng::{MockRng, SequenceRng};
pub use logging::init_tracing;

/// A fresh random correlation id for commands under test.
#[must_use]
pub fn correlation_id() -> uuid::Uuid {
    uuid::Uuid::new_v4()
}
