//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// An aggregate whose state changes only by applying its own events.
///
/// Commands validate and record events; `apply` is the single place state is
/// mutated, so replaying a stored event stream reproduces the same state.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the number of events applied so far.
    fn version(&self) -> u64;

    /// Applies an event to internal state.
    fn apply(&mut self, event: &Self::Event);

    /// Events recorded since the last call to `clear_uncommitted_events`.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Drops the recorded events once the caller has handed them off.
    fn clear_uncommitted_events(&mut self);
}
