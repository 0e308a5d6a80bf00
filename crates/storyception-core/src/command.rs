//! Command abstractions.

use uuid::Uuid;

/// A request to change story state, carried through the application layer.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable name used in log fields.
    fn command_type(&self) -> &'static str;

    /// Correlation ID stamped onto every event the command produces.
    fn correlation_id(&self) -> Uuid;
}
