//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoryError;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name for deserialization routing.
    pub event_type: String,
    /// Aggregate (story) this event belongs to.
    pub aggregate_id: Uuid,
    /// Monotonically increasing position within the aggregate stream, from 1.
    pub sequence_number: u64,
    /// Correlation ID of the command that produced this event.
    pub correlation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name (used for serialization routing).
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON for the persistence collaborator.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Serialization` if the payload cannot be encoded.
    fn to_payload(&self) -> Result<serde_json::Value, StoryError>;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}
