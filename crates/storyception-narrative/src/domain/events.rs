//! Domain events for the narrative context.

use serde::{Deserialize, Serialize};
use storyception_core::error::StoryError;
use storyception_core::event::{DomainEvent, EventMetadata};
use storyception_core::id::{BeatId, BranchId};

use super::beat::BranchOption;

/// Emitted when a beat's branches become visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatExpanded {
    /// The beat that was expanded.
    pub beat_id: BeatId,
}

/// Emitted when a beat's branches are hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatCollapsed {
    /// The beat that was collapsed.
    pub beat_id: BeatId,
}

/// Emitted the first time options are generated for a beat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchesGenerated {
    /// The beat that received options.
    pub beat_id: BeatId,
    /// The generated options, in display order.
    pub branches: Vec<BranchOption>,
}

/// Emitted when a branch is chosen; siblings become locked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchChosen {
    /// The beat the choice was made on.
    pub beat_id: BeatId,
    /// The chosen branch.
    pub branch_id: BranchId,
    /// The branch that was selected before, on re-selection.
    pub previous: Option<BranchId>,
}

/// Emitted when a beat's selection is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionUndone {
    /// The beat whose selection was cleared.
    pub beat_id: BeatId,
    /// The branch that was selected, if any.
    pub previous: Option<BranchId>,
}

/// Emitted when a beat's options are thrown away and generated anew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchesRegenerated {
    /// The beat whose options were replaced.
    pub beat_id: BeatId,
    /// Ids of the options that no longer exist.
    pub discarded: Vec<BranchId>,
    /// The replacement options, in display order.
    pub branches: Vec<BranchOption>,
}

/// Emitted when a narrative idea is drafted for a beat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaGenerated {
    /// The beat the idea was drafted for.
    pub beat_id: BeatId,
    /// The drafted idea text.
    pub idea: String,
}

/// Event payload variants for the narrative context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoryEventKind {
    /// A beat's branches were shown.
    BeatExpanded(BeatExpanded),
    /// A beat's branches were hidden.
    BeatCollapsed(BeatCollapsed),
    /// A beat received its first set of options.
    BranchesGenerated(BranchesGenerated),
    /// A branch was chosen.
    BranchChosen(BranchChosen),
    /// A beat's selection was cleared.
    SelectionUndone(SelectionUndone),
    /// A beat's options were replaced.
    BranchesRegenerated(BranchesRegenerated),
    /// An idea was drafted for a beat.
    IdeaGenerated(IdeaGenerated),
}

impl StoryEventKind {
    /// Routing name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::BeatExpanded(_) => "story.beat_expanded",
            Self::BeatCollapsed(_) => "story.beat_collapsed",
            Self::BranchesGenerated(_) => "story.branches_generated",
            Self::BranchChosen(_) => "story.branch_chosen",
            Self::SelectionUndone(_) => "story.selection_undone",
            Self::BranchesRegenerated(_) => "story.branches_regenerated",
            Self::IdeaGenerated(_) => "story.idea_generated",
        }
    }

    /// The beat this payload concerns.
    #[must_use]
    pub fn beat_id(&self) -> BeatId {
        match self {
            Self::BeatExpanded(e) => e.beat_id,
            Self::BeatCollapsed(e) => e.beat_id,
            Self::BranchesGenerated(e) => e.beat_id,
            Self::BranchChosen(e) => e.beat_id,
            Self::SelectionUndone(e) => e.beat_id,
            Self::BranchesRegenerated(e) => e.beat_id,
            Self::IdeaGenerated(e) => e.beat_id,
        }
    }
}

/// Domain event envelope for the narrative context.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: StoryEventKind,
}

impl StoryEvent {
    /// Rebuilds an event from stored metadata and its JSON payload.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Serialization` if the payload does not decode.
    pub fn from_payload(
        metadata: EventMetadata,
        payload: serde_json::Value,
    ) -> Result<Self, StoryError> {
        let kind = serde_json::from_value(payload)
            .map_err(|e| StoryError::Serialization(format!("event deserialization failed: {e}")))?;
        Ok(Self { metadata, kind })
    }
}

impl DomainEvent for StoryEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> Result<serde_json::Value, StoryError> {
        serde_json::to_value(&self.kind)
            .map_err(|e| StoryError::Serialization(format!("event serialization failed: {e}")))
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use storyception_test_support::fixed_now;
    use uuid::Uuid;

    use super::*;

    fn metadata(event_type: &str) -> EventMetadata {
        EventMetadata {
            event_id: Uuid::new_v4(),
            event_type: event_type.to_owned(),
            aggregate_id: Uuid::new_v4(),
            sequence_number: 1,
            correlation_id: Uuid::new_v4(),
            occurred_at: fixed_now(),
        }
    }

    #[test]
    fn test_payload_survives_storage() {
        let event = StoryEvent {
            metadata: metadata("story.branch_chosen"),
            kind: StoryEventKind::BranchChosen(BranchChosen {
                beat_id: 6,
                branch_id: 2,
                previous: None,
            }),
        };

        let payload = event.to_payload().unwrap();
        let restored = StoryEvent::from_payload(event.metadata.clone(), payload).unwrap();

        assert_eq!(restored, event);
        assert_eq!(restored.event_type(), "story.branch_chosen");
        assert_eq!(restored.kind.beat_id(), 6);
    }

    #[test]
    fn test_from_payload_rejects_unknown_shape() {
        let result = StoryEvent::from_payload(
            metadata("story.branch_chosen"),
            serde_json::json!({ "Teleported": { "beat_id": 1 } }),
        );

        assert!(matches!(result, Err(StoryError::Serialization(_))));
    }
}
