//! Commands for the narrative context.

use storyception_core::command::Command;
use storyception_core::id::{BeatId, BranchId};
use uuid::Uuid;

/// Command to show or hide a beat's branches, generating them on first show.
#[derive(Debug, Clone)]
pub struct ToggleExpand {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    pub beat_id: BeatId,
}

/// Command to choose one branch of a beat.
#[derive(Debug, Clone)]
pub struct ChooseBranch {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    pub beat_id: BeatId,
    pub branch_id: BranchId,
}

/// Command to clear a beat's selection.
#[derive(Debug, Clone)]
pub struct UndoSelection {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    pub beat_id: BeatId,
}

/// Command to discard a beat's options and generate new ones.
#[derive(Debug, Clone)]
pub struct RegenerateBranches {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    pub beat_id: BeatId,
}

/// Command to draft a narrative idea for a beat.
#[derive(Debug, Clone)]
pub struct GenerateIdea {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    pub beat_id: BeatId,
}

impl Command for ToggleExpand {
    fn command_type(&self) -> &'static str {
        "story.toggle_expand"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for ChooseBranch {
    fn command_type(&self) -> &'static str {
        "story.choose_branch"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for UndoSelection {
    fn command_type(&self) -> &'static str {
        "story.undo_selection"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for RegenerateBranches {
    fn command_type(&self) -> &'static str {
        "story.regenerate_branches"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for GenerateIdea {
    fn command_type(&self) -> &'static str {
        "story.generate_idea"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
