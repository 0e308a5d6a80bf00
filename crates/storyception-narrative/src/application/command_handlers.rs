//! Command handlers for the narrative context.
//!
//! Each handler runs one command against a loaded `Story` and hands back
//! the events it produced. Storing those events is the caller's business.

use storyception_core::aggregate::AggregateRoot;
use storyception_core::clock::Clock;
use storyception_core::command::Command;
use storyception_core::error::StoryError;
use storyception_core::rng::DeterministicRng;
use tracing::{info, instrument, warn};

use crate::domain::aggregates::Story;
use crate::domain::commands::{
    ChooseBranch, GenerateIdea, RegenerateBranches, ToggleExpand, UndoSelection,
};
use crate::domain::events::StoryEvent;

/// Drains the story's uncommitted events, or logs and passes on the failure.
fn drain(
    story: &mut Story,
    command: &dyn Command,
    outcome: Result<(), StoryError>,
) -> Result<Vec<StoryEvent>, StoryError> {
    if let Err(err) = outcome {
        warn!(
            command_type = command.command_type(),
            kind = ?err.kind(),
            %err,
            "command rejected"
        );
        return Err(err);
    }

    let events = story.uncommitted_events().to_vec();
    story.clear_uncommitted_events();
    info!(
        command_type = command.command_type(),
        event_count = events.len(),
        version = story.version(),
        "command handled"
    );
    Ok(events)
}

/// Handles the `ToggleExpand` command.
///
/// # Errors
///
/// Returns `StoryError::BeatNotFound` if the beat does not exist.
#[instrument(skip_all, fields(story_id = %story.id, beat_id = command.beat_id, correlation_id = %command.correlation_id))]
pub fn handle_toggle_expand(
    command: &ToggleExpand,
    story: &mut Story,
    clock: &dyn Clock,
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<StoryEvent>, StoryError> {
    let outcome = story
        .toggle_expand(command.beat_id, command.correlation_id, clock, rng)
        .map(|_| ());
    drain(story, command, outcome)
}

/// Handles the `ChooseBranch` command.
///
/// # Errors
///
/// Returns `StoryError::BeatNotFound` or `StoryError::BranchNotFound` for
/// unknown ids, and `StoryError::InvalidState` if the beat has no branches.
#[instrument(skip_all, fields(story_id = %story.id, beat_id = command.beat_id, branch_id = command.branch_id, correlation_id = %command.correlation_id))]
pub fn handle_choose_branch(
    command: &ChooseBranch,
    story: &mut Story,
    clock: &dyn Clock,
) -> Result<Vec<StoryEvent>, StoryError> {
    let outcome = story.choose(
        command.beat_id,
        command.branch_id,
        command.correlation_id,
        clock,
    );
    drain(story, command, outcome)
}

/// Handles the `UndoSelection` command.
///
/// # Errors
///
/// Returns `StoryError::BeatNotFound` for an unknown beat and
/// `StoryError::InvalidState` if the beat has no branches.
#[instrument(skip_all, fields(story_id = %story.id, beat_id = command.beat_id, correlation_id = %command.correlation_id))]
pub fn handle_undo_selection(
    command: &UndoSelection,
    story: &mut Story,
    clock: &dyn Clock,
) -> Result<Vec<StoryEvent>, StoryError> {
    let outcome = story.undo(command.beat_id, command.correlation_id, clock);
    drain(story, command, outcome)
}

/// Handles the `RegenerateBranches` command.
///
/// # Errors
///
/// Returns `StoryError::BeatNotFound` if the beat does not exist.
#[instrument(skip_all, fields(story_id = %story.id, beat_id = command.beat_id, correlation_id = %command.correlation_id))]
pub fn handle_regenerate_branches(
    command: &RegenerateBranches,
    story: &mut Story,
    clock: &dyn Clock,
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<StoryEvent>, StoryError> {
    let outcome = story
        .regenerate(command.beat_id, command.correlation_id, clock, rng)
        .map(|_| ());
    drain(story, command, outcome)
}

/// Handles the `GenerateIdea` command.
///
/// # Errors
///
/// Returns `StoryError::BeatNotFound` if the beat does not exist.
#[instrument(skip_all, fields(story_id = %story.id, beat_id = command.beat_id, correlation_id = %command.correlation_id))]
pub fn handle_generate_idea(
    command: &GenerateIdea,
    story: &mut Story,
    clock: &dyn Clock,
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<StoryEvent>, StoryError> {
    let outcome = story
        .generate_idea(command.beat_id, command.correlation_id, clock, rng)
        .map(|_| ());
    drain(story, command, outcome)
}
