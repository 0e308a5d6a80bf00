//! Query handlers for the narrative context.
//!
//! Read-only view DTOs built from a loaded `Story`.

use serde::Serialize;
use storyception_archetypes::Archetype;
use storyception_core::aggregate::AggregateRoot;
use storyception_core::error::StoryError;
use storyception_core::id::{BeatId, BranchId};
use uuid::Uuid;

use crate::domain::aggregates::Story;
use crate::domain::beat::{Beat, BeatState};

/// Read-only view of one beat.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatView {
    pub id: BeatId,
    pub beat_id: String,
    pub label: String,
    /// Timeline tag, `"6_TAE"`.
    pub abbreviation: String,
    pub state: BeatState,
    pub branch_count: usize,
    pub selected_branch_id: Option<BranchId>,
    pub selected_branch_title: Option<String>,
    pub is_loopable: bool,
    /// Branching weight, absent for beats the archetype table does not know.
    pub weight: Option<f64>,
}

/// Read-only view of a story aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryView {
    pub story_id: Uuid,
    pub archetype: Archetype,
    /// Current version (event count).
    pub version: u64,
    pub beats: Vec<BeatView>,
}

fn beat_view(story: &Story, beat: &Beat) -> Result<BeatView, StoryError> {
    let weight = story.weight(beat.id).ok();
    Ok(BeatView {
        id: beat.id,
        beat_id: beat.beat_id.clone(),
        label: beat.label.clone(),
        abbreviation: beat.abbreviation(),
        state: story.state(beat.id)?,
        branch_count: beat.branches().len(),
        selected_branch_id: beat.selected_branch_id(),
        selected_branch_title: beat.selected_branch().map(|b| b.title.clone()),
        is_loopable: weight.is_some_and(|w| w.is_loopable),
        weight: weight.map(|w| w.weight),
    })
}

/// Builds the view of every beat in story order.
///
/// # Errors
///
/// Returns `StoryError::BeatNotFound` only if the story is internally
/// inconsistent.
pub fn get_story_view(story: &Story) -> Result<StoryView, StoryError> {
    let beats = story
        .beats()
        .iter()
        .map(|beat| beat_view(story, beat))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StoryView {
        story_id: story.id,
        archetype: story.archetype(),
        version: story.version(),
        beats,
    })
}

/// Builds the view of a single beat.
///
/// # Errors
///
/// Returns `StoryError::BeatNotFound` if no beat has the id.
pub fn get_beat_view(story: &Story, beat_id: BeatId) -> Result<BeatView, StoryError> {
    let beat = story.beat(beat_id)?;
    beat_view(story, beat)
}

#[cfg(test)]
mod tests {
    use storyception_test_support::{MockRng, correlation_id, fixed_clock};

    use super::*;
    use crate::domain::aggregates::StoryConfig;

    #[test]
    fn test_get_story_view_lists_beats_in_order() {
        // Arrange
        let story = Story::seeded(Uuid::new_v4(), Archetype::StoryCircle, StoryConfig::default());

        // Act
        let view = get_story_view(&story).unwrap();

        // Assert
        assert_eq!(view.story_id, story.id);
        assert_eq!(view.archetype, Archetype::StoryCircle);
        assert_eq!(view.version, 0);
        assert_eq!(view.beats.len(), 8);
        assert!(view.beats.iter().all(|b| b.state == BeatState::Collapsed));
        assert_eq!(view.beats[0].id, 1);
        assert_eq!(view.beats[7].id, 8);
    }

    #[test]
    fn test_get_beat_view_reflects_selection() {
        // Arrange
        let mut story =
            Story::seeded(Uuid::new_v4(), Archetype::HeroJourney, StoryConfig::default());
        story
            .toggle_expand(6, correlation_id(), &fixed_clock(), &mut MockRng)
            .unwrap();
        story.choose(6, 3, correlation_id(), &fixed_clock()).unwrap();

        // Act
        let view = get_beat_view(&story, 6).unwrap();

        // Assert
        assert_eq!(view.abbreviation, "6_TAE");
        assert_eq!(view.state, BeatState::Selected { branch_id: 3 });
        assert_eq!(view.branch_count, 3);
        assert_eq!(view.selected_branch_id, Some(3));
        assert_eq!(
            view.selected_branch_title.as_deref(),
            Some("PATH C: COSTLY SACRIFICE")
        );
        assert!(view.is_loopable);
        assert_eq!(view.weight, Some(0.9));
    }

    #[test]
    fn test_get_beat_view_unknown_beat_returns_not_found() {
        let story = Story::seeded(Uuid::new_v4(), Archetype::SevenPoint, StoryConfig::default());

        let result = get_beat_view(&story, 8);

        assert_eq!(result, Err(StoryError::BeatNotFound(8)));
    }

    #[test]
    fn test_story_view_serializes_in_camel_case() {
        let story = Story::seeded(Uuid::new_v4(), Archetype::SaveTheCat, StoryConfig::default());

        let json = serde_json::to_value(get_story_view(&story).unwrap()).unwrap();

        assert_eq!(json["archetype"], "save_the_cat");
        assert_eq!(json["beats"][0]["beatId"], "openingImage");
        assert_eq!(json["beats"][0]["isLoopable"], false);
        assert_eq!(json["beats"][0]["state"]["state"], "collapsed");
    }
}
