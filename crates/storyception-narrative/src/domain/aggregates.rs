//! Aggregate root for a story session.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storyception_archetypes::{Archetype, BeatWeight, get_weight};
use storyception_core::aggregate::AggregateRoot;
use storyception_core::clock::Clock;
use storyception_core::error::StoryError;
use storyception_core::event::EventMetadata;
use storyception_core::id::{BeatId, BranchId};
use storyception_core::rng::DeterministicRng;
use tracing::{debug, warn};
use uuid::Uuid;

use super::beat::{Beat, BeatState, BranchOption, ExpandedSet};
use super::catalog;
use super::events::{
    BeatCollapsed, BeatExpanded, BranchChosen, BranchesGenerated, BranchesRegenerated,
    IdeaGenerated, SelectionUndone, StoryEvent, StoryEventKind,
};
use super::generator::{BranchGenerator, BranchPolicy};
use super::seed::{DEFAULT_TOTAL_RUNTIME_SECS, seed_beats};

/// Number of history entries a story keeps by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Per-story tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    /// How many options each generation produces.
    pub branch_policy: BranchPolicy,
    /// Runtime that seeded beat durations are scaled to.
    pub total_runtime_secs: f64,
    /// Maximum number of retained history entries.
    pub history_capacity: usize,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            branch_policy: BranchPolicy::default(),
            total_runtime_secs: DEFAULT_TOTAL_RUNTIME_SECS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// A human-readable record of one applied transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Sequence number of the event that produced this entry.
    pub sequence_number: u64,
    /// What happened, e.g. `"Expanded 6. TESTS, ALLIES, ENEMIES"`.
    pub action: String,
    /// When the event was recorded.
    pub occurred_at: DateTime<Utc>,
}

/// The aggregate root for one user's story: the beat list, which beats are
/// expanded, and the branch-selection lifecycle of every beat.
///
/// Every transition is validated, recorded as a [`StoryEvent`] and applied
/// immediately. At most one branch per beat is ever selected.
#[derive(Debug)]
pub struct Story {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: u64,
    archetype: Archetype,
    config: StoryConfig,
    pub(crate) beats: Vec<Beat>,
    pub(crate) expanded: ExpandedSet,
    /// Next id handed to a generated branch. Never decreases, so discarded
    /// ids are never reused.
    next_branch_id: BranchId,
    history: VecDeque<HistoryEntry>,
    /// Uncommitted events pending hand-off.
    uncommitted_events: Vec<StoryEvent>,
}

impl Story {
    /// Creates a story from beat records supplied by the generation or
    /// persistence collaborator.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::InvariantViolation` if two beats share an id or a
    /// beat's selection flags contradict each other.
    pub fn new(
        id: Uuid,
        archetype: Archetype,
        beats: Vec<Beat>,
        config: StoryConfig,
    ) -> Result<Self, StoryError> {
        let mut seen = HashSet::new();
        for beat in &beats {
            if !seen.insert(beat.id) {
                return Err(StoryError::InvariantViolation {
                    beat_id: beat.id,
                    detail: "duplicate beat id".to_owned(),
                });
            }
            beat.verify_selection()?;
        }
        Ok(Self::assemble(id, archetype, beats, config))
    }

    /// Creates a story with the archetype's default beat list.
    #[must_use]
    pub fn seeded(id: Uuid, archetype: Archetype, config: StoryConfig) -> Self {
        let beats = seed_beats(archetype, config.total_runtime_secs);
        Self::assemble(id, archetype, beats, config)
    }

    /// Rebuilds a story by applying stored events on top of its initial
    /// beat records.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Story::new`], or the validation error of
    /// the first event that does not fit the state it is applied to.
    pub fn replay(
        id: Uuid,
        archetype: Archetype,
        beats: Vec<Beat>,
        config: StoryConfig,
        events: &[StoryEvent],
    ) -> Result<Self, StoryError> {
        let mut story = Self::new(id, archetype, beats, config)?;
        for event in events {
            story.validate(&event.kind)?;
            story.apply(event);
        }
        Ok(story)
    }

    fn assemble(id: Uuid, archetype: Archetype, beats: Vec<Beat>, config: StoryConfig) -> Self {
        let next_branch_id = beats
            .iter()
            .flat_map(|beat| beat.branches())
            .map(|branch| branch.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));

        Self {
            id,
            version: 0,
            archetype,
            config,
            beats,
            expanded: ExpandedSet::new(),
            next_branch_id,
            history: VecDeque::new(),
            uncommitted_events: Vec::new(),
        }
    }

    #[must_use]
    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    #[must_use]
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    /// The beat list in story order.
    #[must_use]
    pub fn beats(&self) -> &[Beat] {
        &self.beats
    }

    /// Beats whose branches are shown, for passing to the layout engine.
    #[must_use]
    pub fn expanded(&self) -> &ExpandedSet {
        &self.expanded
    }

    /// Most recent transitions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// # Errors
    ///
    /// Returns `StoryError::BeatNotFound` for an unknown id.
    pub fn beat(&self, beat_id: BeatId) -> Result<&Beat, StoryError> {
        self.beats
            .iter()
            .find(|beat| beat.id == beat_id)
            .ok_or(StoryError::BeatNotFound(beat_id))
    }

    fn beat_mut(&mut self, beat_id: BeatId) -> Option<&mut Beat> {
        self.beats.iter_mut().find(|beat| beat.id == beat_id)
    }

    /// The selection lifecycle state of a beat.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::BeatNotFound` for an unknown id.
    pub fn state(&self, beat_id: BeatId) -> Result<BeatState, StoryError> {
        let beat = self.beat(beat_id)?;
        Ok(match beat.selected_branch_id() {
            Some(branch_id) => BeatState::Selected { branch_id },
            None if self.expanded.contains(&beat_id) => BeatState::Expanded,
            None => BeatState::Collapsed,
        })
    }

    /// The weight-table entry for a beat.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::BeatNotFound` for an unknown beat, or
    /// `StoryError::WeightNotFound` if the archetype has no entry for it.
    pub fn weight(&self, beat_id: BeatId) -> Result<&'static BeatWeight, StoryError> {
        let beat = self.beat(beat_id)?;
        get_weight(self.archetype, &beat.beat_id)
    }

    /// Shows the beat's branches if hidden, hides them if shown. The first
    /// time a beat without branches is shown, options are generated.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::BeatNotFound` for an unknown id.
    pub fn toggle_expand(
        &mut self,
        beat_id: BeatId,
        correlation_id: Uuid,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
    ) -> Result<BeatState, StoryError> {
        let beat = self.beat(beat_id)?;
        let needs_generation = !beat.has_generated_branches();
        let type_offset = beat.regenerations as usize;

        if self.expanded.contains(&beat_id) {
            self.record(
                StoryEventKind::BeatCollapsed(BeatCollapsed { beat_id }),
                correlation_id,
                clock,
            )?;
        } else {
            if needs_generation {
                let branches = self.generate_for(beat_id, type_offset, rng)?;
                self.record(
                    StoryEventKind::BranchesGenerated(BranchesGenerated { beat_id, branches }),
                    correlation_id,
                    clock,
                )?;
            }
            self.record(
                StoryEventKind::BeatExpanded(BeatExpanded { beat_id }),
                correlation_id,
                clock,
            )?;
        }

        self.state(beat_id)
    }

    /// Selects `branch_id` and locks its siblings. Choosing again moves the
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::BeatNotFound` or `StoryError::BranchNotFound` for
    /// unknown ids, and `StoryError::InvalidState` if the beat has no
    /// branches or is collapsed with nothing chosen.
    pub fn choose(
        &mut self,
        beat_id: BeatId,
        branch_id: BranchId,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), StoryError> {
        let previous = self.beat(beat_id)?.selected_branch_id();
        self.record(
            StoryEventKind::BranchChosen(BranchChosen {
                beat_id,
                branch_id,
                previous,
            }),
            correlation_id,
            clock,
        )
    }

    /// Clears the beat's selection and returns it to `Expanded`.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::BeatNotFound` for an unknown id and
    /// `StoryError::InvalidState` if the beat has no branches.
    pub fn undo(
        &mut self,
        beat_id: BeatId,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), StoryError> {
        let previous = self.beat(beat_id)?.selected_branch_id();
        self.record(
            StoryEventKind::SelectionUndone(SelectionUndone { beat_id, previous }),
            correlation_id,
            clock,
        )
    }

    /// Discards the beat's options, forfeiting any selection, and generates a
    /// new set. Each regeneration starts one step further along the branch
    /// type catalog.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::BeatNotFound` for an unknown id.
    pub fn regenerate(
        &mut self,
        beat_id: BeatId,
        correlation_id: Uuid,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Vec<BranchId>, StoryError> {
        let beat = self.beat(beat_id)?;
        let discarded = beat.branches().iter().map(|branch| branch.id).collect();
        let type_offset = beat.regenerations as usize + 1;

        let branches = self.generate_for(beat_id, type_offset, rng)?;
        let ids = branches.iter().map(|branch| branch.id).collect();
        self.record(
            StoryEventKind::BranchesRegenerated(BranchesRegenerated {
                beat_id,
                discarded,
                branches,
            }),
            correlation_id,
            clock,
        )?;
        Ok(ids)
    }

    /// Drafts a narrative idea for the beat and stores it on the beat.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::BeatNotFound` for an unknown id.
    pub fn generate_idea(
        &mut self,
        beat_id: BeatId,
        correlation_id: Uuid,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
    ) -> Result<String, StoryError> {
        let idea = catalog::generate_idea(&self.beat(beat_id)?.beat_id, rng);
        self.record(
            StoryEventKind::IdeaGenerated(IdeaGenerated {
                beat_id,
                idea: idea.clone(),
            }),
            correlation_id,
            clock,
        )?;
        Ok(idea)
    }

    fn generate_for(
        &self,
        beat_id: BeatId,
        type_offset: usize,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Vec<BranchOption>, StoryError> {
        let beat = self.beat(beat_id)?;
        let weight = match get_weight(self.archetype, &beat.beat_id) {
            Ok(weight) => Some(weight),
            Err(err) => {
                warn!(beat_id, %err, "no weight entry; using default branch count");
                None
            }
        };

        Ok(BranchGenerator::new(self.config.branch_policy).generate(
            beat,
            weight,
            type_offset,
            self.next_branch_id,
            rng,
        ))
    }

    /// Checks that an event fits the current state.
    fn validate(&self, kind: &StoryEventKind) -> Result<(), StoryError> {
        let beat_id = kind.beat_id();
        let beat = self.beat(beat_id)?;

        match kind {
            StoryEventKind::BranchChosen(chosen) => {
                ensure_has_branches(beat)?;
                if self.state(beat_id)? == BeatState::Collapsed {
                    return Err(StoryError::InvalidState {
                        beat_id,
                        reason: "branches are collapsed".to_owned(),
                    });
                }
                if beat.branch(chosen.branch_id).is_none() {
                    return Err(StoryError::BranchNotFound {
                        beat_id,
                        branch_id: chosen.branch_id,
                    });
                }
            }
            StoryEventKind::SelectionUndone(_) => ensure_has_branches(beat)?,
            StoryEventKind::BranchesGenerated(BranchesGenerated { branches, .. })
            | StoryEventKind::BranchesRegenerated(BranchesRegenerated { branches, .. }) => {
                ensure_fresh(beat_id, branches)?;
            }
            StoryEventKind::BeatExpanded(_)
            | StoryEventKind::BeatCollapsed(_)
            | StoryEventKind::IdeaGenerated(_) => {}
        }
        Ok(())
    }

    fn record(
        &mut self,
        kind: StoryEventKind,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), StoryError> {
        self.validate(&kind)?;

        let event = StoryEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.version + 1,
                correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };

        debug!(
            event_type = event.kind.event_type(),
            beat_id = event.kind.beat_id(),
            sequence_number = event.metadata.sequence_number,
            "recording story event"
        );

        self.apply(&event);
        self.uncommitted_events.push(event);
        Ok(())
    }

    fn install_branches(&mut self, beat_id: BeatId, branches: &[BranchOption], regenerated: bool) {
        if let Some(max) = branches.iter().map(|branch| branch.id).max() {
            self.next_branch_id = self.next_branch_id.max(max.saturating_add(1));
        }
        if let Some(beat) = self.beat_mut(beat_id) {
            beat.replace_branches(branches.to_vec());
            if regenerated {
                beat.regenerations += 1;
            }
        }
    }

    fn describe(&self, kind: &StoryEventKind) -> String {
        let beat = self.beat(kind.beat_id()).ok();
        let label = beat.map_or_else(|| format!("beat {}", kind.beat_id()), |b| b.label.clone());

        match kind {
            StoryEventKind::BeatExpanded(_) => format!("Expanded {label}"),
            StoryEventKind::BeatCollapsed(_) => format!("Collapsed {label}"),
            StoryEventKind::BranchesGenerated(e) => {
                format!("Generated {} paths for {label}", e.branches.len())
            }
            StoryEventKind::BranchChosen(e) => {
                let title = beat
                    .and_then(|b| b.branch(e.branch_id))
                    .map_or_else(|| format!("path {}", e.branch_id), |b| b.title.clone());
                format!("Chose {title} at {label}")
            }
            StoryEventKind::SelectionUndone(_) => format!("Undid selection at {label}"),
            StoryEventKind::BranchesRegenerated(e) => {
                format!("Regenerated {} paths for {label}", e.branches.len())
            }
            StoryEventKind::IdeaGenerated(_) => format!("Drafted idea for {label}"),
        }
    }

    fn push_history(&mut self, event: &StoryEvent) {
        if self.config.history_capacity == 0 {
            return;
        }
        let entry = HistoryEntry {
            sequence_number: event.metadata.sequence_number,
            action: self.describe(&event.kind),
            occurred_at: event.metadata.occurred_at,
        };
        while self.history.len() >= self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(entry);
    }
}

fn ensure_has_branches(beat: &Beat) -> Result<(), StoryError> {
    if beat.branches().is_empty() {
        return Err(StoryError::InvalidState {
            beat_id: beat.id,
            reason: "no branches have been generated".to_owned(),
        });
    }
    Ok(())
}

fn ensure_fresh(beat_id: BeatId, branches: &[BranchOption]) -> Result<(), StoryError> {
    let mut seen = HashSet::new();
    for branch in branches {
        if !seen.insert(branch.id) {
            return Err(StoryError::InvariantViolation {
                beat_id,
                detail: format!("duplicate branch id {}", branch.id),
            });
        }
        if branch.is_selected() {
            return Err(StoryError::InvariantViolation {
                beat_id,
                detail: format!("new branch {} arrived already selected", branch.id),
            });
        }
    }
    Ok(())
}

impl AggregateRoot for Story {
    type Event = StoryEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        // History is described against the pre-event state so a chosen
        // branch's title is still resolvable after a regeneration.
        self.push_history(event);

        match &event.kind {
            StoryEventKind::BeatExpanded(payload) => {
                self.expanded.insert(payload.beat_id);
            }
            StoryEventKind::BeatCollapsed(payload) => {
                self.expanded.remove(&payload.beat_id);
            }
            StoryEventKind::BranchesGenerated(payload) => {
                self.install_branches(payload.beat_id, &payload.branches, false);
            }
            StoryEventKind::BranchChosen(payload) => {
                if let Some(beat) = self.beat_mut(payload.beat_id) {
                    beat.mark_selected(payload.branch_id);
                }
            }
            StoryEventKind::SelectionUndone(payload) => {
                if let Some(beat) = self.beat_mut(payload.beat_id) {
                    beat.clear_selection();
                }
                self.expanded.insert(payload.beat_id);
            }
            StoryEventKind::BranchesRegenerated(payload) => {
                self.install_branches(payload.beat_id, &payload.branches, true);
            }
            StoryEventKind::IdeaGenerated(payload) => {
                if let Some(beat) = self.beat_mut(payload.beat_id) {
                    beat.generated_idea = Some(payload.idea.clone());
                }
            }
        }
        self.version += 1;

        debug_assert!(
            self.beats.iter().all(|beat| beat.verify_selection().is_ok()),
            "selection invariant broken after {}",
            event.metadata.event_type
        );
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
