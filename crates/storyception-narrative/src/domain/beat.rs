//! Beats, branch options and the per-beat selection state.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use storyception_core::error::StoryError;
use storyception_core::id::{BeatId, BranchId};

use super::catalog::BranchType;

/// Beats whose branches are currently shown. Owned by the caller and passed
/// explicitly to anything that needs it; ordered so iteration is stable.
pub type ExpandedSet = BTreeSet<BeatId>;

/// One alternative continuation offered at a beat.
///
/// Content is fixed once generated; only `selected` changes afterwards, and
/// only through the owning [`Beat`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchOption {
    /// Identifier, unique within the parent beat.
    pub id: BranchId,
    /// Full title, `"PATH B: HIDDEN DISCOVERY"`.
    pub title: String,
    /// Narrative type tag.
    #[serde(rename = "type")]
    pub branch_type: BranchType,
    /// One-line description of the continuation.
    pub description: String,
    /// Seconds this path adds to the runtime.
    pub duration_delta_secs: u32,
    pub(crate) selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_idea: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    /// Preview frame URLs supplied by the image collaborator.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preview_frames: Vec<String>,
}

impl BranchOption {
    /// Whether this branch is the chosen one for its beat.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// The title without its `PATH X: ` prefix, used for edge labels.
    #[must_use]
    pub fn short_title(&self) -> &str {
        self.title
            .split_once(": ")
            .map_or(self.title.as_str(), |(_, rest)| rest)
    }

    /// Runtime delta as displayed, `"+10s"`.
    #[must_use]
    pub fn duration_label(&self) -> String {
        format!("+{}s", self.duration_delta_secs)
    }
}

/// The selection lifecycle of a beat, as a single tagged value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BeatState {
    /// Branches hidden and nothing chosen.
    Collapsed,
    /// Branches visible, none chosen.
    Expanded,
    /// One branch chosen; every sibling is locked.
    Selected {
        /// The chosen branch.
        branch_id: BranchId,
    },
}

/// One narrative unit in the archetype's fixed sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beat {
    /// Sequence id within the story.
    pub id: BeatId,
    /// Archetype-scoped identifier (`"testsAllies"`), key into the weight table.
    pub beat_id: String,
    pub label: String,
    pub description: String,
    pub duration_secs: f64,
    pub percent_of_total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_idea: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) branches: Option<Vec<BranchOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) selected_branch_id: Option<BranchId>,
    /// How many times the branch set has been regenerated.
    #[serde(default)]
    pub(crate) regenerations: u32,
}

impl Beat {
    /// Creates a beat with no branches.
    #[must_use]
    pub fn new(
        id: BeatId,
        beat_id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        duration_secs: f64,
        percent_of_total: f64,
    ) -> Self {
        Self {
            id,
            beat_id: beat_id.into(),
            label: label.into(),
            description: description.into(),
            duration_secs,
            percent_of_total,
            generated_idea: None,
            branches: None,
            selected_branch_id: None,
            regenerations: 0,
        }
    }

    /// The current branch options, empty if none were generated.
    #[must_use]
    pub fn branches(&self) -> &[BranchOption] {
        self.branches.as_deref().unwrap_or_default()
    }

    /// Whether branch generation has run for this beat. A generation that
    /// produced zero options still counts.
    #[must_use]
    pub fn has_generated_branches(&self) -> bool {
        self.branches.is_some()
    }

    #[must_use]
    pub fn branch(&self, branch_id: BranchId) -> Option<&BranchOption> {
        self.branches().iter().find(|branch| branch.id == branch_id)
    }

    #[must_use]
    pub fn selected_branch_id(&self) -> Option<BranchId> {
        self.selected_branch_id
    }

    #[must_use]
    pub fn selected_branch(&self) -> Option<&BranchOption> {
        self.selected_branch_id.and_then(|id| self.branch(id))
    }

    /// Position of the branch within this beat's options.
    #[must_use]
    pub fn branch_index(&self, branch_id: BranchId) -> Option<usize> {
        self.branches().iter().position(|branch| branch.id == branch_id)
    }

    #[must_use]
    pub fn regenerations(&self) -> u32 {
        self.regenerations
    }

    /// Short timeline tag for the label, `"6. TESTS, ALLIES, ENEMIES"` → `"6_TAE"`.
    #[must_use]
    pub fn abbreviation(&self) -> String {
        abbreviate_label(&self.label)
    }

    /// Replaces the branch set wholesale, forfeiting any selection.
    pub(crate) fn replace_branches(&mut self, branches: Vec<BranchOption>) {
        self.branches = Some(branches);
        self.selected_branch_id = None;
    }

    /// Marks `branch_id` selected and every sibling unselected. Returns
    /// `false` and leaves the beat untouched if no such branch exists.
    pub(crate) fn mark_selected(&mut self, branch_id: BranchId) -> bool {
        let Some(branches) = self.branches.as_mut() else {
            return false;
        };
        if !branches.iter().any(|branch| branch.id == branch_id) {
            return false;
        }
        for branch in branches.iter_mut() {
            branch.selected = branch.id == branch_id;
        }
        self.selected_branch_id = Some(branch_id);
        true
    }

    pub(crate) fn clear_selection(&mut self) {
        if let Some(branches) = self.branches.as_mut() {
            for branch in branches {
                branch.selected = false;
            }
        }
        self.selected_branch_id = None;
    }

    /// Checks that branch ids are unique and that the selected id and the
    /// per-branch flags agree: at most one flag set, and set exactly on the
    /// branch named by `selected_branch_id`.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::InvariantViolation` describing the first
    /// contradiction found.
    pub fn verify_selection(&self) -> Result<(), StoryError> {
        let violation = |detail: String| StoryError::InvariantViolation {
            beat_id: self.id,
            detail,
        };

        let mut seen = HashSet::new();
        if let Some(duplicate) = self.branches().iter().find(|b| !seen.insert(b.id)) {
            return Err(violation(format!("duplicate branch id {}", duplicate.id)));
        }

        let flagged: Vec<BranchId> = self
            .branches()
            .iter()
            .filter(|branch| branch.selected)
            .map(|branch| branch.id)
            .collect();

        match (self.selected_branch_id, flagged.as_slice()) {
            (None, []) => Ok(()),
            (Some(id), [flag]) if *flag == id => Ok(()),
            (_, [_, _, ..]) => Err(violation(format!(
                "{} branches marked selected",
                flagged.len()
            ))),
            (Some(id), []) => Err(violation(format!(
                "selected branch {id} is not among the marked branches"
            ))),
            (selected, [flag]) => Err(violation(format!(
                "branch {flag} is marked selected but selected branch is {selected:?}"
            ))),
        }
    }
}

const ABBREVIATION_STOP_WORDS: [&str; 7] = ["THE", "OF", "TO", "A", "AN", "AND", "OR"];

/// Abbreviates a numbered beat label for compact timelines.
///
/// `"N. WORDS…"` (any spacing after the dot) becomes `N_` followed by the
/// first letters (at most three) of the words that are not stop words.
/// Labels without a number prefix yield their first six characters,
/// uppercased.
#[must_use]
pub fn abbreviate_label(label: &str) -> String {
    let numbered = label
        .split_once('.')
        .filter(|(number, rest)| {
            !number.is_empty() && !rest.is_empty() && number.chars().all(|c| c.is_ascii_digit())
        })
        .map(|(number, rest)| (number, rest.trim_start()));

    let Some((number, rest)) = numbered else {
        return label.chars().take(6).collect::<String>().to_uppercase();
    };

    let initials: String = rest
        .split_whitespace()
        .filter(|word| !ABBREVIATION_STOP_WORDS.contains(&word.to_uppercase().as_str()))
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(3)
        .collect();

    format!("{number}_{initials}")
}
