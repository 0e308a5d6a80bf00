//! Domain error types.

use thiserror::Error;

use crate::id::{BeatId, BranchId};

/// Coarse classification of a [`StoryError`].
///
/// Every error in this workspace is a rejected request, never a transient
/// fault, so there is no retryable class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An unknown beat, branch, archetype or weight entry was referenced.
    NotFound,
    /// The beat is not in a state that allows the requested transition.
    InvalidState,
    /// Story data broke the single-selection invariant.
    InvariantViolation,
    /// Event payload encoding or decoding failed.
    Infrastructure,
}

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryError {
    /// No beat with this id exists in the story.
    #[error("beat not found: {0}")]
    BeatNotFound(BeatId),

    /// The beat exists but has no branch with this id.
    #[error("branch {branch_id} not found on beat {beat_id}")]
    BranchNotFound {
        /// The beat that was searched.
        beat_id: BeatId,
        /// The branch id that was requested.
        branch_id: BranchId,
    },

    /// The weight table has no entry for this (archetype, beat) pair.
    #[error("no weight entry for beat `{beat_id}` in archetype `{archetype}`")]
    WeightNotFound {
        /// Archetype key.
        archetype: String,
        /// Archetype-scoped beat identifier.
        beat_id: String,
    },

    /// The archetype key or index is not one of the built-in archetypes.
    #[error("archetype not found: {0}")]
    ArchetypeNotFound(String),

    /// The beat cannot take the requested transition in its current state.
    #[error("invalid state for beat {beat_id}: {reason}")]
    InvalidState {
        /// The beat the request targeted.
        beat_id: BeatId,
        /// What was missing.
        reason: String,
    },

    /// More than one branch selected, or the selected id disagrees with the
    /// branch flags.
    #[error("invariant violation on beat {beat_id}: {detail}")]
    InvariantViolation {
        /// The offending beat.
        beat_id: BeatId,
        /// Description of the contradiction.
        detail: String,
    },

    /// Event payload encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoryError {
    /// Returns the taxonomy class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BeatNotFound(_)
            | Self::BranchNotFound { .. }
            | Self::WeightNotFound { .. }
            | Self::ArchetypeNotFound(_) => ErrorKind::NotFound,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::InvariantViolation { .. } => ErrorKind::InvariantViolation,
            Self::Serialization(_) => ErrorKind::Infrastructure,
        }
    }

    /// Short message suitable for showing to the person editing the story.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BeatNotFound(_) => "no such beat",
            Self::BranchNotFound { .. } => "no such path",
            Self::WeightNotFound { .. } | Self::ArchetypeNotFound(_) => "unknown story structure",
            Self::InvalidState { .. } => "no paths have been generated for this beat yet",
            Self::InvariantViolation { .. } => "story data is inconsistent",
            Self::Serialization(_) => "story data could not be read",
        }
    }
}
