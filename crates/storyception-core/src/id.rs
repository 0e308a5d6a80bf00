//! Identifier types shared across crates.

/// Sequence identifier of a beat within a story (1-based, stable for the
/// lifetime of the story).
pub type BeatId = u32;

/// Identifier of a branch option. Unique within its parent beat; the story
/// aggregate additionally never reuses an id once it has been handed out.
pub type BranchId = u32;
