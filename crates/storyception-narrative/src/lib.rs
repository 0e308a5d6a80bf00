//! Storyception — beats, branch generation and branch selection.
//!
//! Responsible for the beat/branch data model, producing branch options for
//! a beat from its archetype weight, and the per-beat selection lifecycle
//! (collapsed, expanded, one branch selected with its siblings locked).

pub mod application;
pub mod domain;
