//! Storyception — archetype beat structures and branching weight tables.
//!
//! Six built-in narrative archetypes, each an ordered list of named beats with
//! a share of total runtime, and a parallel static weight table that says how
//! strongly each beat should offer alternative paths. Everything here is
//! immutable data plus lookup functions.

pub mod archetype;
pub mod structure;
pub mod weights;

pub use archetype::Archetype;
pub use structure::BeatStructure;
pub use weights::{BeatWeight, get_weight, is_loopable, loopable_beat};
