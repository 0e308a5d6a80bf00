//! Storyception Core — shared domain abstractions.
//!
//! This crate defines the traits, identifiers and error taxonomy that the
//! archetype, narrative and layout crates build on. It holds no story data
//! and performs no I/O.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod id;
pub mod rng;
