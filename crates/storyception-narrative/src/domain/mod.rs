//! Domain model for the narrative context.

pub mod aggregates;
pub mod beat;
pub mod catalog;
pub mod commands;
pub mod events;
pub mod generator;
pub mod seed;
