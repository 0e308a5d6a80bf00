//! Storyception — color assignment and graph layout.
//!
//! Turns a story's beat list, its expanded set and a layout mode into a
//! positioned graph of beat nodes, branch nodes and edges for an external
//! renderer. Layout is a pure function of its inputs.

pub mod cache;
pub mod engine;
pub mod graph;
pub mod palette;

pub use cache::LayoutCache;
pub use engine::{LayoutConfig, LayoutMode, UnknownLayoutMode, layout, layout_with};
pub use graph::{EdgeKind, EdgeStroke, LayoutEdge, LayoutGraph, LayoutNode, NodeKind, Position};
pub use palette::{ColorToken, beat_color, beat_hex, branch_color};
