//! Positioned graph handed to the renderer.

use serde::Serialize;
use storyception_core::id::{BeatId, BranchId};

use crate::palette::ColorToken;

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Beat,
    Branch,
}

/// One beat or branch placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    /// `"beat-{beat}"` or `"branch-{beat}-{branch}"`.
    pub id: String,
    pub kind: NodeKind,
    pub position: Position,
    pub color: ColorToken,
    /// The beat this node is, or the beat owning this branch.
    pub beat_id: BeatId,
    pub branch_id: Option<BranchId>,
    /// For a branch, whether it is the chosen one. For a beat, whether any of
    /// its branches is chosen.
    pub selected: bool,
    /// A sibling branch is chosen, so this one cannot be.
    pub locked: bool,
    /// For a beat, whether its branches are shown.
    pub expanded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Beat to the following beat.
    Sequence,
    /// Beat to one of its branches.
    Branch,
}

/// Line styling for an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeStroke {
    pub width: f64,
    pub opacity: f64,
    pub dashed: bool,
}

impl EdgeStroke {
    /// Sequence edges and edges to a chosen branch.
    pub const EMPHASIZED: Self = Self {
        width: 4.0,
        opacity: 1.0,
        dashed: false,
    };

    /// Edges to branches of a beat with nothing chosen yet.
    pub const OPEN: Self = Self {
        width: 2.0,
        opacity: 1.0,
        dashed: true,
    };

    /// Edges to locked siblings of a chosen branch.
    pub const LOCKED: Self = Self {
        width: 2.0,
        opacity: 0.3,
        dashed: true,
    };
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    /// `"edge-{from}-{to}"` or `"branch-edge-{beat}-{branch}"`.
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub color: ColorToken,
    pub animated: bool,
    pub locked: bool,
    /// Short title of the source beat's chosen branch, on sequence edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub stroke: EdgeStroke,
}

/// Nodes and edges of a laid-out story, beats in story order with each
/// beat's branches following it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LayoutGraph {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl LayoutGraph {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&LayoutEdge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }

    pub fn edges_of(&self, kind: EdgeKind) -> impl Iterator<Item = &LayoutEdge> {
        self.edges.iter().filter(move |edge| edge.kind == kind)
    }
}

pub(crate) fn beat_node_id(beat_id: BeatId) -> String {
    format!("beat-{beat_id}")
}

pub(crate) fn branch_node_id(beat_id: BeatId, branch_id: BranchId) -> String {
    format!("branch-{beat_id}-{branch_id}")
}
