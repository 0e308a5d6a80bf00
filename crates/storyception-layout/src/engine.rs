//! Deterministic placement of beats and branches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use storyception_narrative::domain::beat::{Beat, ExpandedSet};
use thiserror::Error;
use tracing::trace;

use crate::graph::{
    EdgeKind, EdgeStroke, LayoutEdge, LayoutGraph, LayoutNode, NodeKind, Position, beat_node_id,
    branch_node_id,
};
use crate::palette::{NEUTRAL, beat_color, branch_color};

/// Placement strategy for beat nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Beats left to right, branches fanned out below.
    #[default]
    Horizontal,
    /// Beats top to bottom, branches fanned out to the side.
    Vertical,
    /// Beats in a near-square grid, branches fanned out below.
    Free,
}

impl LayoutMode {
    pub const ALL: [Self; 3] = [Self::Horizontal, Self::Vertical, Self::Free];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Free => "free",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a layout mode name fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown layout mode: {0}")]
pub struct UnknownLayoutMode(pub String);

impl FromStr for LayoutMode {
    type Err = UnknownLayoutMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownLayoutMode(s.to_owned()))
    }
}

/// Spacing constants, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between neighbouring beats along x.
    pub horizontal_spacing: f64,
    /// Distance between neighbouring beats along y.
    pub vertical_spacing: f64,
    /// y of every beat in horizontal mode.
    pub horizontal_baseline_y: f64,
    /// x of every beat in vertical mode.
    pub vertical_baseline_x: f64,
    /// Branch distance from its beat along the beat axis.
    pub branch_offset: f64,
    /// Branch distance from its beat across the beat axis.
    pub branch_fan: f64,
    /// Gap between sibling branches across the beat axis.
    pub branch_spread: f64,
    /// Extra offset per sibling along the beat axis.
    pub branch_stagger: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 420.0,
            vertical_spacing: 280.0,
            horizontal_baseline_y: 200.0,
            vertical_baseline_x: 400.0,
            branch_offset: 200.0,
            branch_fan: 300.0,
            branch_spread: 280.0,
            branch_stagger: 40.0,
        }
    }
}

/// Lays out `beats` with the default spacing.
#[must_use]
pub fn layout(beats: &[Beat], expanded: &ExpandedSet, mode: LayoutMode) -> LayoutGraph {
    layout_with(beats, expanded, mode, &LayoutConfig::default())
}

/// Lays out `beats` under `mode`.
///
/// Every beat becomes a node, consecutive beats are joined by a sequence
/// edge colored by the earlier beat, and beats in `expanded` that have
/// branches get one node and one edge per branch. The result depends only
/// on the arguments.
#[must_use]
pub fn layout_with(
    beats: &[Beat],
    expanded: &ExpandedSet,
    mode: LayoutMode,
    config: &LayoutConfig,
) -> LayoutGraph {
    let total = beats.len();
    let mut graph = LayoutGraph::default();
    if total == 0 {
        return graph;
    }

    let columns = grid_columns(total);
    for (index, beat) in beats.iter().enumerate() {
        let position = beat_position(index, columns, mode, config);
        let color = beat_color(index, total);
        let is_expanded = expanded.contains(&beat.id);
        let chosen = beat.selected_branch();

        graph.nodes.push(LayoutNode {
            id: beat_node_id(beat.id),
            kind: NodeKind::Beat,
            position,
            color,
            beat_id: beat.id,
            branch_id: None,
            selected: chosen.is_some(),
            locked: false,
            expanded: is_expanded,
        });

        if let Some(next) = beats.get(index + 1) {
            graph.edges.push(LayoutEdge {
                id: format!("edge-{}-{}", beat.id, next.id),
                source: beat_node_id(beat.id),
                target: beat_node_id(next.id),
                kind: EdgeKind::Sequence,
                color,
                animated: chosen.is_some(),
                locked: false,
                label: chosen.map(|branch| branch.short_title().to_owned()),
                stroke: EdgeStroke::EMPHASIZED,
            });
        }

        if is_expanded && !beat.branches().is_empty() {
            push_branches(&mut graph, beat, position, mode, config);
        }
    }

    trace!(
        %mode,
        beats = total,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "computed layout"
    );
    graph
}

fn push_branches(
    graph: &mut LayoutGraph,
    beat: &Beat,
    anchor: Position,
    mode: LayoutMode,
    config: &LayoutConfig,
) {
    let branches = beat.branches();
    let count = branches.len();
    let has_selection = beat.selected_branch_id().is_some();

    for (index, branch) in branches.iter().enumerate() {
        let node_id = branch_node_id(beat.id, branch.id);
        let path_color = branch_color(index);
        let selected = branch.is_selected();
        let locked = has_selection && !selected;

        graph.nodes.push(LayoutNode {
            id: node_id.clone(),
            kind: NodeKind::Branch,
            position: branch_position(anchor, index, count, mode, config),
            color: path_color,
            beat_id: beat.id,
            branch_id: Some(branch.id),
            selected,
            locked,
            expanded: false,
        });

        let (color, stroke) = if selected {
            (path_color, EdgeStroke::EMPHASIZED)
        } else if locked {
            (NEUTRAL, EdgeStroke::LOCKED)
        } else {
            (path_color, EdgeStroke::OPEN)
        };

        graph.edges.push(LayoutEdge {
            id: format!("branch-edge-{}-{}", beat.id, branch.id),
            source: beat_node_id(beat.id),
            target: node_id,
            kind: EdgeKind::Branch,
            color,
            animated: !locked,
            locked,
            label: None,
            stroke,
        });
    }
}

/// Smallest column count whose square holds `total` beats.
fn grid_columns(total: usize) -> usize {
    let mut columns = 1;
    while columns * columns < total {
        columns += 1;
    }
    columns
}

#[allow(clippy::cast_precision_loss)]
fn units(n: usize) -> f64 {
    n as f64
}

fn beat_position(index: usize, columns: usize, mode: LayoutMode, config: &LayoutConfig) -> Position {
    match mode {
        LayoutMode::Horizontal => Position::new(
            units(index) * config.horizontal_spacing,
            config.horizontal_baseline_y,
        ),
        LayoutMode::Vertical => Position::new(
            config.vertical_baseline_x,
            units(index) * config.vertical_spacing,
        ),
        LayoutMode::Free => Position::new(
            units(index % columns) * config.horizontal_spacing,
            units(index / columns) * config.vertical_spacing,
        ),
    }
}

/// Siblings are centred on the beat across the beat axis and nudged along
/// it by their index so their edges do not overlap.
fn branch_position(
    anchor: Position,
    index: usize,
    count: usize,
    mode: LayoutMode,
    config: &LayoutConfig,
) -> Position {
    let spread = (units(index) - units(count.saturating_sub(1)) / 2.0) * config.branch_spread;
    let along = config.branch_offset + units(index) * config.branch_stagger;
    let across = config.branch_fan + spread;

    match mode {
        LayoutMode::Horizontal | LayoutMode::Free => {
            Position::new(anchor.x + along, anchor.y + across)
        }
        LayoutMode::Vertical => Position::new(anchor.x + across, anchor.y + along),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beats(n: u32) -> Vec<Beat> {
        (1..=n)
            .map(|id| Beat::new(id, format!("beat{id}"), format!("{id}. BEAT"), "", 5.0, 10.0))
            .collect()
    }

    fn beat_with_branches(id: u32, count: u32) -> Beat {
        let branches: Vec<serde_json::Value> = (1..=count)
            .map(|b| {
                serde_json::json!({
                    "id": b,
                    "title": format!("PATH {b}: OPTION"),
                    "type": "discovery",
                    "description": "",
                    "durationDeltaSecs": 8,
                    "selected": false,
                })
            })
            .collect();
        serde_json::from_value(serde_json::json!({
            "id": id,
            "beatId": "crisis",
            "label": format!("{id}. CRISIS"),
            "description": "",
            "durationSecs": 5.0,
            "percentOfTotal": 10.0,
            "branches": branches,
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_beat_list_yields_empty_graph() {
        let graph = layout(&[], &ExpandedSet::new(), LayoutMode::Horizontal);

        assert!(graph.is_empty());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_single_beat_has_no_edges() {
        let graph = layout(&beats(1), &ExpandedSet::new(), LayoutMode::Vertical);

        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.nodes[0].position, Position::new(400.0, 0.0));
    }

    #[test]
    fn test_horizontal_places_beats_on_a_row() {
        let graph = layout(&beats(3), &ExpandedSet::new(), LayoutMode::Horizontal);

        let positions: Vec<Position> = graph.nodes.iter().map(|n| n.position).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0.0, 200.0),
                Position::new(420.0, 200.0),
                Position::new(840.0, 200.0),
            ]
        );
    }

    #[test]
    fn test_vertical_stacks_beats() {
        let graph = layout(&beats(3), &ExpandedSet::new(), LayoutMode::Vertical);

        assert_eq!(graph.nodes[2].position, Position::new(400.0, 560.0));
    }

    #[test]
    fn test_free_uses_near_square_grid() {
        let graph = layout(&beats(10), &ExpandedSet::new(), LayoutMode::Free);

        // ceil(sqrt(10)) = 4 columns.
        assert_eq!(graph.nodes[3].position, Position::new(1260.0, 0.0));
        assert_eq!(graph.nodes[4].position, Position::new(0.0, 280.0));
        assert_eq!(graph.nodes[9].position, Position::new(420.0, 560.0));
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(1), 1);
        assert_eq!(grid_columns(4), 2);
        assert_eq!(grid_columns(5), 3);
        assert_eq!(grid_columns(12), 4);
        assert_eq!(grid_columns(19), 5);
    }

    #[test]
    fn test_collapsed_beat_hides_branches() {
        let graph = layout(&[beat_with_branches(1, 3)], &ExpandedSet::new(), LayoutMode::Horizontal);

        assert_eq!(graph.nodes_of(NodeKind::Branch).count(), 0);
        assert_eq!(graph.edges_of(EdgeKind::Branch).count(), 0);
    }

    #[test]
    fn test_horizontal_branches_fan_below_beat() {
        let expanded = ExpandedSet::from([1]);

        let graph = layout(&[beat_with_branches(1, 3)], &expanded, LayoutMode::Horizontal);

        let positions: Vec<Position> = graph.nodes_of(NodeKind::Branch).map(|n| n.position).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(200.0, 220.0),
                Position::new(240.0, 500.0),
                Position::new(280.0, 780.0),
            ]
        );
    }

    #[test]
    fn test_vertical_branches_fan_to_the_side() {
        let expanded = ExpandedSet::from([1]);

        let graph = layout(&[beat_with_branches(1, 2)], &expanded, LayoutMode::Vertical);

        let positions: Vec<Position> = graph.nodes_of(NodeKind::Branch).map(|n| n.position).collect();
        assert_eq!(
            positions,
            vec![Position::new(560.0, 200.0), Position::new(840.0, 240.0)]
        );
    }

    #[test]
    fn test_free_branches_use_horizontal_rule() {
        let mut list = beats(4);
        list[3] = beat_with_branches(4, 1);
        let expanded = ExpandedSet::from([4]);

        let graph = layout(&list, &expanded, LayoutMode::Free);

        // Beat 4 sits at column 1, row 1 of a 2-column grid.
        let branch = graph.node("branch-4-1").unwrap();
        assert_eq!(branch.position, Position::new(620.0, 580.0));
    }

    #[test]
    fn test_open_branch_edges_are_dashed_and_colored_by_path() {
        let expanded = ExpandedSet::from([1]);

        let graph = layout(&[beat_with_branches(1, 3)], &expanded, LayoutMode::Horizontal);

        let edges: Vec<&LayoutEdge> = graph.edges_of(EdgeKind::Branch).collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].id, "branch-edge-1-1");
        assert_eq!(edges[0].source, "beat-1");
        assert_eq!(edges[0].target, "branch-1-1");
        assert_eq!(edges[1].color.hex, "#2dd4bf");
        assert!(edges.iter().all(|e| e.stroke == EdgeStroke::OPEN && e.animated && !e.locked));
    }

    #[test]
    fn test_custom_config_changes_spacing() {
        let config = LayoutConfig {
            horizontal_spacing: 100.0,
            horizontal_baseline_y: 0.0,
            ..LayoutConfig::default()
        };

        let graph = layout_with(&beats(2), &ExpandedSet::new(), LayoutMode::Horizontal, &config);

        assert_eq!(graph.nodes[1].position, Position::new(100.0, 0.0));
    }

    #[test]
    fn test_layout_mode_parses_and_displays() {
        assert_eq!("free".parse::<LayoutMode>(), Ok(LayoutMode::Free));
        assert_eq!(LayoutMode::Vertical.to_string(), "vertical");
        assert_eq!(
            "diagonal".parse::<LayoutMode>(),
            Err(UnknownLayoutMode("diagonal".to_owned()))
        );
    }
}
