//! Position-derived beat colors and per-path branch colors.

use serde::Serialize;

/// A named color from the shared palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorToken {
    /// Theme role the renderer maps to its own styling (`"primary"`).
    pub role: &'static str,
    /// Opaque color as `#rrggbb`.
    pub hex: &'static str,
    /// Translucent variant for glows and highlights.
    pub glow: &'static str,
}

pub const PRIMARY: ColorToken = ColorToken {
    role: "primary",
    hex: "#22d3ee",
    glow: "rgba(34, 211, 238, 0.3)",
};

pub const ACCENT: ColorToken = ColorToken {
    role: "accent",
    hex: "#2dd4bf",
    glow: "rgba(45, 212, 191, 0.3)",
};

pub const CHART_3: ColorToken = ColorToken {
    role: "chart-3",
    hex: "#facc15",
    glow: "rgba(250, 204, 21, 0.3)",
};

pub const CHART_4: ColorToken = ColorToken {
    role: "chart-4",
    hex: "#f472b6",
    glow: "rgba(244, 114, 182, 0.3)",
};

/// Color for edges to locked branches.
pub const NEUTRAL: ColorToken = ColorToken {
    role: "muted",
    hex: "#3f3f46",
    glow: "rgba(63, 63, 70, 0.3)",
};

const QUARTILES: [ColorToken; 4] = [PRIMARY, ACCENT, CHART_3, CHART_4];
const BRANCH_PATHS: [ColorToken; 3] = [PRIMARY, ACCENT, CHART_3];

/// Color of the beat at `index` in a story of `total` beats, by which
/// quarter of the story it falls in. Lists of one beat (or none) are
/// entirely first quarter.
#[must_use]
pub fn beat_color(index: usize, total: usize) -> ColorToken {
    if total <= 1 {
        return QUARTILES[0];
    }
    // index / (total - 1) against 0.25, 0.5 and 0.75, in integers.
    let scaled = index.saturating_mul(4);
    let span = total - 1;
    let quartile = if scaled < span {
        0
    } else if scaled < span.saturating_mul(2) {
        1
    } else if scaled < span.saturating_mul(3) {
        2
    } else {
        3
    };
    QUARTILES[quartile]
}

/// Color of the branch at `branch_index`; paths A, B, C, then A again.
#[must_use]
pub fn branch_color(branch_index: usize) -> ColorToken {
    BRANCH_PATHS[branch_index % BRANCH_PATHS.len()]
}

/// Shorthand for the hex of [`beat_color`], for minimaps and timelines.
#[must_use]
pub fn beat_hex(index: usize, total: usize) -> &'static str {
    beat_color(index, total).hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beat_color_partitions_into_quartiles() {
        // Twelve beats: positions 0/11 .. 11/11.
        let roles: Vec<&str> = (0..12).map(|i| beat_color(i, 12).role).collect();

        assert_eq!(
            roles,
            vec![
                "primary", "primary", "primary", // 0.00 0.09 0.18
                "accent", "accent", "accent", // 0.27 0.36 0.45
                "chart-3", "chart-3", "chart-3", // 0.55 0.64 0.73
                "chart-4", "chart-4", "chart-4", // 0.82 0.91 1.00
            ]
        );
    }

    #[test]
    fn test_beat_color_boundaries_belong_to_upper_quartile() {
        // Five beats: positions 0, 0.25, 0.5, 0.75, 1.
        assert_eq!(beat_color(0, 5), PRIMARY);
        assert_eq!(beat_color(1, 5), ACCENT);
        assert_eq!(beat_color(2, 5), CHART_3);
        assert_eq!(beat_color(3, 5), CHART_4);
        assert_eq!(beat_color(4, 5), CHART_4);
    }

    #[test]
    fn test_beat_color_single_and_empty_lists_are_first_quartile() {
        assert_eq!(beat_color(0, 1), PRIMARY);
        assert_eq!(beat_color(0, 0), PRIMARY);
        assert_eq!(beat_color(7, 1), PRIMARY);
    }

    #[test]
    fn test_beat_color_past_the_end_is_last_quartile() {
        assert_eq!(beat_color(30, 4), CHART_4);
        assert_eq!(beat_color(usize::MAX, 4), CHART_4);
    }

    #[test]
    fn test_branch_color_cycles_three_paths() {
        assert_eq!(branch_color(0), PRIMARY);
        assert_eq!(branch_color(1), ACCENT);
        assert_eq!(branch_color(2), CHART_3);
        assert_eq!(branch_color(3), PRIMARY);
        assert_eq!(branch_color(7), ACCENT);
    }

    #[test]
    fn test_beat_hex_matches_token() {
        assert_eq!(beat_hex(11, 12), "#f472b6");
        assert_eq!(beat_hex(0, 12), "#22d3ee");
    }
}
