//! Memoized layout for a single story.

use storyception_core::aggregate::AggregateRoot;
use storyception_narrative::domain::aggregates::Story;
use storyception_narrative::domain::beat::ExpandedSet;
use tracing::trace;
use uuid::Uuid;

use crate::engine::{LayoutConfig, LayoutMode, layout_with};
use crate::graph::LayoutGraph;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    story_id: Uuid,
    version: u64,
    expanded: ExpandedSet,
    mode: LayoutMode,
}

/// Keeps the last computed layout and reuses it until the story's version,
/// expanded set or the requested mode changes.
#[derive(Debug, Default)]
pub struct LayoutCache {
    config: LayoutConfig,
    entry: Option<(CacheKey, LayoutGraph)>,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the layout of `story` under `mode`, computing it only if the
    /// cached one is stale.
    pub fn get_or_compute(&mut self, story: &Story, mode: LayoutMode) -> &LayoutGraph {
        let key = CacheKey {
            story_id: story.id,
            version: story.version(),
            expanded: story.expanded().clone(),
            mode,
        };

        let entry = match self.entry.take() {
            Some((cached, graph)) if cached == key => {
                self.hits += 1;
                trace!(story_id = %key.story_id, version = key.version, %mode, "layout cache hit");
                (cached, graph)
            }
            _ => {
                self.misses += 1;
                trace!(story_id = %key.story_id, version = key.version, %mode, "layout cache miss");
                let graph = layout_with(story.beats(), story.expanded(), mode, &self.config);
                (key, graph)
            }
        };

        &self.entry.insert(entry).1
    }

    /// Drops the cached layout.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use storyception_archetypes::Archetype;
    use storyception_narrative::domain::aggregates::StoryConfig;
    use storyception_test_support::{MockRng, correlation_id, fixed_clock};

    use super::*;
    use crate::engine::layout;

    fn story() -> Story {
        Story::seeded(Uuid::new_v4(), Archetype::HeroJourney, StoryConfig::default())
    }

    #[test]
    fn test_repeat_request_is_served_from_cache() {
        // Arrange
        let story = story();
        let mut cache = LayoutCache::default();

        // Act
        let first = cache.get_or_compute(&story, LayoutMode::Horizontal).clone();
        let second = cache.get_or_compute(&story, LayoutMode::Horizontal).clone();

        // Assert
        assert_eq!(first, second);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_state_change_recomputes() {
        let mut story = story();
        let mut cache = LayoutCache::default();
        cache.get_or_compute(&story, LayoutMode::Horizontal);

        story
            .toggle_expand(6, correlation_id(), &fixed_clock(), &mut MockRng)
            .unwrap();
        let graph = cache.get_or_compute(&story, LayoutMode::Horizontal);

        assert_eq!(graph.nodes.len(), 15);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_mode_change_recomputes() {
        let story = story();
        let mut cache = LayoutCache::default();
        cache.get_or_compute(&story, LayoutMode::Horizontal);

        let graph = cache.get_or_compute(&story, LayoutMode::Vertical).clone();

        assert_eq!(graph, layout(story.beats(), story.expanded(), LayoutMode::Vertical));
        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let story = story();
        let mut cache = LayoutCache::default();
        cache.get_or_compute(&story, LayoutMode::Free);

        cache.invalidate();
        cache.get_or_compute(&story, LayoutMode::Free);

        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_custom_config_is_used() {
        let story = story();
        let config = LayoutConfig {
            horizontal_baseline_y: 0.0,
            ..LayoutConfig::default()
        };
        let mut cache = LayoutCache::new(config);

        let graph = cache.get_or_compute(&story, LayoutMode::Horizontal);

        assert!(graph.nodes.iter().all(|n| n.position.y == 0.0));
    }
}
