//! Branch option generation.

use serde::{Deserialize, Serialize};
use storyception_archetypes::BeatWeight;
use storyception_core::id::BranchId;
use storyception_core::rng::DeterministicRng;
use tracing::trace;

use super::beat::{Beat, BranchOption};
use super::catalog::{BranchType, pick};

/// Number of options produced when no weight decides otherwise.
pub const DEFAULT_BRANCH_COUNT: usize = 3;

const PATH_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];
const BASE_DURATION_SECS: u32 = 8;
const DURATION_STEP_SECS: u32 = 2;

/// How many options a generation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchPolicy {
    /// Always [`DEFAULT_BRANCH_COUNT`] options, whatever the beat's weight.
    AlwaysThree,
    /// Ask [`branch_count`] for every beat that has a weight; beats missing
    /// from the weight table get [`DEFAULT_BRANCH_COUNT`].
    #[default]
    WeightDriven,
}

/// Weight-sensitive option count: 3 at weight ≥ 0.8, 2 at ≥ 0.5, 0 at 0.
/// Anything in between yields 2 with probability `weight`, otherwise 0.
pub fn branch_count(weight: f64, rng: &mut dyn DeterministicRng) -> usize {
    if weight >= 0.8 {
        3
    } else if weight >= 0.5 {
        2
    } else if weight > 0.0 {
        if rng.next_f64() < weight { 2 } else { 0 }
    } else {
        0
    }
}

/// Produces the ordered option set for a beat.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchGenerator {
    policy: BranchPolicy,
}

impl BranchGenerator {
    #[must_use]
    pub fn new(policy: BranchPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> BranchPolicy {
        self.policy
    }

    /// Decides how many options to offer under this generator's policy.
    pub fn count_for(&self, weight: Option<&BeatWeight>, rng: &mut dyn DeterministicRng) -> usize {
        match (self.policy, weight) {
            (BranchPolicy::AlwaysThree, _) | (BranchPolicy::WeightDriven, None) => {
                DEFAULT_BRANCH_COUNT
            }
            (BranchPolicy::WeightDriven, Some(weight)) => branch_count(weight.weight, rng),
        }
    }

    /// Generates options for `beat`.
    ///
    /// Types are taken round-robin from [`BranchType::CATALOG`] starting at
    /// `type_offset`; ids run upward from `first_id`. Each option's
    /// description and idea are drawn independently from its type's pool.
    pub fn generate(
        &self,
        beat: &Beat,
        weight: Option<&BeatWeight>,
        type_offset: usize,
        first_id: BranchId,
        rng: &mut dyn DeterministicRng,
    ) -> Vec<BranchOption> {
        let count = self.count_for(weight, rng);
        let mut options = Vec::with_capacity(count);
        let mut duration = BASE_DURATION_SECS;

        for (position, id) in (0..count).zip(first_id..) {
            let branch_type = BranchType::nth(type_offset + position);
            let templates = branch_type.templates();
            let description = pick(templates, rng).to_owned();
            let idea = pick(templates, rng).to_owned();

            options.push(BranchOption {
                id,
                title: format!(
                    "PATH {}: {}",
                    PATH_LETTERS[position % PATH_LETTERS.len()],
                    branch_type.heading()
                ),
                branch_type,
                description,
                duration_delta_secs: duration,
                selected: false,
                generated_idea: Some(idea),
                image_prompt: Some(format!("Cinematic scene: {}", templates[0].to_lowercase())),
                preview_frames: Vec::new(),
            });
            duration += DURATION_STEP_SECS;
        }

        trace!(beat_id = beat.id, count, type_offset, "generated branch options");
        options
    }
}

#[cfg(test)]
mod tests {
    use storyception_archetypes::{Archetype, get_weight};
    use storyception_test_support::{MockRng, SequenceRng};

    use super::*;

    fn tests_allies() -> Beat {
        Beat::new(6, "testsAllies", "6. TESTS, ALLIES, ENEMIES", "", 13.5, 15.0)
    }

    #[test]
    fn test_branch_count_thresholds() {
        let mut rng = MockRng;

        assert_eq!(branch_count(1.0, &mut rng), 3);
        assert_eq!(branch_count(0.8, &mut rng), 3);
        assert_eq!(branch_count(0.79, &mut rng), 2);
        assert_eq!(branch_count(0.5, &mut rng), 2);
        assert_eq!(branch_count(0.0, &mut rng), 0);
    }

    #[test]
    fn test_branch_count_low_weight_uses_weight_as_probability() {
        let mut rng = SequenceRng::new(vec![]).with_floats(vec![0.29, 0.3, 0.95]);

        assert_eq!(branch_count(0.3, &mut rng), 2);
        assert_eq!(branch_count(0.3, &mut rng), 0);
        assert_eq!(branch_count(0.3, &mut rng), 0);
    }

    #[test]
    fn test_always_three_ignores_weight() {
        let generator = BranchGenerator::new(BranchPolicy::AlwaysThree);
        let zero = get_weight(Archetype::HeroJourney, "ordinaryWorld").unwrap();

        let options = generator.generate(&tests_allies(), Some(zero), 0, 1, &mut MockRng);

        assert_eq!(options.len(), 3);
    }

    #[test]
    fn test_weight_driven_follows_branch_count() {
        let generator = BranchGenerator::default();
        let mut rng = MockRng;
        let refusal = get_weight(Archetype::HeroJourney, "refusal").unwrap();
        let ordinary = get_weight(Archetype::HeroJourney, "ordinaryWorld").unwrap();

        assert_eq!(generator.generate(&tests_allies(), Some(refusal), 0, 1, &mut rng).len(), 2);
        assert!(generator.generate(&tests_allies(), Some(ordinary), 0, 1, &mut rng).is_empty());
    }

    #[test]
    fn test_weight_driven_without_weight_uses_default_count() {
        let generator = BranchGenerator::new(BranchPolicy::WeightDriven);

        let options = generator.generate(&tests_allies(), None, 0, 1, &mut MockRng);

        assert_eq!(options.len(), DEFAULT_BRANCH_COUNT);
    }

    #[test]
    fn test_first_generation_takes_first_three_catalog_types() {
        let generator = BranchGenerator::default();
        let weight = get_weight(Archetype::HeroJourney, "testsAllies").unwrap();

        let options = generator.generate(&tests_allies(), Some(weight), 0, 10, &mut MockRng);

        let types: Vec<BranchType> = options.iter().map(|o| o.branch_type).collect();
        assert_eq!(
            types,
            vec![BranchType::Confrontation, BranchType::Discovery, BranchType::Sacrifice]
        );
        let ids: Vec<BranchId> = options.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
        assert_eq!(options[0].title, "PATH A: DIRECT CONFRONTATION");
        assert_eq!(options[1].title, "PATH B: HIDDEN DISCOVERY");
        assert_eq!(options[2].title, "PATH C: COSTLY SACRIFICE");
        let durations: Vec<u32> = options.iter().map(|o| o.duration_delta_secs).collect();
        assert_eq!(durations, vec![8, 10, 12]);
        assert!(options.iter().all(|o| !o.is_selected()));
    }

    #[test]
    fn test_offset_rotates_catalog() {
        let generator = BranchGenerator::new(BranchPolicy::AlwaysThree);

        let options = generator.generate(&tests_allies(), None, 2, 1, &mut MockRng);

        let types: Vec<BranchType> = options.iter().map(|o| o.branch_type).collect();
        assert_eq!(
            types,
            vec![BranchType::Sacrifice, BranchType::Deception, BranchType::Confrontation]
        );
        assert_eq!(options[0].title, "PATH A: COSTLY SACRIFICE");
    }

    #[test]
    fn test_templates_come_from_injected_rng() {
        let generator = BranchGenerator::new(BranchPolicy::AlwaysThree);
        let mut rng = SequenceRng::new(vec![1, 2, 0, 0, 2, 1]);

        let options = generator.generate(&tests_allies(), None, 0, 1, &mut rng);

        assert_eq!(options[0].description, BranchType::Confrontation.templates()[1]);
        assert_eq!(
            options[0].generated_idea.as_deref(),
            Some(BranchType::Confrontation.templates()[2])
        );
        assert_eq!(options[1].description, BranchType::Discovery.templates()[0]);
        assert_eq!(options[2].description, BranchType::Sacrifice.templates()[2]);
        assert_eq!(rng.draws(), 6);
    }

    #[test]
    fn test_image_prompt_uses_first_template() {
        let generator = BranchGenerator::new(BranchPolicy::AlwaysThree);

        let options = generator.generate(&tests_allies(), None, 0, 1, &mut MockRng);

        assert_eq!(
            options[1].image_prompt.as_deref(),
            Some("Cinematic scene: a secret passage leads to unexpected revelations")
        );
    }
}
