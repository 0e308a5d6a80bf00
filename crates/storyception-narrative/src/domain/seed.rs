//! Initial beat list for a new story.

use storyception_archetypes::Archetype;
use storyception_core::id::BeatId;

use super::beat::Beat;

/// Default total runtime a story's beat durations are scaled to.
pub const DEFAULT_TOTAL_RUNTIME_SECS: f64 = 90.0;

/// Builds one beat per archetype beat, ids from 1, each lasting its runtime
/// share of `total_runtime_secs` (rounded to a tenth of a second).
#[must_use]
pub fn seed_beats(archetype: Archetype, total_runtime_secs: f64) -> Vec<Beat> {
    archetype
        .beats()
        .iter()
        .zip(1..)
        .map(|(structure, id): (_, BeatId)| {
            let percent = f64::from(structure.percent);
            let duration = (percent / 100.0 * total_runtime_secs * 10.0).round() / 10.0;
            Beat::new(
                id,
                structure.id,
                structure.label,
                structure.description,
                duration,
                percent,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_beats_follows_archetype_structure() {
        let beats = seed_beats(Archetype::HeroJourney, DEFAULT_TOTAL_RUNTIME_SECS);

        assert_eq!(beats.len(), 12);
        assert_eq!(beats[0].id, 1);
        assert_eq!(beats[0].beat_id, "ordinaryWorld");
        assert_eq!(beats[5].id, 6);
        assert_eq!(beats[5].beat_id, "testsAllies");
        assert_eq!(beats[11].label, "12. RETURN WITH THE ELIXIR");
        assert!(beats.iter().all(|b| !b.has_generated_branches()));
    }

    #[test]
    fn test_seed_beats_scales_durations_to_runtime() {
        let beats = seed_beats(Archetype::HeroJourney, 90.0);

        assert!((beats[5].duration_secs - 13.5).abs() < 1e-9);
        assert!((beats[1].duration_secs - 3.6).abs() < 1e-9);
        let total: f64 = beats.iter().map(|b| b.duration_secs).sum();
        assert!((total - 90.0).abs() < 0.5);
    }

    #[test]
    fn test_seed_beats_percentages_sum_to_one_hundred() {
        for archetype in Archetype::ALL {
            let total: f64 = seed_beats(archetype, 60.0)
                .iter()
                .map(|b| b.percent_of_total)
                .sum();
            assert!((total - 100.0).abs() <= 1.0, "{archetype}: {total}");
        }
    }
}
