//! Branching weight tables.
//!
//! A weight is the propensity of a beat to offer alternative paths, from 0.0
//! (never branches) to 1.0 (always branches). Establishing and resolving
//! beats are pinned at 0.0; mid-story turning points score highest. An
//! archetype marks at most one beat loopable: it can be revisited to explore
//! several outcomes without advancing the main sequence.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;
use storyception_core::error::StoryError;

use crate::archetype::Archetype;

/// Static branching record for one (archetype, beat) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeatWeight {
    /// Archetype-scoped beat identifier.
    pub beat_id: &'static str,
    /// Branching propensity in `[0.0, 1.0]`.
    pub weight: f64,
    /// Whether the beat may be revisited to explore more outcomes.
    pub is_loopable: bool,
    /// Why the beat carries this weight.
    pub rationale: &'static str,
}

const fn w(beat_id: &'static str, weight: f64, rationale: &'static str) -> BeatWeight {
    BeatWeight {
        beat_id,
        weight,
        is_loopable: false,
        rationale,
    }
}

const fn looped(beat_id: &'static str, weight: f64, rationale: &'static str) -> BeatWeight {
    BeatWeight {
        beat_id,
        weight,
        is_loopable: true,
        rationale,
    }
}

static HERO_JOURNEY: [BeatWeight; 12] = [
    w("ordinaryWorld", 0.0, "Establishes baseline"),
    w("callToAdventure", 0.5, "Can accept or reject differently"),
    w("refusal", 0.7, "Multiple ways to resist"),
    w("meetingMentor", 0.4, "Different mentor interactions"),
    w("crossingThreshold", 0.6, "Different entry points"),
    looped("testsAllies", 0.9, "Multiple tests to explore"),
    w("approach", 0.5, "Different approaches to danger"),
    w("ordeal", 0.8, "Critical turning point"),
    w("reward", 0.4, "What reward to claim"),
    w("roadBack", 0.6, "Different return paths"),
    w("resurrection", 0.7, "Final test variations"),
    w("returnElixir", 0.0, "Resolution"),
];

static SAVE_THE_CAT: [BeatWeight; 15] = [
    w("openingImage", 0.0, "Static snapshot"),
    w("setup", 0.3, "Establishes world"),
    w("themeStated", 0.2, "Theme hints"),
    w("catalyst", 0.6, "Different triggers"),
    w("debate", 0.7, "Internal conflict options"),
    w("breakIntoTwo", 0.5, "Different commitments"),
    w("bStory", 0.6, "Subplot variations"),
    looped("funAndGames", 1.0, "Promise of premise exploration"),
    w("midpoint", 0.8, "Major turning point"),
    w("badGuysCloseIn", 0.7, "Escalation paths"),
    w("allIsLost", 0.5, "How to hit bottom"),
    w("darkNight", 0.4, "Soul searching"),
    w("breakIntoThree", 0.6, "New insights"),
    w("finale", 0.7, "Final battle variations"),
    w("finalImage", 0.0, "Static resolution"),
];

static STORY_CIRCLE: [BeatWeight; 8] = [
    w("you", 0.0, "Comfort zone baseline"),
    w("need", 0.5, "Different desires"),
    w("go", 0.6, "How to cross threshold"),
    looped("search", 0.9, "Multiple adaptations"),
    w("find", 0.7, "What to find"),
    w("take", 0.6, "What price to pay"),
    w("return", 0.4, "How to return"),
    w("change", 0.0, "Resolution"),
];

static THREE_ACT: [BeatWeight; 9] = [
    w("exposition", 0.0, "Setup baseline"),
    w("incitingIncident", 0.5, "Different disruptions"),
    w("plotPoint1", 0.6, "Commitment variations"),
    looped("risingAction", 0.8, "Multiple challenges"),
    w("midpoint", 0.7, "Turning point options"),
    w("plotPoint2", 0.6, "Setback variations"),
    w("preClimax", 0.4, "Preparation"),
    w("climax", 0.7, "Showdown variations"),
    w("denouement", 0.0, "Resolution"),
];

static SEVEN_POINT: [BeatWeight; 7] = [
    w("hook", 0.0, "Opening baseline"),
    w("plotPointOne", 0.6, "Inciting variations"),
    w("pinchPointOne", 0.7, "First clash options"),
    w("midpoint", 0.8, "Major shift"),
    w("pinchPointTwo", 0.6, "Deepening conflict"),
    w("plotPointTwo", 0.5, "Breakthrough"),
    w("resolution", 0.0, "Climax resolution"),
];

static LESTER_DENT: [BeatWeight; 19] = [
    w("hitWithTrouble", 0.0, "Opening trouble"),
    w("jumpIntoAction", 0.6, "Action entry"),
    w("introduceAllies", 0.5, "Character intros"),
    w("altercation1", 0.8, "Fight variations"),
    w("achieveMinor", 0.4, "Small wins"),
    w("plotTwist1", 0.7, "Twist options"),
    w("doubleTrouble", 0.8, "Escalation paths"),
    looped("showStruggle", 0.6, "Struggle scenes"),
    w("altercation2", 0.8, "Second fight"),
    w("plotTwist2", 0.7, "Another twist"),
    w("ratchetTension", 0.6, "Tension building"),
    w("falseHope", 0.5, "Hope variations"),
    w("altercation3", 0.8, "Third fight"),
    w("devastatingTwist", 0.7, "Crushing reversal"),
    w("lastStraw", 0.4, "Rock bottom"),
    w("escapeDefeat", 0.6, "Escape methods"),
    w("tieUpLooseEnds", 0.3, "Resolution"),
    w("finalPlotTwist", 0.5, "Final surprise"),
    w("deliverPunchline", 0.0, "Closing line"),
];

type BeatIndex = HashMap<&'static str, &'static BeatWeight>;

static INDEX: LazyLock<HashMap<Archetype, BeatIndex>> = LazyLock::new(|| {
    Archetype::ALL
        .into_iter()
        .map(|archetype| {
            let beats = table_for(archetype)
                .iter()
                .map(|weight| (weight.beat_id, weight))
                .collect();
            (archetype, beats)
        })
        .collect()
});

pub(crate) fn table_for(archetype: Archetype) -> &'static [BeatWeight] {
    match archetype {
        Archetype::HeroJourney => &HERO_JOURNEY,
        Archetype::SaveTheCat => &SAVE_THE_CAT,
        Archetype::StoryCircle => &STORY_CIRCLE,
        Archetype::ThreeAct => &THREE_ACT,
        Archetype::SevenPoint => &SEVEN_POINT,
        Archetype::LesterDent => &LESTER_DENT,
    }
}

/// Looks up the weight record for a beat.
///
/// # Errors
///
/// Returns `StoryError::WeightNotFound` when the archetype has no beat with
/// this id. There is no default weight; callers decide how to proceed.
pub fn get_weight(archetype: Archetype, beat_id: &str) -> Result<&'static BeatWeight, StoryError> {
    INDEX
        .get(&archetype)
        .and_then(|beats| beats.get(beat_id))
        .copied()
        .ok_or_else(|| StoryError::WeightNotFound {
            archetype: archetype.key().to_owned(),
            beat_id: beat_id.to_owned(),
        })
}

/// Whether the beat is loopable. Unknown beats are not.
#[must_use]
pub fn is_loopable(archetype: Archetype, beat_id: &str) -> bool {
    get_weight(archetype, beat_id).is_ok_and(|weight| weight.is_loopable)
}

/// The archetype's loopable beat, if it has one.
#[must_use]
pub fn loopable_beat(archetype: Archetype) -> Option<&'static BeatWeight> {
    table_for(archetype).iter().find(|weight| weight.is_loopable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_weight_returns_record_for_known_beat() {
        let weight = get_weight(Archetype::HeroJourney, "testsAllies").unwrap();

        assert!((weight.weight - 0.9).abs() < f64::EPSILON);
        assert!(weight.is_loopable);
        assert_eq!(weight.beat_id, "testsAllies");
    }

    #[test]
    fn test_get_weight_unknown_beat_is_not_found() {
        let result = get_weight(Archetype::StoryCircle, "testsAllies");

        assert_eq!(
            result,
            Err(StoryError::WeightNotFound {
                archetype: "story_circle".to_owned(),
                beat_id: "testsAllies".to_owned(),
            })
        );
    }

    #[test]
    fn test_shared_beat_ids_resolve_per_archetype() {
        let three_act = get_weight(Archetype::ThreeAct, "midpoint").unwrap();
        let seven_point = get_weight(Archetype::SevenPoint, "midpoint").unwrap();

        assert!((three_act.weight - 0.7).abs() < f64::EPSILON);
        assert!((seven_point.weight - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_every_structure_beat_has_a_weight_in_the_same_order() {
        for archetype in Archetype::ALL {
            let structure: Vec<&str> = archetype.beats().iter().map(|b| b.id).collect();
            let weights: Vec<&str> = archetype.weights().iter().map(|w| w.beat_id).collect();
            assert_eq!(structure, weights, "{archetype}");
        }
    }

    #[test]
    fn test_opening_and_closing_beats_never_branch() {
        for archetype in Archetype::ALL {
            let table = archetype.weights();
            assert!(table.first().unwrap().weight.abs() < f64::EPSILON, "{archetype}");
            assert!(table.last().unwrap().weight.abs() < f64::EPSILON, "{archetype}");
        }
    }

    #[test]
    fn test_at_most_one_loopable_beat_per_archetype() {
        for archetype in Archetype::ALL {
            let loops = archetype.weights().iter().filter(|w| w.is_loopable).count();
            assert!(loops <= 1, "{archetype} has {loops} loopable beats");
        }
        assert_eq!(
            loopable_beat(Archetype::HeroJourney).map(|w| w.beat_id),
            Some("testsAllies")
        );
        assert_eq!(loopable_beat(Archetype::SevenPoint), None);
    }

    #[test]
    fn test_weights_are_within_unit_interval() {
        for archetype in Archetype::ALL {
            for weight in archetype.weights() {
                assert!((0.0..=1.0).contains(&weight.weight), "{}", weight.beat_id);
            }
        }
    }

    #[test]
    fn test_is_loopable_is_false_for_unknown_beats() {
        assert!(is_loopable(Archetype::SaveTheCat, "funAndGames"));
        assert!(!is_loopable(Archetype::SaveTheCat, "finale"));
        assert!(!is_loopable(Archetype::SaveTheCat, "missing"));
    }
}
