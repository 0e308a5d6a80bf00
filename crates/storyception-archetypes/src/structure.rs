//! Ordered beat structures and runtime shares for every archetype.

use serde::Serialize;

use crate::archetype::Archetype;

/// One beat of an archetype's structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BeatStructure {
    /// Archetype-scoped beat identifier (`"testsAllies"`).
    pub id: &'static str,
    /// Numbered display label (`"6. TESTS, ALLIES, ENEMIES"`).
    pub label: &'static str,
    /// One-sentence description of the beat's dramatic function.
    pub description: &'static str,
    /// Share of total runtime, in percent. Shares of one archetype sum to 100.
    pub percent: u8,
}

const fn beat(
    id: &'static str,
    label: &'static str,
    description: &'static str,
    percent: u8,
) -> BeatStructure {
    BeatStructure {
        id,
        label,
        description,
        percent,
    }
}

pub(crate) fn beats_for(archetype: Archetype) -> &'static [BeatStructure] {
    match archetype {
        Archetype::HeroJourney => &HERO_JOURNEY,
        Archetype::SaveTheCat => &SAVE_THE_CAT,
        Archetype::StoryCircle => &STORY_CIRCLE,
        Archetype::ThreeAct => &THREE_ACT,
        Archetype::SevenPoint => &SEVEN_POINT,
        Archetype::LesterDent => &LESTER_DENT,
    }
}

static HERO_JOURNEY: [BeatStructure; 12] = [
    beat("ordinaryWorld", "1. THE ORDINARY WORLD", "The hero's normal life is established before the adventure begins.", 8),
    beat("callToAdventure", "2. THE CALL TO ADVENTURE", "An inciting incident disrupts the hero's comfort zone.", 4),
    beat("refusal", "3. REFUSAL OF THE CALL", "The hero hesitates or resists the journey ahead.", 5),
    beat("meetingMentor", "4. MEETING THE MENTOR", "A guide appears to offer wisdom, tools, or inspiration.", 5),
    beat("crossingThreshold", "5. CROSSING THE FIRST THRESHOLD", "The hero fully commits and steps into the unknown.", 8),
    beat("testsAllies", "6. TESTS, ALLIES, ENEMIES", "The hero faces challenges, gains allies, and identifies adversaries.", 15),
    beat("approach", "7. APPROACH TO THE INNERMOST CAVE", "The hero nears their goal, but danger and uncertainty increase.", 8),
    beat("ordeal", "8. THE ORDEAL", "A critical confrontation forces the hero to face their deepest fears.", 12),
    beat("reward", "9. REWARD (SEIZING THE SWORD)", "The hero earns a tangible or intangible boon after overcoming the ordeal.", 8),
    beat("roadBack", "10. THE ROAD BACK", "The hero begins the journey home, but the story is not yet over.", 8),
    beat("resurrection", "11. RESURRECTION", "The hero faces a final, defining climactic challenge.", 12),
    beat("returnElixir", "12. RETURN WITH THE ELIXIR", "The hero returns to the ordinary world, transformed and bringing new knowledge or strength.", 7),
];

static SAVE_THE_CAT: [BeatStructure; 15] = [
    beat("openingImage", "1. OPENING IMAGE", "A snapshot that sets the tone and introduces the protagonist.", 1),
    beat("setup", "2. SETUP", "The world is introduced, establishing relationships and stakes.", 9),
    beat("themeStated", "3. THEME STATED", "The story's deeper message or lesson is hinted at.", 1),
    beat("catalyst", "4. CATALYST", "The inciting incident that kicks the story into motion.", 3),
    beat("debate", "5. DEBATE", "The protagonist hesitates or questions the path ahead.", 10),
    beat("breakIntoTwo", "6. BREAK INTO TWO", "The hero commits fully to the central goal, entering Act II.", 2),
    beat("bStory", "7. B STORY", "A subplot emerges, often focusing on an emotional thread like romance or friendship.", 3),
    beat("funAndGames", "8. FUN AND GAMES", "The \"promise of the premise\" is explored as the hero navigates their new world.", 20),
    beat("midpoint", "9. MIDPOINT", "A major twist or revelation changes the story's trajectory.", 5),
    beat("badGuysCloseIn", "10. BAD GUYS CLOSE IN", "Tension ramps up as obstacles and enemies surround the protagonist.", 15),
    beat("allIsLost", "11. ALL IS LOST", "A crushing setback makes the protagonist confront their deepest fears.", 5),
    beat("darkNight", "12. DARK NIGHT OF THE SOUL", "The hero hits rock bottom and questions everything.", 5),
    beat("breakIntoThree", "13. BREAK INTO THREE", "A new insight sparks a path forward into Act III.", 2),
    beat("finale", "14. FINALE", "The climax, where the hero uses everything they've learned to face the final challenge.", 17),
    beat("finalImage", "15. FINAL IMAGE", "A closing snapshot that mirrors the opening image, showing how much the hero has transformed.", 2),
];

static STORY_CIRCLE: [BeatStructure; 8] = [
    beat("you", "1. YOU (ZONE OF COMFORT)", "The character is grounded in their mundane and unchallenging everyday life.", 12),
    beat("need", "2. NEED (WANT SOMETHING)", "A core desire compels the protagonist to take action.", 8),
    beat("go", "3. GO (ENTER AN UNFAMILIAR SITUATION)", "The character crosses a threshold to pursue what they want.", 15),
    beat("search", "4. SEARCH (ADAPT TO IT)", "They must acquire new skills and learn how to survive in this new world.", 15),
    beat("find", "5. FIND (GET WHAT THEY WANTED)", "The character achieves their goal, but it comes at a significant cost.", 15),
    beat("take", "6. TAKE (PAY A HEAVY PRICE)", "Victory is followed by new and unexpected losses or sacrifices.", 12),
    beat("return", "7. RETURN (RETURN TO FAMILIAR SITUATION)", "The character goes back to where they started.", 12),
    beat("change", "8. CHANGE (HAVING CHANGED)", "The character has grown, and the lessons learned remain with them.", 11),
];

static THREE_ACT: [BeatStructure; 9] = [
    beat("exposition", "1. EXPOSITION", "Establish the protagonist's ordinary world.", 10),
    beat("incitingIncident", "2. INCITING INCIDENT", "An event disrupts the ordinary world and kicks off the main story.", 5),
    beat("plotPoint1", "3. PLOT POINT 1", "The protagonist commits to facing the conflict, crossing a threshold into Act II.", 10),
    beat("risingAction", "4. RISING ACTION", "The protagonist faces escalating challenges, and the stakes are raised.", 20),
    beat("midpoint", "5. MIDPOINT", "A major turning point flips the story upside down, often making success feel impossible.", 10),
    beat("plotPoint2", "6. PLOT POINT 2", "The protagonist suffers a major setback, forcing them to question their ability to succeed.", 10),
    beat("preClimax", "7. PRE-CLIMAX", "The protagonist regroups and prepares for the final confrontation.", 10),
    beat("climax", "8. CLIMAX", "The ultimate showdown where the central conflict is finally resolved.", 15),
    beat("denouement", "9. DÉNOUEMENT", "Loose ends are tied up, and the new status quo is revealed.", 10),
];

static SEVEN_POINT: [BeatStructure; 7] = [
    beat("hook", "1. HOOK", "Grounds readers in the protagonist's world while introducing a spark of intrigue.", 10),
    beat("plotPointOne", "2. PLOT POINT ONE", "The inciting incident that disrupts normal life and pushes the protagonist into the main conflict.", 10),
    beat("pinchPointOne", "3. PINCH POINT ONE", "The first real clash with the antagonist, forcing the protagonist to confront the stakes.", 15),
    beat("midpoint", "4. MIDPOINT", "A major shift in perspective where the protagonist takes full responsibility and begins driving the story.", 15),
    beat("pinchPointTwo", "5. PINCH POINT TWO", "Conflict deepens and hope fades as the protagonist hits their lowest moment.", 15),
    beat("plotPointTwo", "6. PLOT POINT TWO", "A breakthrough where the hero gains new information, tools, or allies that change everything.", 15),
    beat("resolution", "7. RESOLUTION", "The climax and conclusion, where the protagonist's journey reaches its peak.", 20),
];

// Four quarters of 25% each, following Dent's four-part master plot.
static LESTER_DENT: [BeatStructure; 19] = [
    beat("hitWithTrouble", "1. HIT THE HERO WITH TROUBLE", "First line: Hit the hero with their trouble. Expand on the situation and hint at the core problem.", 5),
    beat("jumpIntoAction", "2. JUMP INTO ACTION", "The hero must grapple with the problem head-on from the start.", 4),
    beat("introduceAllies", "3. INTRODUCE ALLIES AND COUNTERPARTS", "Bring in other key characters to engage with the problem.", 4),
    beat("altercation1", "4. ALTERCATION 1", "Trigger a physical conflict to escalate events.", 5),
    beat("achieveMinor", "5. ACHIEVE SOMETHING MINOR", "Allow the hero a small victory, like uncovering a clue or releasing a captive.", 3),
    beat("plotTwist1", "6. PLOT TWIST 1", "End the section with a surprise that reveals something is not what it seems.", 4),
    beat("doubleTrouble", "7. DOUBLE THE TROUBLE", "Dramatically escalate the stakes and tension from Part 1.", 6),
    beat("showStruggle", "8. SHOW THE STRUGGLE", "Depict the hero unsuccessfully grappling with the heightened pressure.", 7),
    beat("altercation2", "9. ALTERCATION 2", "Initiate a second physical conflict, keeping it fresh and distinct from the first.", 7),
    beat("plotTwist2", "10. PLOT TWIST 2", "End with another twist, proving yet another element is not as it seems.", 5),
    beat("ratchetTension", "11. RATCHET THE TENSION", "Push the pressure to its absolute highest point.", 5),
    beat("falseHope", "12. PROVIDE FALSE HOPE", "Offer a temporary glimmer of hope or progress.", 4),
    beat("altercation3", "13. ALTERCATION 3", "Ensure this glimmer of hope leads directly into a third physical conflict.", 6),
    beat("devastatingTwist", "14. DEVASTATING TWIST", "End with a crushing reversal that leaves the hero in an impossible, all-is-lost situation.", 5),
    beat("lastStraw", "15. ADD A \"LAST STRAW\"", "Push the hero to their absolute lowest point.", 5),
    beat("escapeDefeat", "16. ESCAPE AND DEFEAT", "The hero uses specialist skills to escape and overcome the villain.", 10),
    beat("tieUpLooseEnds", "17. TIE UP LOOSE ENDS", "Resolve all remaining mysteries.", 6),
    beat("finalPlotTwist", "18. FINAL PLOT TWIST", "Deliver one last surprise at the very end.", 5),
    beat("deliverPunchline", "19. DELIVER THE PUNCHLINE", "Conclude with a clever, snappy final line.", 4),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_percentages_sum_to_one_hundred_for_every_archetype() {
        for archetype in Archetype::ALL {
            let total: u32 = archetype.beats().iter().map(|b| u32::from(b.percent)).sum();
            assert!(
                (99..=101).contains(&total),
                "{archetype} shares sum to {total}"
            );
        }
    }

    #[test]
    fn test_beat_ids_are_unique_within_archetype() {
        for archetype in Archetype::ALL {
            let ids: HashSet<&str> = archetype.beats().iter().map(|b| b.id).collect();
            assert_eq!(ids.len(), archetype.beats().len(), "{archetype}");
        }
    }

    #[test]
    fn test_labels_are_numbered_in_order() {
        for archetype in Archetype::ALL {
            for (position, beat) in archetype.beats().iter().enumerate() {
                let prefix = format!("{}. ", position + 1);
                assert!(beat.label.starts_with(&prefix), "{}", beat.label);
            }
        }
    }
}
