//! Fixed narrative content: branch types with their template pools, and
//! per-beat idea pools.

use std::fmt;

use serde::{Deserialize, Serialize};
use storyception_core::rng::DeterministicRng;

/// The kind of turn a branch takes. The catalog order is significant: branch
/// generation walks it round-robin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchType {
    Confrontation,
    Discovery,
    Sacrifice,
    Deception,
}

impl BranchType {
    /// All branch types in catalog order.
    pub const CATALOG: [Self; 4] = [
        Self::Confrontation,
        Self::Discovery,
        Self::Sacrifice,
        Self::Deception,
    ];

    /// The catalog entry `offset` places after the start, wrapping.
    #[must_use]
    pub fn nth(offset: usize) -> Self {
        Self::CATALOG[offset % Self::CATALOG.len()]
    }

    /// Display heading used in branch titles.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Confrontation => "DIRECT CONFRONTATION",
            Self::Discovery => "HIDDEN DISCOVERY",
            Self::Sacrifice => "COSTLY SACRIFICE",
            Self::Deception => "STRATEGIC DECEPTION",
        }
    }

    /// Description templates for this type.
    #[must_use]
    pub fn templates(self) -> &'static [&'static str] {
        match self {
            Self::Confrontation => &[
                "The hero charges headfirst into conflict, revealing hidden strength",
                "A tense face-off where words become weapons",
                "The moment of truth, fight or flight, and the hero chooses fight",
            ],
            Self::Discovery => &[
                "A secret passage leads to unexpected revelations",
                "The hero uncovers evidence that changes everything",
                "A hidden ally emerges from the shadows",
            ],
            Self::Sacrifice => &[
                "The hero gives up something precious for the greater good",
                "A painful choice between two impossible options",
                "Loss becomes the catalyst for transformation",
            ],
            Self::Deception => &[
                "The hero plays a dangerous game of misdirection",
                "A false alliance masks true intentions",
                "The mask slips, revealing hidden motives",
            ],
        }
    }
}

impl fmt::Display for BranchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Confrontation => "confrontation",
            Self::Discovery => "discovery",
            Self::Sacrifice => "sacrifice",
            Self::Deception => "deception",
        };
        f.write_str(name)
    }
}

/// Picks one entry of `pool` using the injected random source.
///
/// `pool` must not be empty.
pub(crate) fn pick<'a>(pool: &[&'a str], rng: &mut dyn DeterministicRng) -> &'a str {
    let last = u32::try_from(pool.len().saturating_sub(1)).unwrap_or(u32::MAX);
    let index = usize::try_from(rng.next_u32_range(0, last)).unwrap_or(0);
    pool[index.min(pool.len() - 1)]
}

const FALLBACK_IDEAS: [&str; 4] = [
    "A pivotal moment unfolds that advances the narrative",
    "The protagonist faces a crucial decision point",
    "New information reshapes the hero's understanding",
    "Tension builds as stakes are raised",
];

fn idea_pool(beat_id: &str) -> &'static [&'static str] {
    match beat_id {
        "openingImage" => &[
            "A lone figure stands at the edge of a rain-soaked rooftop, city lights blurring below",
            "Morning light filters through dusty blinds onto scattered photographs",
            "An empty chair at a crowded dinner table, a glass of wine untouched",
            "Footsteps echo in an abandoned warehouse as shadows shift",
        ],
        "setup" => &[
            "The protagonist navigates their mundane routine, hiding deeper ambitions",
            "Family tensions simmer beneath polite conversation at breakfast",
            "A chance encounter plants the seed of what's to come",
            "The hero's flaw is revealed through a small but telling moment",
        ],
        "themeStated" => &[
            "'Sometimes the only way forward is to let go of everything you thought you knew'",
            "'The truth doesn't care if you're ready to hear it'",
            "'We become what we choose to fight for'",
            "'Every ending is just another beginning in disguise'",
        ],
        "catalyst" => &[
            "A mysterious message arrives that changes everything",
            "An unexpected death forces the hero into action",
            "A discovery reveals the world is not what it seemed",
            "The hero witnesses something they cannot ignore",
        ],
        "debate" => &[
            "The hero weighs the cost of action against safety of inaction",
            "A mentor figure offers conflicting advice",
            "Internal doubts surface through vivid flashbacks",
            "The hero attempts a half-measure that fails",
        ],
        "breakIntoTwo" => &[
            "The hero crosses a literal threshold: a door, a border, a line",
            "A dramatic decision burns bridges to the old world",
            "The hero speaks their commitment aloud for the first time",
            "An ally joins, solidifying the new path forward",
        ],
        "bStory" => &[
            "The protagonist embarks on a parallel journey, learning valuable lessons",
            "A subplot unfolds, revealing new aspects of the main character",
            "The hero grapples with personal demons while facing external challenges",
            "Secondary conflicts escalate, adding depth to the story",
        ],
        "funAndGames" => &[
            "The hero enjoys a period of relative calm and growth",
            "A series of events leads to a lighthearted moment of clarity",
            "The hero and allies engage in playful banter, building trust",
            "The story takes a comedic turn, providing much-needed relief",
        ],
        "midpoint" => &[
            "The hero faces a significant setback, questioning their journey",
            "A major revelation shifts the hero's perspective",
            "The hero realizes the true cost of their actions",
            "The story reaches its midpoint, setting up the final push",
        ],
        "badGuysCloseIn" => &[
            "The antagonist's plan comes to fruition, putting the hero in danger",
            "The hero learns the full extent of the enemy's threat",
            "The stakes are raised as the hero confronts new challenges",
            "The hero narrowly escapes, but the danger is far from over",
        ],
        "allIsLost" => &[
            "The hero experiences a devastating loss, feeling defeated",
            "The story takes a dark turn as hope seems extinguished",
            "The hero faces the lowest point of their journey",
            "The antagonist gains the upper hand, forcing the hero to adapt",
        ],
        "darkNight" => &[
            "The hero undergoes a transformative experience in isolation",
            "A pivotal decision is made during a night of introspection",
            "The hero confronts their deepest fears and doubts",
            "The story builds to a climax of tension and revelation",
        ],
        "breakIntoThree" => &[
            "The hero embarks on a new phase of their journey",
            "A final push towards the goal begins",
            "The hero prepares for the ultimate challenge",
            "The story takes a final turn, setting the stage for the finale",
        ],
        "finale" => &[
            "The hero faces the final confrontation, everything on the line",
            "The climax of the story unfolds, determining the fate of the protagonist",
            "The hero makes a final decision that changes the course of the narrative",
            "The story reaches its resolution, leaving the audience satisfied",
        ],
        "finalImage" => &[
            "The hero stands victorious, looking towards the future",
            "The protagonist reflects on their journey, finding peace",
            "The story ends with a lingering question, leaving room for interpretation",
            "The final scene captures the essence of the hero's transformation",
        ],
        _ => &FALLBACK_IDEAS,
    }
}

/// Draws a narrative idea for the beat with the given archetype beat id.
/// Beats without a dedicated pool draw from a generic one.
pub fn generate_idea(beat_id: &str, rng: &mut dyn DeterministicRng) -> String {
    pick(idea_pool(beat_id), rng).to_owned()
}
