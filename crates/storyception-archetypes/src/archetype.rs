//! The archetype catalogue.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use storyception_core::error::StoryError;

use crate::structure::{self, BeatStructure};
use crate::weights::{self, BeatWeight};

/// A named structural template defining an ordered list of beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Campbell's monomyth, 12 beats.
    HeroJourney,
    /// Snyder's beat sheet, 15 beats.
    SaveTheCat,
    /// Harmon's story circle, 8 beats.
    StoryCircle,
    /// Classic three-act structure, 9 beats.
    ThreeAct,
    /// Seven-point structure, 7 beats.
    SevenPoint,
    /// Lester Dent's pulp master plot, 19 beats.
    LesterDent,
}

impl Archetype {
    /// All archetypes in catalogue order.
    pub const ALL: [Self; 6] = [
        Self::HeroJourney,
        Self::SaveTheCat,
        Self::StoryCircle,
        Self::ThreeAct,
        Self::SevenPoint,
        Self::LesterDent,
    ];

    /// Looks up an archetype by its catalogue position.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::ArchetypeNotFound` when `index` is out of range.
    pub fn from_index(index: usize) -> Result<Self, StoryError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| StoryError::ArchetypeNotFound(index.to_string()))
    }

    /// Catalogue position of this archetype.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::HeroJourney => 0,
            Self::SaveTheCat => 1,
            Self::StoryCircle => 2,
            Self::ThreeAct => 3,
            Self::SevenPoint => 4,
            Self::LesterDent => 5,
        }
    }

    /// Stable machine key, matching the serde representation.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::HeroJourney => "hero_journey",
            Self::SaveTheCat => "save_the_cat",
            Self::StoryCircle => "story_circle",
            Self::ThreeAct => "three_act",
            Self::SevenPoint => "seven_point",
            Self::LesterDent => "lester_dent",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::HeroJourney => "HERO'S JOURNEY",
            Self::SaveTheCat => "SAVE THE CAT",
            Self::StoryCircle => "STORY CIRCLE",
            Self::ThreeAct => "THREE-ACT",
            Self::SevenPoint => "SEVEN-POINT",
            Self::LesterDent => "LESTER DENT",
        }
    }

    #[must_use]
    pub fn subtitle(self) -> &'static str {
        match self {
            Self::HeroJourney => "EPIC ENGINE",
            Self::SaveTheCat => "PACING ENGINE",
            Self::StoryCircle => "CHARACTER ENGINE",
            Self::ThreeAct => "BASE ENGINE",
            Self::SevenPoint => "MILESTONE ENGINE",
            Self::LesterDent => "PULP FICTION ENGINE",
        }
    }

    /// Well-known works that follow the structure.
    #[must_use]
    pub fn example(self) -> &'static str {
        match self {
            Self::HeroJourney => "Star Wars, Marvel",
            Self::SaveTheCat => "Pixar, Blockbusters",
            Self::StoryCircle => "Rick & Morty, Community",
            Self::ThreeAct => "Standard Cinema",
            Self::SevenPoint => "Discovery Writers",
            Self::LesterDent => "Pulp Fiction, Thrillers",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::HeroJourney => "Mythic progression & world-building",
            Self::SaveTheCat => "Structured beats for maximum engagement",
            Self::StoryCircle => "Cyclical change and return",
            Self::ThreeAct => "Setup, confrontation, resolution",
            Self::SevenPoint => "Key turning points without rigid outline",
            Self::LesterDent => "Systematic escalation of trouble",
        }
    }

    /// The ordered beat structure of this archetype.
    #[must_use]
    pub fn beats(self) -> &'static [BeatStructure] {
        structure::beats_for(self)
    }

    /// The branching weight table of this archetype, in beat order.
    #[must_use]
    pub fn weights(self) -> &'static [BeatWeight] {
        weights::table_for(self)
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Archetype {
    type Err = StoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|archetype| archetype.key() == s)
            .ok_or_else(|| StoryError::ArchetypeNotFound(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trips_through_from_index() {
        for archetype in Archetype::ALL {
            assert_eq!(Archetype::from_index(archetype.index()), Ok(archetype));
        }
    }

    #[test]
    fn test_from_index_out_of_range_is_not_found() {
        assert_eq!(
            Archetype::from_index(6),
            Err(StoryError::ArchetypeNotFound("6".to_owned()))
        );
    }

    #[test]
    fn test_key_parses_and_matches_serde() {
        for archetype in Archetype::ALL {
            assert_eq!(archetype.key().parse::<Archetype>(), Ok(archetype));
            let json = serde_json::to_value(archetype).unwrap();
            assert_eq!(json, serde_json::Value::String(archetype.key().to_owned()));
        }
        assert!("noir".parse::<Archetype>().is_err());
    }

    #[test]
    fn test_beat_counts_per_archetype() {
        let counts: Vec<usize> = Archetype::ALL.iter().map(|a| a.beats().len()).collect();
        assert_eq!(counts, vec![12, 15, 8, 9, 7, 19]);
    }
}
