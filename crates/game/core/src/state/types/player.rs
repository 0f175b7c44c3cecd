//! Player registry records.
//!
//! Ratings and archetypes are produced by the roster source (content files or
//! an external generator). The engine only reads them.

use arrayvec::ArrayVec;

use super::{PitchType, PlayerId, TeamId};

/// Rating scale upper bound. Every rating lives in `0..=100`.
pub const RATING_MAX: u8 = 100;

/// Hitting ratings on the 0–100 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatterRatings {
    pub contact: u8,
    pub power: u8,
    pub discipline: u8,
    pub speed: u8,
}

impl Default for BatterRatings {
    fn default() -> Self {
        Self {
            contact: 50,
            power: 50,
            discipline: 50,
            speed: 50,
        }
    }
}

/// Pitching ratings on the 0–100 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitcherRatings {
    pub stuff: u8,
    pub control: u8,
    pub movement: u8,
    pub stamina: u8,
}

impl Default for PitcherRatings {
    fn default() -> Self {
        Self {
            stuff: 50,
            control: 50,
            movement: 50,
            stamina: 50,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BatterArchetype {
    #[default]
    Balanced,
    Slugger,
    ContactHitter,
    Speedster,
    Patient,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PitcherArchetype {
    #[default]
    Balanced,
    PowerArm,
    Finesse,
    Groundballer,
}

/// Maximum number of distinct pitches in a repertoire.
pub const MAX_REPERTOIRE: usize = 9;

/// Pitch mix with relative usage weights.
pub type Repertoire = ArrayVec<(PitchType, u8), MAX_REPERTOIRE>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatterProfile {
    pub ratings: BatterRatings,
    pub archetype: BatterArchetype,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitcherProfile {
    pub ratings: PitcherRatings,
    pub archetype: PitcherArchetype,
    pub repertoire: Repertoire,
}

impl Default for PitcherProfile {
    fn default() -> Self {
        let mut repertoire = Repertoire::new();
        repertoire.push((PitchType::FF, 55));
        repertoire.push((PitchType::SL, 25));
        repertoire.push((PitchType::CH, 20));
        Self {
            ratings: PitcherRatings::default(),
            archetype: PitcherArchetype::default(),
            repertoire,
        }
    }
}

/// A player as the engine sees it: identity, team and ratings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team_id: Option<TeamId>,
    pub batting: BatterProfile,
    /// Present only for players who can take the mound.
    pub pitching: Option<PitcherProfile>,
}

impl Player {
    pub fn batter(id: PlayerId, name: impl Into<String>, ratings: BatterRatings) -> Self {
        Self {
            id,
            name: name.into(),
            team_id: None,
            batting: BatterProfile {
                ratings,
                archetype: BatterArchetype::Balanced,
            },
            pitching: None,
        }
    }

    pub fn pitcher(id: PlayerId, name: impl Into<String>, ratings: PitcherRatings) -> Self {
        Self {
            id,
            name: name.into(),
            team_id: None,
            batting: BatterProfile::default(),
            pitching: Some(PitcherProfile {
                ratings,
                ..PitcherProfile::default()
            }),
        }
    }

    #[must_use]
    pub fn on_team(mut self, team: TeamId) -> Self {
        self.team_id = Some(team);
        self
    }

    #[must_use]
    pub fn with_batter_archetype(mut self, archetype: BatterArchetype) -> Self {
        self.batting.archetype = archetype;
        self
    }

    #[must_use]
    pub fn with_pitcher_archetype(mut self, archetype: PitcherArchetype) -> Self {
        if let Some(profile) = self.pitching.as_mut() {
            profile.archetype = archetype;
        }
        self
    }

    pub fn is_pitcher(&self) -> bool {
        self.pitching.is_some()
    }
}
