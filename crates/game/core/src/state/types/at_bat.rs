use super::{AtBatId, Count, HalfInningId, PitchId, PlayerId, RunnerState};

/// Terminal result of an at-bat.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AtBatResult {
    Out,
    Strikeout,
    Walk,
    Single,
    Double,
    Triple,
    HomeRun,
}

impl AtBatResult {
    /// Bases the batter takes on a hit; `None` for outs and walks.
    pub const fn hit_bases(self) -> Option<u8> {
        match self {
            AtBatResult::Single => Some(1),
            AtBatResult::Double => Some(2),
            AtBatResult::Triple => Some(3),
            AtBatResult::HomeRun => Some(4),
            AtBatResult::Out | AtBatResult::Strikeout | AtBatResult::Walk => None,
        }
    }

    pub const fn is_hit(self) -> bool {
        self.hit_bases().is_some()
    }

    pub const fn is_out(self) -> bool {
        matches!(self, AtBatResult::Out | AtBatResult::Strikeout)
    }

    /// Whether the plate appearance counts as an official at-bat.
    ///
    /// Walks and sacrifice flies do not.
    pub fn counts_as_at_bat(self, play: Option<&AtBatPlay>) -> bool {
        match self {
            AtBatResult::Walk => false,
            AtBatResult::Out => !play.is_some_and(AtBatPlay::is_sacrifice_fly),
            _ => true,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattedBallType {
    Ground,
    Fly,
    Line,
    Pop,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ContactQuality {
    Weak,
    Solid,
    Crushed,
}

/// Non-default advancement attached to a resolved at-bat.
///
/// `outs_added` always decides the outs charged. When `runner_state_after`
/// is set the play bypasses the runner advancement engine: that occupancy and
/// `runs_scored` are taken as-is. Otherwise runners move by the result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtBatPlay {
    pub outs_added: u8,
    pub runs_scored: u8,
    pub runner_state_after: Option<RunnerState>,
    pub batted_ball_type: Option<BattedBallType>,
    pub contact: Option<ContactQuality>,
    pub kind: PlayKind,
    pub note: Option<String>,
}

/// Named play shapes produced by the defensive resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PlayKind {
    DoublePlay,
    SacrificeFly,
    /// Ordinary ball in play; advancement follows the result.
    BallInPlay,
}

impl AtBatPlay {
    pub fn is_sacrifice_fly(&self) -> bool {
        self.kind == PlayKind::SacrificeFly
    }

    pub fn is_double_play(&self) -> bool {
        self.kind == PlayKind::DoublePlay
    }

    /// Whether this play overrides the default outs/runs/advancement.
    pub fn overrides_advancement(&self) -> bool {
        self.runner_state_after.is_some()
    }
}

/// One batter's turn against the pitcher.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtBat {
    pub id: AtBatId,
    pub half_inning_id: HalfInningId,
    pub batter_id: PlayerId,
    pub pitcher_id: PlayerId,
    pub count: Count,
    pub pitch_ids: Vec<PitchId>,
    pub result: Option<AtBatResult>,
    pub play: Option<AtBatPlay>,
}

impl AtBat {
    pub fn open(
        id: AtBatId,
        half_inning_id: HalfInningId,
        batter_id: PlayerId,
        pitcher_id: PlayerId,
    ) -> Self {
        Self {
            id,
            half_inning_id,
            batter_id,
            pitcher_id,
            count: Count::default(),
            pitch_ids: Vec::new(),
            result: None,
            play: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }
}
