use super::{AtBatId, GameId, HalfInningId, RunnerState, TeamId};

/// Which half of the inning is being played.
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
pub enum Side {
    /// Away team bats.
    Top,
    /// Home team bats.
    Bottom,
}

impl Side {
    pub const fn flip(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }
}

/// One team's turn at bat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HalfInning {
    pub id: HalfInningId,
    pub game_id: GameId,
    pub inning_number: u16,
    pub side: Side,
    pub batting_team_id: TeamId,
    pub fielding_team_id: TeamId,
    pub outs: u8,
    pub runner_state: RunnerState,
    /// Lineup slot of the batter currently up (or due up).
    pub lineup_index: usize,
    pub runs: u16,
    pub at_bat_ids: Vec<AtBatId>,
    /// Open at-bat, or `None` once the half-inning is over.
    pub current_at_bat_id: Option<AtBatId>,
}

impl HalfInning {
    pub const MAX_OUTS: u8 = 3;

    pub fn is_complete(&self) -> bool {
        self.outs >= Self::MAX_OUTS
    }
}
