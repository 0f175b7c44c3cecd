use std::collections::BTreeMap;

use super::{BattingLine, GameId, PlayerId, SeasonId, TeamId};

/// League lifecycle phase.
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
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum LeaguePhase {
    /// No league loaded yet.
    #[default]
    Uninitialized,
    RegularSeason,
    Postseason,
    Offseason,
}

impl LeaguePhase {
    /// Phases in which games and seasons may be simulated.
    pub const fn allows_simulation(self) -> bool {
        matches!(self, LeaguePhase::RegularSeason | LeaguePhase::Postseason)
    }

    /// Successor in the yearly cycle. `Uninitialized` has none.
    pub const fn next(self) -> Option<Self> {
        match self {
            LeaguePhase::Uninitialized => None,
            LeaguePhase::RegularSeason => Some(LeaguePhase::Postseason),
            LeaguePhase::Postseason => Some(LeaguePhase::Offseason),
            LeaguePhase::Offseason => Some(LeaguePhase::RegularSeason),
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
pub enum SeasonStatus {
    Scheduled,
    Active,
    /// Terminal for the year.
    Complete,
}

/// A schedule slot. Materialized into a [`super::Game`] when it comes due.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledGame {
    pub home: TeamId,
    pub away: TeamId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Standing {
    pub team_id: TeamId,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub runs_scored: u32,
    pub runs_allowed: u32,
}

impl Standing {
    pub const fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            wins: 0,
            losses: 0,
            ties: 0,
            runs_scored: 0,
            runs_allowed: 0,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    pub fn win_pct(&self) -> f64 {
        match self.games_played() {
            0 => 0.0,
            played => f64::from(self.wins) / f64::from(played),
        }
    }

    pub fn run_differential(&self) -> i64 {
        i64::from(self.runs_scored) - i64::from(self.runs_allowed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Season {
    pub id: SeasonId,
    pub year: u16,
    pub team_ids: Vec<TeamId>,
    /// Ordered game queue; empty until the first tick.
    pub schedule: Vec<ScheduledGame>,
    /// Games materialized so far, in schedule order.
    pub game_ids: Vec<GameId>,
    /// Next schedule slot to play.
    pub current_game_index: usize,
    pub day: u32,
    pub standings: BTreeMap<TeamId, Standing>,
    pub batting: BTreeMap<PlayerId, BattingLine>,
    pub status: SeasonStatus,
}

impl Season {
    pub fn new(id: SeasonId, year: u16, team_ids: Vec<TeamId>) -> Self {
        let standings = team_ids
            .iter()
            .map(|&team| (team, Standing::new(team)))
            .collect();
        Self {
            id,
            year,
            team_ids,
            schedule: Vec::new(),
            game_ids: Vec::new(),
            current_game_index: 0,
            day: 0,
            standings,
            batting: BTreeMap::new(),
            status: SeasonStatus::Scheduled,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == SeasonStatus::Complete
    }

    pub fn remaining_games(&self) -> usize {
        self.schedule.len().saturating_sub(self.current_game_index)
    }

    /// Standings ordered by win percentage, then run differential, then id.
    pub fn sorted_standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = self.standings.values().copied().collect();
        rows.sort_by(|a, b| {
            b.win_pct()
                .total_cmp(&a.win_pct())
                .then_with(|| b.run_differential().cmp(&a.run_differential()))
                .then_with(|| a.team_id.cmp(&b.team_id))
        });
        rows
    }
}
