use super::{GameId, HalfInningId, PlayerId, SeasonId, Side, TeamId};

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
pub enum GameStatus {
    Scheduled,
    InProgress,
    /// Terminal.
    Final,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    pub home: u16,
    pub away: u16,
}

impl Score {
    pub fn add(&mut self, side: Side, runs: u16) {
        match side {
            Side::Top => self.away += runs,
            Side::Bottom => self.home += runs,
        }
    }
}

/// Per-side bookkeeping carried across half-innings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSide {
    pub team_id: TeamId,
    /// Starting pitcher; pitches the whole game.
    pub pitcher_id: PlayerId,
    /// Lineup slot that leads off this team's next half-inning.
    pub next_lineup_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    pub id: GameId,
    /// `None` for exhibitions.
    pub season_id: Option<SeasonId>,
    /// Position in the season schedule, when the game came from it.
    pub schedule_index: Option<usize>,
    pub home: GameSide,
    pub away: GameSide,
    pub status: GameStatus,
    pub score: Score,
    pub half_inning_ids: Vec<HalfInningId>,
    pub current_half_inning_id: Option<HalfInningId>,
}

impl Game {
    pub fn home_team_id(&self) -> TeamId {
        self.home.team_id
    }

    pub fn away_team_id(&self) -> TeamId {
        self.away.team_id
    }

    pub fn is_final(&self) -> bool {
        self.status == GameStatus::Final
    }

    /// Batting side for a half.
    pub fn batting(&self, side: Side) -> &GameSide {
        match side {
            Side::Top => &self.away,
            Side::Bottom => &self.home,
        }
    }

    pub fn batting_mut(&mut self, side: Side) -> &mut GameSide {
        match side {
            Side::Top => &mut self.away,
            Side::Bottom => &mut self.home,
        }
    }

    /// Fielding side for a half.
    pub fn fielding(&self, side: Side) -> &GameSide {
        match side {
            Side::Top => &self.home,
            Side::Bottom => &self.away,
        }
    }

    /// Winning team once final; `None` while tied or unfinished.
    pub fn winner(&self) -> Option<TeamId> {
        if !self.is_final() {
            return None;
        }
        match self.score.home.cmp(&self.score.away) {
            std::cmp::Ordering::Greater => Some(self.home.team_id),
            std::cmp::Ordering::Less => Some(self.away.team_id),
            std::cmp::Ordering::Equal => None,
        }
    }
}
