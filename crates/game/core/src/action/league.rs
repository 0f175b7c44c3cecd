//! League lifecycle actions: loading a league, choosing the user's club and
//! moving through the yearly phases.

use std::collections::BTreeSet;

use crate::config::SimConfig;
use crate::error::{DiagnosticKind, ErrorSeverity, GameError};
use crate::state::{
    EventKind, EventRefs, GameId, LINEUP_SIZE, LeaguePhase, LeagueState, Player, PlayerId, Season,
    SeasonId, Team, TeamId,
};

use super::ActionTransition;

/// Errors raised by league lifecycle actions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeagueError {
    #[error("a league needs at least two teams, got {0}")]
    TooFewTeams(usize),

    #[error("team {0} appears more than once")]
    DuplicateTeam(TeamId),

    #[error("player {0} appears more than once")]
    DuplicatePlayer(PlayerId),

    #[error("team {team} lists unknown player {player}")]
    UnknownPlayer { team: TeamId, player: PlayerId },

    #[error("player {0} is rostered by more than one team")]
    MultipleTeams(PlayerId),

    #[error("team {team} uses player {player} outside its roster")]
    NotOnRoster { team: TeamId, player: PlayerId },

    #[error("team {team} bats {batters}, a full order is {full}", full = LINEUP_SIZE)]
    ShortLineup { team: TeamId, batters: usize },

    #[error("team {team} bats player {player} more than once")]
    DuplicateInLineup { team: TeamId, player: PlayerId },

    #[error("team {0} has no pitcher")]
    NoPitcher(TeamId),

    #[error("team {0} does not exist")]
    UnknownTeam(TeamId),

    #[error("no league is loaded")]
    NotInitialized,

    #[error("game {0} is still in progress")]
    GameInProgress(GameId),
}

impl GameError for LeagueError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotInitialized | Self::GameInProgress(_) => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn kind(&self) -> DiagnosticKind {
        match self {
            Self::UnknownPlayer { .. } | Self::UnknownTeam(_) => DiagnosticKind::MissingReference,
            Self::NotInitialized => DiagnosticKind::InvalidPhase,
            Self::GameInProgress(_) => DiagnosticKind::InvalidState,
            _ => DiagnosticKind::InvalidInput,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooFewTeams(_) => "LEAGUE_TOO_FEW_TEAMS",
            Self::DuplicateTeam(_) => "LEAGUE_DUPLICATE_TEAM",
            Self::DuplicatePlayer(_) => "LEAGUE_DUPLICATE_PLAYER",
            Self::UnknownPlayer { .. } => "LEAGUE_UNKNOWN_PLAYER",
            Self::MultipleTeams(_) => "LEAGUE_MULTIPLE_TEAMS",
            Self::NotOnRoster { .. } => "LEAGUE_NOT_ON_ROSTER",
            Self::ShortLineup { .. } => "LEAGUE_SHORT_LINEUP",
            Self::DuplicateInLineup { .. } => "LEAGUE_DUPLICATE_IN_LINEUP",
            Self::NoPitcher(_) => "LEAGUE_NO_PITCHER",
            Self::UnknownTeam(_) => "LEAGUE_UNKNOWN_TEAM",
            Self::NotInitialized => "LEAGUE_NOT_INITIALIZED",
            Self::GameInProgress(_) => "LEAGUE_GAME_IN_PROGRESS",
        }
    }
}

/// Everything needed to start a league from scratch.
///
/// Ids are assigned by whoever produced the rosters; the engine keeps them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeagueSeed {
    pub seed: u32,
    pub year: u16,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
}

/// Replaces the whole league with a freshly seeded one.
///
/// The new league opens in the regular season with an unscheduled season
/// covering every team. The logical clock carries over so that dispatch
/// stamps stay monotonic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewLeagueAction {
    pub league: LeagueSeed,
}

impl NewLeagueAction {
    pub fn new(league: LeagueSeed) -> Self {
        Self { league }
    }
}

impl ActionTransition for NewLeagueAction {
    type Error = LeagueError;
    type Result = SeasonId;

    fn pre_validate(&self, _state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        let LeagueSeed { teams, players, .. } = &self.league;
        if teams.len() < 2 {
            return Err(LeagueError::TooFewTeams(teams.len()));
        }

        let mut player_ids = BTreeSet::new();
        for player in players {
            if !player_ids.insert(player.id) {
                return Err(LeagueError::DuplicatePlayer(player.id));
            }
        }

        let mut team_ids = BTreeSet::new();
        let mut rostered = BTreeSet::new();
        for team in teams {
            if !team_ids.insert(team.id) {
                return Err(LeagueError::DuplicateTeam(team.id));
            }
            for &player in &team.roster {
                if !player_ids.contains(&player) {
                    return Err(LeagueError::UnknownPlayer {
                        team: team.id,
                        player,
                    });
                }
                if !rostered.insert(player) {
                    return Err(LeagueError::MultipleTeams(player));
                }
            }
            for &player in team.lineup.iter().chain(&team.rotation) {
                if !team.roster.contains(&player) {
                    return Err(LeagueError::NotOnRoster {
                        team: team.id,
                        player,
                    });
                }
            }
            if team.lineup.len() < LINEUP_SIZE {
                return Err(LeagueError::ShortLineup {
                    team: team.id,
                    batters: team.lineup.len(),
                });
            }
            let mut batting = BTreeSet::new();
            for &player in &team.lineup {
                if !batting.insert(player) {
                    return Err(LeagueError::DuplicateInLineup {
                        team: team.id,
                        player,
                    });
                }
            }
            let has_pitcher = team.roster.iter().any(|id| {
                players
                    .iter()
                    .any(|player| player.id == *id && player.is_pitcher())
            });
            if !has_pitcher {
                return Err(LeagueError::NoPitcher(team.id));
            }
        }
        Ok(())
    }

    fn apply(&self, state: &mut LeagueState, _config: &SimConfig) -> Result<SeasonId, Self::Error> {
        let LeagueSeed {
            seed,
            year,
            teams,
            players,
        } = &self.league;

        let clock = state.clock;
        *state = LeagueState::with_seed(*seed);
        state.clock = clock;

        for player in players {
            state.players.insert(player.id, player.clone());
        }
        for team in teams {
            for id in &team.roster {
                if let Some(player) = state.players.get_mut(id) {
                    player.team_id = Some(team.id);
                }
            }
            state.teams.insert(team.id, team.clone());
        }

        let season_id = state.ids().next_season();
        let team_ids = state.teams.keys().copied().collect();
        state
            .seasons
            .insert(season_id, Season::new(season_id, *year, team_ids));
        state.pointers.season_id = Some(season_id);
        state.phase = LeaguePhase::RegularSeason;

        state.record(
            EventKind::LeagueCreated,
            EventRefs {
                season: Some(season_id),
                ..EventRefs::default()
            },
            format!(
                "{year} league created: {} teams, {} players",
                teams.len(),
                players.len()
            ),
        );
        tracing::info!(seed, year, teams = teams.len(), "league created");
        Ok(season_id)
    }

    fn post_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        debug_assert!(state.pointers.season_id.is_some());
        Ok(())
    }
}

/// Marks one club as the user's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectUserTeamAction {
    pub team_id: TeamId,
}

impl SelectUserTeamAction {
    pub fn new(team_id: TeamId) -> Self {
        Self { team_id }
    }
}

impl ActionTransition for SelectUserTeamAction {
    type Error = LeagueError;
    type Result = TeamId;

    fn pre_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        if state.phase == LeaguePhase::Uninitialized {
            return Err(LeagueError::NotInitialized);
        }
        if !state.teams.contains_key(&self.team_id) {
            return Err(LeagueError::UnknownTeam(self.team_id));
        }
        Ok(())
    }

    fn apply(&self, state: &mut LeagueState, _config: &SimConfig) -> Result<TeamId, Self::Error> {
        state.user_team_id = Some(self.team_id);
        let name = state
            .teams
            .get(&self.team_id)
            .map(|team| team.name.clone())
            .unwrap_or_else(|| self.team_id.to_string());
        state.record(
            EventKind::UserTeamSelected,
            EventRefs {
                team: Some(self.team_id),
                ..EventRefs::default()
            },
            format!("Now managing the {name}"),
        );
        Ok(self.team_id)
    }
}

/// Phase change reported by [`AdvancePhaseAction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseChange {
    pub from: LeaguePhase,
    pub to: LeaguePhase,
    /// Season opened by entering a new regular season.
    pub new_season: Option<SeasonId>,
}

/// Moves the league one step through its yearly cycle.
///
/// Leaving the offseason opens next year's season for every team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvancePhaseAction;

impl ActionTransition for AdvancePhaseAction {
    type Error = LeagueError;
    type Result = PhaseChange;

    fn pre_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        if state.phase.next().is_none() {
            return Err(LeagueError::NotInitialized);
        }
        if let Some(game) = state.pointers.game_id {
            return Err(LeagueError::GameInProgress(game));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut LeagueState,
        _config: &SimConfig,
    ) -> Result<PhaseChange, Self::Error> {
        let from = state.phase;
        let to = from.next().ok_or(LeagueError::NotInitialized)?;
        state.phase = to;

        let mut new_season = None;
        if from == LeaguePhase::Offseason {
            let year = state
                .current_season()
                .map_or(0, |season| season.year.saturating_add(1));
            let season_id = state.ids().next_season();
            let team_ids = state.teams.keys().copied().collect();
            state
                .seasons
                .insert(season_id, Season::new(season_id, year, team_ids));
            state.pointers.season_id = Some(season_id);
            new_season = Some(season_id);
        }

        state.record(
            EventKind::PhaseChanged,
            EventRefs {
                season: state.pointers.season_id,
                ..EventRefs::default()
            },
            format!("{from} -> {to}"),
        );
        tracing::info!(%from, %to, "league phase changed");
        Ok(PhaseChange {
            from,
            to,
            new_season,
        })
    }
}
