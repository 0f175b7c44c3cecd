//! Game lifecycle: creation, the end-of-game rule, finalization and the
//! bounded game loop.

use crate::config::SimConfig;
use crate::play::PlayError;
use crate::state::{
    EventKind, EventRefs, Game, GameId, GameSide, GameStatus, HalfInning, LeagueState, PlayerId,
    Score, SeasonId, Side, TeamId,
};

use super::box_score::build_box_score;
use super::half_inning::{HalfInningAdvance, sim_half_inning, start_half_inning};
use super::season::fold_game_into_season;

/// Result of running the game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameRun {
    pub game_id: GameId,
    /// Half-innings crossed by this loop.
    pub half_innings: u32,
    /// False when the safety cap stopped the loop before the game ended.
    pub completed: bool,
}

impl GameRun {
    /// Error describing a loop that hit its cap, if this one did.
    pub fn runaway(&self, config: &SimConfig) -> Option<PlayError> {
        (!self.completed).then_some(PlayError::RunawayLoop {
            game_id: self.game_id,
            cap: config.max_half_innings,
        })
    }
}

/// Starter for `team_id`: the rotation's next arm, else the first pitcher on
/// the roster.
fn starting_pitcher(state: &LeagueState, team_id: TeamId) -> Result<PlayerId, PlayError> {
    let team = state
        .teams
        .get(&team_id)
        .ok_or_else(|| PlayError::missing("team", team_id))?;
    if team.lineup.is_empty() {
        return Err(PlayError::EmptyLineup(team_id));
    }
    let starter = team
        .next_starter()
        .filter(|id| state.players.contains_key(id))
        .or_else(|| {
            team.roster
                .iter()
                .copied()
                .find(|id| state.players.get(id).is_some_and(|p| p.is_pitcher()))
        });
    starter.ok_or(PlayError::NoStartingPitcher(team_id))
}

/// Materializes a scheduled game. Nothing is played yet.
pub(crate) fn create_game(
    state: &mut LeagueState,
    home: TeamId,
    away: TeamId,
    season_id: Option<SeasonId>,
    schedule_index: Option<usize>,
) -> Result<GameId, PlayError> {
    if let Some(active) = state.pointers.game_id {
        return Err(PlayError::GameAlreadyActive(active));
    }
    if home == away {
        return Err(PlayError::SameTeam(home));
    }
    let home_pitcher = starting_pitcher(state, home)?;
    let away_pitcher = starting_pitcher(state, away)?;

    let id = state.ids().next_game();
    state.games.insert(
        id,
        Game {
            id,
            season_id,
            schedule_index,
            home: GameSide {
                team_id: home,
                pitcher_id: home_pitcher,
                next_lineup_index: 0,
            },
            away: GameSide {
                team_id: away,
                pitcher_id: away_pitcher,
                next_lineup_index: 0,
            },
            status: GameStatus::Scheduled,
            score: Score::default(),
            half_inning_ids: Vec::new(),
            current_half_inning_id: None,
        },
    );
    Ok(id)
}

/// Moves a scheduled game in progress and opens the top of the first.
pub(crate) fn begin_game(state: &mut LeagueState, game_id: GameId) -> Result<(), PlayError> {
    let game = state
        .games
        .get_mut(&game_id)
        .ok_or_else(|| PlayError::missing("game", game_id))?;
    match game.status {
        GameStatus::Scheduled => {}
        GameStatus::InProgress => return Err(PlayError::GameAlreadyActive(game_id)),
        GameStatus::Final => return Err(PlayError::GameFinal(game_id)),
    }
    game.status = GameStatus::InProgress;
    let (home, away, season) = (game.home.team_id, game.away.team_id, game.season_id);
    state.pointers.game_id = Some(game_id);

    let description = format!(
        "{} at {}",
        state.team_abbreviation(away),
        state.team_abbreviation(home)
    );
    state.record(
        EventKind::GameStarted,
        EventRefs {
            season,
            game: Some(game_id),
            ..EventRefs::default()
        },
        description,
    );
    tracing::debug!(game = %game_id, %home, %away, "game started");

    start_half_inning(state, game_id, 1, Side::Top)?;
    Ok(())
}

/// Creates and begins a game in one step.
pub fn start_game(
    state: &mut LeagueState,
    home: TeamId,
    away: TeamId,
    season_id: Option<SeasonId>,
    schedule_index: Option<usize>,
) -> Result<GameId, PlayError> {
    let id = create_game(state, home, away, season_id, schedule_index)?;
    begin_game(state, id)?;
    Ok(id)
}

/// End-of-game rule applied at a completed half-inning.
///
/// From the regulation inning on: after a top half the game ends if the home
/// team leads; after a bottom half it ends if the score is not tied.
pub fn game_is_decided(game: &Game, half: &HalfInning, config: &SimConfig) -> bool {
    if half.inning_number < config.regulation_innings {
        return false;
    }
    match half.side {
        Side::Top => game.score.home > game.score.away,
        Side::Bottom => game.score.home != game.score.away,
    }
}

/// Marks the game final and folds it into everything downstream.
///
/// Builds the box score, clears the game pointers, advances both rotations
/// and, for season games, updates standings and the schedule cursor.
pub fn finalize_game(state: &mut LeagueState, game_id: GameId) -> Result<(), PlayError> {
    let game = state
        .games
        .get_mut(&game_id)
        .ok_or_else(|| PlayError::missing("game", game_id))?;
    if game.is_final() {
        return Err(PlayError::GameFinal(game_id));
    }
    game.status = GameStatus::Final;
    game.current_half_inning_id = None;
    let game = game.clone();

    if let Some(half_id) = game.half_inning_ids.last() {
        if let Some(half) = state.half_innings.get_mut(half_id) {
            half.current_at_bat_id = None;
        }
    }
    if state.pointers.game_id == Some(game_id) {
        state.pointers.clear_game();
    }

    let box_score = build_box_score(state, game_id)?;
    let summary = box_score.summary.clone();
    state.box_scores.insert(game_id, box_score);

    for team_id in [game.home.team_id, game.away.team_id] {
        if let Some(team) = state.teams.get_mut(&team_id) {
            team.advance_rotation();
        }
    }

    state.record(
        EventKind::GameFinal,
        EventRefs {
            season: game.season_id,
            game: Some(game_id),
            team: game.winner(),
            ..EventRefs::default()
        },
        summary,
    );
    tracing::debug!(
        game = %game_id,
        home = game.score.home,
        away = game.score.away,
        "game final"
    );

    if game.season_id.is_some() {
        fold_game_into_season(state, &game)?;
    }
    Ok(())
}

/// Simulates the active game to its end.
///
/// Stops early, leaving the game in progress, once `max_half_innings`
/// half-innings have been crossed.
pub fn run_game(state: &mut LeagueState, config: &SimConfig) -> Result<GameRun, PlayError> {
    let game_id = state.pointers.game_id.ok_or(PlayError::NoActiveGame)?;
    let mut half_innings = 0;

    loop {
        if half_innings >= config.max_half_innings {
            tracing::warn!(
                game = %game_id,
                cap = config.max_half_innings,
                "game loop hit safety cap"
            );
            return Ok(GameRun {
                game_id,
                half_innings,
                completed: false,
            });
        }
        half_innings += 1;
        if let HalfInningAdvance::GameOver(_) = sim_half_inning(state, config)? {
            return Ok(GameRun {
                game_id,
                half_innings,
                completed: true,
            });
        }
    }
}
