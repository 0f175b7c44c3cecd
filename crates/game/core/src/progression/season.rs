//! Season loop: schedule generation, daily simulation and stat folding.

use crate::config::SimConfig;
use crate::env::shuffle;
use crate::play::PlayError;
use crate::state::{
    EventKind, EventRefs, Game, GameId, LeagueState, ScheduledGame, Season, SeasonId,
    SeasonStatus, Standing, TeamId,
};

use super::game::{GameRun, begin_game, create_game, run_game};

/// Every unordered team pair meets `per_matchup` times, alternating home.
pub fn round_robin(team_ids: &[TeamId], per_matchup: u32) -> Vec<ScheduledGame> {
    let mut schedule = Vec::new();
    for (i, &first) in team_ids.iter().enumerate() {
        for &second in &team_ids[i + 1..] {
            for meeting in 0..per_matchup {
                let (home, away) = if meeting % 2 == 0 {
                    (first, second)
                } else {
                    (second, first)
                };
                schedule.push(ScheduledGame { home, away });
            }
        }
    }
    schedule
}

/// Games played per simulated day.
pub fn games_per_day(team_count: usize) -> usize {
    (team_count / 2).max(1)
}

fn active_season_id(state: &LeagueState) -> Result<SeasonId, PlayError> {
    let season_id = state.pointers.season_id.ok_or(PlayError::NoSeason)?;
    if !state.seasons.contains_key(&season_id) {
        return Err(PlayError::missing("season", season_id));
    }
    Ok(season_id)
}

/// First tick of a season: build and shuffle the schedule.
///
/// A season that is already active is left alone. The shuffle draws from the
/// league stream, so the order is fixed by the seed.
pub fn ensure_schedule(state: &mut LeagueState, config: &SimConfig) -> Result<SeasonId, PlayError> {
    let season_id = active_season_id(state)?;
    let season = state
        .seasons
        .get(&season_id)
        .ok_or_else(|| PlayError::missing("season", season_id))?;
    match season.status {
        SeasonStatus::Complete => return Err(PlayError::SeasonComplete(season_id)),
        SeasonStatus::Active => return Ok(season_id),
        SeasonStatus::Scheduled => {}
    }

    let mut schedule = round_robin(&season.team_ids, config.games_per_matchup);
    let mut rng = state.rng;
    shuffle(&mut schedule, &mut rng);
    state.rng = rng;

    let total = schedule.len();
    let season = state
        .seasons
        .get_mut(&season_id)
        .ok_or_else(|| PlayError::missing("season", season_id))?;
    season.schedule = schedule;
    season.status = SeasonStatus::Active;
    let year = season.year;

    state.record(
        EventKind::SeasonScheduled,
        EventRefs {
            season: Some(season_id),
            ..EventRefs::default()
        },
        format!("{year} season: {total} games scheduled"),
    );
    tracing::debug!(season = %season_id, games = total, "season scheduled");

    if total == 0 {
        complete_season(state, season_id);
    }
    Ok(season_id)
}

fn complete_season(state: &mut LeagueState, season_id: SeasonId) {
    let Some(season) = state.seasons.get_mut(&season_id) else {
        return;
    };
    season.status = SeasonStatus::Complete;
    let leader = season.sorted_standings().first().map(|row| row.team_id);
    let year = season.year;

    let description = match leader {
        Some(team) => format!(
            "{year} regular season complete; {} finishes first",
            state.team_abbreviation(team)
        ),
        None => format!("{year} regular season complete"),
    };
    state.record(
        EventKind::SeasonComplete,
        EventRefs {
            season: Some(season_id),
            team: leader,
            ..EventRefs::default()
        },
        description,
    );
    tracing::info!(season = %season_id, "season complete");
}

/// Materializes and starts the schedule entry under the cursor.
pub fn start_next_scheduled(
    state: &mut LeagueState,
    config: &SimConfig,
) -> Result<GameId, PlayError> {
    if let Some(active) = state.pointers.game_id {
        return Err(PlayError::GameAlreadyActive(active));
    }
    let season_id = ensure_schedule(state, config)?;
    let season = state
        .seasons
        .get(&season_id)
        .ok_or_else(|| PlayError::missing("season", season_id))?;
    let index = season.current_game_index;
    let entry = *season
        .schedule
        .get(index)
        .ok_or(PlayError::SeasonComplete(season_id))?;

    let game_id = create_game(state, entry.home, entry.away, Some(season_id), Some(index))?;
    if let Some(season) = state.seasons.get_mut(&season_id) {
        season.game_ids.push(game_id);
    }
    begin_game(state, game_id)?;
    Ok(game_id)
}

/// Updates standings, batting totals and the schedule cursor for a final
/// season game.
pub(crate) fn fold_game_into_season(state: &mut LeagueState, game: &Game) -> Result<(), PlayError> {
    let Some(season_id) = game.season_id else {
        return Ok(());
    };
    let batting_lines: Vec<_> = state
        .box_scores
        .get(&game.id)
        .map(|box_score| {
            box_score
                .away
                .batters
                .iter()
                .chain(box_score.home.batters.iter())
                .map(|batter| (batter.player_id, batter.line))
                .collect()
        })
        .unwrap_or_default();

    let season = state
        .seasons
        .get_mut(&season_id)
        .ok_or_else(|| PlayError::missing("season", season_id))?;

    let (home, away) = (game.home.team_id, game.away.team_id);
    let (home_runs, away_runs) = (u32::from(game.score.home), u32::from(game.score.away));
    for (team, scored, allowed) in [(home, home_runs, away_runs), (away, away_runs, home_runs)] {
        let row = season
            .standings
            .entry(team)
            .or_insert_with(|| Standing::new(team));
        row.runs_scored += scored;
        row.runs_allowed += allowed;
        match scored.cmp(&allowed) {
            core::cmp::Ordering::Greater => row.wins += 1,
            core::cmp::Ordering::Less => row.losses += 1,
            core::cmp::Ordering::Equal => row.ties += 1,
        }
    }
    for (player_id, line) in batting_lines {
        season.batting.entry(player_id).or_default().merge(&line);
    }

    if game.schedule_index == Some(season.current_game_index) {
        season.current_game_index += 1;
    }
    let finished = season.current_game_index >= season.schedule.len();
    if finished && season.status == SeasonStatus::Active {
        complete_season(state, season_id);
    }
    Ok(())
}

/// Summary of one simulated day.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayReport {
    pub season_id: SeasonId,
    pub day: u32,
    pub games: Vec<GameId>,
    /// Game left in progress by the loop's safety cap.
    pub runaway: Option<GameRun>,
    pub season_complete: bool,
}

/// Plays the next `floor(teams / 2)` scheduled games.
///
/// A game that trips the safety cap ends the day early and is reported in
/// [`DayReport::runaway`].
pub fn sim_day(state: &mut LeagueState, config: &SimConfig) -> Result<DayReport, PlayError> {
    if let Some(active) = state.pointers.game_id {
        return Err(PlayError::GameAlreadyActive(active));
    }
    let season_id = ensure_schedule(state, config)?;
    let season = state
        .seasons
        .get_mut(&season_id)
        .ok_or_else(|| PlayError::missing("season", season_id))?;
    if season.is_complete() {
        return Err(PlayError::SeasonComplete(season_id));
    }
    season.day += 1;
    let day = season.day;
    let slots = games_per_day(season.team_ids.len());

    let mut games = Vec::with_capacity(slots);
    let mut runaway = None;
    for _ in 0..slots {
        if is_complete(state, season_id) {
            break;
        }
        let game_id = start_next_scheduled(state, config)?;
        let run = run_game(state, config)?;
        games.push(game_id);
        if !run.completed {
            runaway = Some(run);
            break;
        }
    }

    let season_complete = is_complete(state, season_id);
    state.record(
        EventKind::SeasonDay,
        EventRefs {
            season: Some(season_id),
            ..EventRefs::default()
        },
        format!("Day {day}: {} game(s) played", games.len()),
    );
    tracing::debug!(season = %season_id, day, games = games.len(), "season day simulated");

    Ok(DayReport {
        season_id,
        day,
        games,
        runaway,
        season_complete,
    })
}

fn is_complete(state: &LeagueState, season_id: SeasonId) -> bool {
    state
        .seasons
        .get(&season_id)
        .is_none_or(Season::is_complete)
}

/// Summary of a season simulated to its end.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonReport {
    pub season_id: SeasonId,
    pub days: u32,
    pub games_played: usize,
    pub runaway: Option<GameRun>,
    pub complete: bool,
}

/// Simulates days until the season completes or a game runs away.
pub fn sim_season(state: &mut LeagueState, config: &SimConfig) -> Result<SeasonReport, PlayError> {
    let season_id = ensure_schedule(state, config)?;
    let mut report = SeasonReport {
        season_id,
        days: 0,
        games_played: 0,
        runaway: None,
        complete: is_complete(state, season_id),
    };

    while !report.complete {
        let day = sim_day(state, config)?;
        report.days += 1;
        report.games_played += day.games.len();
        report.complete = day.season_complete;
        if day.runaway.is_some() {
            report.runaway = day.runaway;
            break;
        }
    }
    Ok(report)
}
