//! Half-inning boundaries and simulated half-innings.

use crate::config::SimConfig;
use crate::play::{PlayError, auto_call, call_pitch, pitching_profile};
use crate::state::{
    EventKind, EventRefs, GameId, HalfInning, HalfInningId, LeagueState, RunnerState, Side,
};

use super::at_bat::{AtBatAdvance, advance_at_bat, open_at_bat};
use super::game::{finalize_game, game_is_decided};

/// Outcome of crossing a half-inning boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HalfInningAdvance {
    /// The next half-inning started with its leadoff at-bat open.
    Started(HalfInningId),
    /// The game ended instead.
    GameOver(GameId),
}

/// Creates a half-inning for `game_id` and opens its leadoff at-bat.
///
/// Outs start at zero, the bases empty, and the lineup resumes at the
/// batting side's saved index.
pub(crate) fn start_half_inning(
    state: &mut LeagueState,
    game_id: GameId,
    inning_number: u16,
    side: Side,
) -> Result<HalfInningId, PlayError> {
    let game = state
        .games
        .get(&game_id)
        .ok_or_else(|| PlayError::missing("game", game_id))?;
    let batting = *game.batting(side);
    let fielding = *game.fielding(side);

    let id = state.ids().next_half_inning();
    state.half_innings.insert(
        id,
        HalfInning {
            id,
            game_id,
            inning_number,
            side,
            batting_team_id: batting.team_id,
            fielding_team_id: fielding.team_id,
            outs: 0,
            runner_state: RunnerState::Empty,
            lineup_index: batting.next_lineup_index,
            runs: 0,
            at_bat_ids: Vec::new(),
            current_at_bat_id: None,
        },
    );
    if let Some(game) = state.games.get_mut(&game_id) {
        game.half_inning_ids.push(id);
        game.current_half_inning_id = Some(id);
    }
    state.pointers.half_inning_id = Some(id);
    state.pointers.at_bat_id = None;

    let abbreviation = state.team_abbreviation(batting.team_id);
    state.record(
        EventKind::HalfInningStarted,
        EventRefs {
            game: Some(game_id),
            half_inning: Some(id),
            team: Some(batting.team_id),
            ..EventRefs::default()
        },
        format!("{side} {inning_number}: {abbreviation} batting"),
    );

    open_at_bat(state, id)?;
    Ok(id)
}

/// Crosses the boundary after a completed half-inning.
///
/// The game ends here when it is decided; otherwise the side flips, and the
/// inning number increments only after a bottom half.
pub fn advance_half_inning(
    state: &mut LeagueState,
    config: &SimConfig,
) -> Result<HalfInningAdvance, PlayError> {
    let game_id = state.pointers.game_id.ok_or(PlayError::NoActiveGame)?;
    let game = state
        .games
        .get(&game_id)
        .ok_or_else(|| PlayError::missing("game", game_id))?;
    if game.is_final() {
        return Err(PlayError::GameFinal(game_id));
    }
    let half_id = state
        .pointers
        .half_inning_id
        .ok_or(PlayError::NoActiveGame)?;
    let half = state
        .half_innings
        .get(&half_id)
        .ok_or_else(|| PlayError::missing("half-inning", half_id))?;
    if !half.is_complete() {
        return Err(PlayError::HalfInningInProgress(half_id));
    }

    let (inning, side) = match half.side {
        Side::Top => (half.inning_number, Side::Bottom),
        Side::Bottom => (half.inning_number + 1, Side::Top),
    };
    if game_is_decided(game, half, config) {
        finalize_game(state, game_id)?;
        return Ok(HalfInningAdvance::GameOver(game_id));
    }

    let next = start_half_inning(state, game_id, inning, side)?;
    Ok(HalfInningAdvance::Started(next))
}

/// Plays the current half-inning to its end with automatic pitch calls,
/// then crosses the boundary.
pub fn sim_half_inning(
    state: &mut LeagueState,
    config: &SimConfig,
) -> Result<HalfInningAdvance, PlayError> {
    let game_id = state.pointers.game_id.ok_or(PlayError::NoActiveGame)?;

    while let Some(at_bat_id) = state.pointers.at_bat_id {
        let at_bat = state
            .at_bats
            .get(&at_bat_id)
            .ok_or_else(|| PlayError::missing("at-bat", at_bat_id))?;

        if !at_bat.is_resolved() {
            let profile = pitching_profile(state, at_bat);
            let count = at_bat.count;
            let mut rng = state.rng;
            let call = auto_call(&profile, count, &mut rng);
            state.rng = rng;
            call_pitch(state, call)?;
            continue;
        }

        match advance_at_bat(state, config)? {
            AtBatAdvance::NextBatter(_) => {}
            AtBatAdvance::HalfInningOver(_) => break,
            AtBatAdvance::WalkOff(_) => return Ok(HalfInningAdvance::GameOver(game_id)),
        }
    }

    advance_half_inning(state, config)
}
