//! At-bat lifecycle: open the next batter, apply a resolved result.

use crate::config::SimConfig;
use crate::play::{PlayError, settle};
use crate::state::{
    AtBat, AtBatId, EventKind, EventRefs, GameId, HalfInning, HalfInningId, LeagueState, Side,
};

use super::game::finalize_game;

/// Where the league stands after a resolved at-bat was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AtBatAdvance {
    /// Fewer than three outs; the next batter is up.
    NextBatter(AtBatId),
    /// The third out was recorded.
    HalfInningOver(HalfInningId),
    /// The home team took the lead in the last half of a decided inning.
    WalkOff(GameId),
}

/// Opens an at-bat for the batter due up in `half_id`.
pub(crate) fn open_at_bat(
    state: &mut LeagueState,
    half_id: HalfInningId,
) -> Result<AtBatId, PlayError> {
    let half = state
        .half_innings
        .get(&half_id)
        .ok_or_else(|| PlayError::missing("half-inning", half_id))?;
    let game = state
        .games
        .get(&half.game_id)
        .ok_or_else(|| PlayError::missing("game", half.game_id))?;
    let team = state
        .teams
        .get(&half.batting_team_id)
        .ok_or_else(|| PlayError::missing("team", half.batting_team_id))?;
    let batter_id = team
        .batter_at(half.lineup_index)
        .ok_or(PlayError::EmptyLineup(team.id))?;
    let pitcher_id = game.fielding(half.side).pitcher_id;

    let id = state.ids().next_at_bat();
    state
        .at_bats
        .insert(id, AtBat::open(id, half_id, batter_id, pitcher_id));
    if let Some(half) = state.half_innings.get_mut(&half_id) {
        half.at_bat_ids.push(id);
        half.current_at_bat_id = Some(id);
    }
    state.pointers.at_bat_id = Some(id);
    Ok(id)
}

fn is_walk_off(state: &LeagueState, half: &HalfInning, config: &SimConfig) -> bool {
    if half.side != Side::Bottom || half.inning_number < config.regulation_innings {
        return false;
    }
    state
        .games
        .get(&half.game_id)
        .is_some_and(|game| game.score.home > game.score.away)
}

/// Applies the resolved at-bat the pointer names to its half-inning.
///
/// Outs, runs and occupancy come from [`settle`]. With fewer than three outs
/// the next lineup slot comes up against the same pitcher.
pub fn advance_at_bat(
    state: &mut LeagueState,
    config: &SimConfig,
) -> Result<AtBatAdvance, PlayError> {
    let at_bat_id = state.pointers.at_bat_id.ok_or(PlayError::NoActiveAtBat)?;
    let at_bat = state
        .at_bats
        .get(&at_bat_id)
        .ok_or_else(|| PlayError::missing("at-bat", at_bat_id))?;
    let result = at_bat.result.ok_or(PlayError::AtBatOpen(at_bat_id))?;
    let batter_id = at_bat.batter_id;
    let half_id = at_bat.half_inning_id;
    let play = at_bat.play.clone();

    let half = state
        .half_innings
        .get(&half_id)
        .ok_or_else(|| PlayError::missing("half-inning", half_id))?;
    let lineup_len = state
        .teams
        .get(&half.batting_team_id)
        .map(|team| team.lineup.len())
        .ok_or_else(|| PlayError::missing("team", half.batting_team_id))?;
    let settled = settle(half.runner_state, batter_id, result, play.as_ref());

    let half = state
        .half_innings
        .get_mut(&half_id)
        .ok_or_else(|| PlayError::missing("half-inning", half_id))?;
    half.outs = (half.outs + settled.outs).min(HalfInning::MAX_OUTS);
    half.runs += u16::from(settled.runs);
    half.runner_state = settled.runners;
    half.current_at_bat_id = None;
    let next_index = match lineup_len {
        0 => 0,
        len => (half.lineup_index + 1) % len,
    };
    let half = half.clone();
    state.pointers.at_bat_id = None;

    if let Some(game) = state.games.get_mut(&half.game_id) {
        game.score.add(half.side, u16::from(settled.runs));
    }
    if settled.runs > 0 {
        tracing::debug!(half = %half.id, runs = settled.runs, "runs scored");
    }

    if is_walk_off(state, &half, config) {
        finalize_game(state, half.game_id)?;
        return Ok(AtBatAdvance::WalkOff(half.game_id));
    }

    if half.is_complete() {
        if let Some(game) = state.games.get_mut(&half.game_id) {
            game.batting_mut(half.side).next_lineup_index = next_index;
        }
        let batting = state.team_abbreviation(half.batting_team_id);
        state.record(
            EventKind::HalfInningEnded,
            EventRefs {
                game: Some(half.game_id),
                half_inning: Some(half.id),
                team: Some(half.batting_team_id),
                ..EventRefs::default()
            },
            format!(
                "End of {} {}: {} {} run(s), {} left on base",
                half.side,
                half.inning_number,
                batting,
                half.runs,
                half.runner_state.runner_count()
            ),
        );
        return Ok(AtBatAdvance::HalfInningOver(half.id));
    }

    if let Some(entry) = state.half_innings.get_mut(&half_id) {
        entry.lineup_index = next_index;
    }
    let next = open_at_bat(state, half_id)?;
    Ok(AtBatAdvance::NextBatter(next))
}
