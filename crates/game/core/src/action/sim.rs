//! Bulk simulation actions. Each one runs an automatic loop to a boundary in a
//! single dispatch.

use crate::config::SimConfig;
use crate::play::PlayError;
use crate::progression::{
    DayReport, GameRun, HalfInningAdvance, SeasonReport, run_game, sim_day, sim_half_inning,
    sim_season,
};
use crate::state::LeagueState;

use super::ActionTransition;
use super::play::require_simulation_phase;

fn require_active_game(state: &LeagueState) -> Result<(), PlayError> {
    let game_id = state.pointers.game_id.ok_or(PlayError::NoActiveGame)?;
    match state.games.get(&game_id) {
        Some(game) if game.is_final() => Err(PlayError::GameFinal(game_id)),
        Some(_) => Ok(()),
        None => Err(PlayError::missing("game", game_id)),
    }
}

/// Plays the current half-inning out with automatic pitch calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimHalfInningAction;

impl ActionTransition for SimHalfInningAction {
    type Error = PlayError;
    type Result = HalfInningAdvance;

    fn pre_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        require_simulation_phase(state)?;
        require_active_game(state)
    }

    fn apply(
        &self,
        state: &mut LeagueState,
        config: &SimConfig,
    ) -> Result<HalfInningAdvance, Self::Error> {
        sim_half_inning(state, config)
    }
}

/// Plays the current game to its end, bounded by the half-inning cap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimGameAction;

impl ActionTransition for SimGameAction {
    type Error = PlayError;
    type Result = GameRun;

    fn pre_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        require_simulation_phase(state)?;
        require_active_game(state)
    }

    fn apply(&self, state: &mut LeagueState, config: &SimConfig) -> Result<GameRun, Self::Error> {
        run_game(state, config)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimDayAction;

impl ActionTransition for SimDayAction {
    type Error = PlayError;
    type Result = DayReport;

    fn pre_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        require_simulation_phase(state)?;
        if let Some(active) = state.pointers.game_id {
            return Err(PlayError::GameAlreadyActive(active));
        }
        Ok(())
    }

    fn apply(&self, state: &mut LeagueState, config: &SimConfig) -> Result<DayReport, Self::Error> {
        sim_day(state, config)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimSeasonAction;

impl ActionTransition for SimSeasonAction {
    type Error = PlayError;
    type Result = SeasonReport;

    fn pre_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        require_simulation_phase(state)?;
        if let Some(active) = state.pointers.game_id {
            return Err(PlayError::GameAlreadyActive(active));
        }
        let season = state.current_season().ok_or(PlayError::NoSeason)?;
        if season.is_complete() {
            return Err(PlayError::SeasonComplete(season.id));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut LeagueState,
        config: &SimConfig,
    ) -> Result<SeasonReport, Self::Error> {
        sim_season(state, config)
    }

    fn post_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        // a completed season leaves no game open
        match (state.current_season(), state.pointers.game_id) {
            (Some(season), Some(game)) if season.is_complete() => {
                Err(PlayError::GameAlreadyActive(game))
            }
            _ => Ok(()),
        }
    }
}
