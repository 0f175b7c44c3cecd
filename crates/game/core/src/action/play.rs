//! Step-by-step game actions: starting a game, calling pitches and crossing
//! at-bat and half-inning boundaries by hand.

use crate::config::SimConfig;
use crate::play::{PitchOutcome, PlayError, call_pitch, pitchable_at_bat};
use crate::progression::{
    AtBatAdvance, HalfInningAdvance, advance_at_bat, advance_half_inning, start_game,
    start_next_scheduled,
};
use crate::state::{GameId, LeagueState, PitchCall, TeamId};

use super::ActionTransition;

/// Games and seasons only move during the regular season and postseason.
pub(super) fn require_simulation_phase(state: &LeagueState) -> Result<(), PlayError> {
    if state.phase.allows_simulation() {
        Ok(())
    } else {
        Err(PlayError::InvalidPhase(state.phase))
    }
}

/// Which game to start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStart {
    /// A standalone game outside the schedule.
    Exhibition { home: TeamId, away: TeamId },
    /// The schedule entry under the season cursor.
    NextScheduled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartGameAction {
    pub start: GameStart,
}

impl StartGameAction {
    pub fn exhibition(home: TeamId, away: TeamId) -> Self {
        Self {
            start: GameStart::Exhibition { home, away },
        }
    }

    pub fn next_scheduled() -> Self {
        Self {
            start: GameStart::NextScheduled,
        }
    }
}

impl ActionTransition for StartGameAction {
    type Error = PlayError;
    type Result = GameId;

    fn pre_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        require_simulation_phase(state)?;
        if let Some(active) = state.pointers.game_id {
            return Err(PlayError::GameAlreadyActive(active));
        }
        if let GameStart::Exhibition { home, away } = self.start {
            for team in [home, away] {
                if !state.teams.contains_key(&team) {
                    return Err(PlayError::missing("team", team));
                }
            }
        }
        Ok(())
    }

    fn apply(&self, state: &mut LeagueState, config: &SimConfig) -> Result<GameId, Self::Error> {
        match self.start {
            GameStart::Exhibition { home, away } => start_game(state, home, away, None, None),
            GameStart::NextScheduled => start_next_scheduled(state, config),
        }
    }

    fn post_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        // a started game always has its leadoff at-bat open
        pitchable_at_bat(state).map(|_| ())
    }
}

/// One pitch against the open at-bat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallPitchAction {
    pub call: PitchCall,
}

impl CallPitchAction {
    pub fn new(call: PitchCall) -> Self {
        Self { call }
    }
}

impl ActionTransition for CallPitchAction {
    type Error = PlayError;
    type Result = PitchOutcome;

    fn pre_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        pitchable_at_bat(state).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut LeagueState,
        _config: &SimConfig,
    ) -> Result<PitchOutcome, Self::Error> {
        call_pitch(state, self.call)
    }

    fn post_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        if let Some(at_bat) = state.current_at_bat() {
            debug_assert!(at_bat.count.is_valid(), "count out of bounds: {:?}", at_bat.count);
        }
        Ok(())
    }
}

/// Applies the resolved at-bat and brings up the next batter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvanceAtBatAction;

impl ActionTransition for AdvanceAtBatAction {
    type Error = PlayError;
    type Result = AtBatAdvance;

    fn pre_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        let at_bat = state.current_at_bat().ok_or(PlayError::NoActiveAtBat)?;
        if !at_bat.is_resolved() {
            return Err(PlayError::AtBatOpen(at_bat.id));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut LeagueState,
        config: &SimConfig,
    ) -> Result<AtBatAdvance, Self::Error> {
        advance_at_bat(state, config)
    }

    fn post_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        if let Some(half) = state.current_half_inning() {
            debug_assert!(half.outs <= crate::state::HalfInning::MAX_OUTS);
        }
        Ok(())
    }
}

/// Crosses the boundary after a completed half-inning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvanceHalfInningAction;

impl ActionTransition for AdvanceHalfInningAction {
    type Error = PlayError;
    type Result = HalfInningAdvance;

    fn apply(
        &self,
        state: &mut LeagueState,
        config: &SimConfig,
    ) -> Result<HalfInningAdvance, Self::Error> {
        advance_half_inning(state, config)
    }
}
