//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionResult, ActionTransition};
use crate::config::SimConfig;
use crate::state::LeagueState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns its
/// result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the league state and return the result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut LeagueState,
    config: &SimConfig,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes an action to its transition and wraps the result.
///
/// The state may be partially written when this returns an error; callers
/// are responsible for discarding it.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut LeagueState,
    config: &SimConfig,
) -> Result<ActionResult, ExecuteError> {
    let result = match action {
        Action::NewLeague(t) => ActionResult::LeagueCreated(
            drive_transition(t, state, config).map_err(ExecuteError::NewLeague)?,
        ),
        Action::StartGame(t) => ActionResult::GameStarted(
            drive_transition(t, state, config).map_err(ExecuteError::StartGame)?,
        ),
        Action::SelectUserTeam(t) => ActionResult::UserTeamSelected(
            drive_transition(t, state, config).map_err(ExecuteError::SelectUserTeam)?,
        ),
        Action::CallPitch(t) => ActionResult::Pitch(
            drive_transition(t, state, config).map_err(ExecuteError::CallPitch)?,
        ),
        Action::AdvanceAtBat(t) => ActionResult::AtBat(
            drive_transition(t, state, config).map_err(ExecuteError::AdvanceAtBat)?,
        ),
        Action::AdvanceHalfInning(t) => ActionResult::HalfInning(
            drive_transition(t, state, config).map_err(ExecuteError::AdvanceHalfInning)?,
        ),
        Action::SimHalfInning(t) => ActionResult::HalfInning(
            drive_transition(t, state, config).map_err(ExecuteError::SimHalfInning)?,
        ),
        Action::SimGame(t) => {
            ActionResult::Game(drive_transition(t, state, config).map_err(ExecuteError::SimGame)?)
        }
        Action::SimDay(t) => {
            ActionResult::Day(drive_transition(t, state, config).map_err(ExecuteError::SimDay)?)
        }
        Action::SimSeason(t) => ActionResult::Season(
            drive_transition(t, state, config).map_err(ExecuteError::SimSeason)?,
        ),
        Action::AdvancePhase(t) => ActionResult::PhaseChanged(
            drive_transition(t, state, config).map_err(ExecuteError::AdvancePhase)?,
        ),
        Action::ProposeTrade(t) => ActionResult::TradeProposed(
            drive_transition(t, state, config).map_err(ExecuteError::ProposeTrade)?,
        ),
        Action::AcceptTradeProposal(t) => ActionResult::TradeDecided(
            drive_transition(t, state, config).map_err(ExecuteError::AcceptTrade)?,
        ),
        Action::RejectTradeProposal(t) => ActionResult::TradeDecided(
            drive_transition(t, state, config).map_err(ExecuteError::RejectTrade)?,
        ),
    };
    Ok(result)
}
