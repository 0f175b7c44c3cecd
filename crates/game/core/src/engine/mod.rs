//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative writer of [`LeagueState`]. It
//! drives each action through its transition phases, advances the logical
//! clock and reports what changed. [`dispatch`] and [`reducer`] wrap it in a
//! pure `(state, action) -> state'` surface.

mod errors;
mod reducer;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use reducer::{Dispatch, FollowUpQueue, Settled, dispatch, reducer, run_to_quiescence};

use crate::action::{Action, ActionResult};
use crate::config::SimConfig;
use crate::invariants::assert_invariants;
use crate::state::{LeagueState, StateDelta};

/// Complete outcome of action execution.
///
/// Contains both state change metadata (delta) and the action-specific
/// result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// State change metadata (which fields changed).
    pub delta: StateDelta,

    /// Action-specific execution result (pitch outcome, day report, etc.).
    pub action_result: ActionResult,
}

/// Engine that executes actions against one league state.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
///
/// Execution is transactional: when any phase fails the state is restored to
/// what it was before the call.
pub struct GameEngine<'a> {
    state: &'a mut LeagueState,
    config: &'a SimConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut LeagueState, config: &'a SimConfig) -> Self {
        Self { state, config }
    }

    /// Executes an action by routing it through its transition pipeline.
    ///
    /// On success the logical clock advances by one and the returned delta
    /// compares the state before and after. With
    /// [`SimConfig::check_invariants`] set, the new state is checked and a
    /// violation panics.
    pub fn execute(&mut self, action: &Action) -> Result<ExecutionOutcome, ExecuteError> {
        let before = self.state.clone();

        let action_result = match transition::execute_transition(action, self.state, self.config) {
            Ok(result) => result,
            Err(error) => {
                *self.state = before;
                return Err(error);
            }
        };

        self.state.clock = before.clock.next();

        if self.config.check_invariants {
            assert_invariants(self.state);
        }

        let delta = StateDelta::from_states(action.clone(), &before, self.state);
        tracing::trace!(
            action = %action.kind(),
            clock = %self.state.clock,
            fields = ?delta.fields,
            "action executed"
        );
        Ok(ExecutionOutcome {
            delta,
            action_result,
        })
    }
}

#[cfg(test)]
mod tests;
