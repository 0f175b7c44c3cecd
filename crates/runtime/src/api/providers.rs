//! Asynchronous abstraction for sourcing manager decisions.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a session can
//! run with human input, scripted fixtures, or an automatic manager.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use ballpark_core::{
    Action, LeagueState, PitcherProfile, RngState,
    play::auto_call,
};

use super::errors::{Result, RuntimeError};

/// Trait for providing actions based on the current league state.
///
/// Different implementations can handle:
/// - User input (from a UI or CLI)
/// - Automatic pitch calling
/// - Scripted/replayed actions
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Next action to submit, or `None` when the provider has nothing to do
    /// in this state.
    async fn provide_action(&self, state: &LeagueState) -> Result<Option<Action>>;
}

/// Calls every pitch of the active at-bat the way the simulation does.
///
/// The manager draws from its own stream, seeded separately from the
/// league's, so its choices never shift the league's draws.
pub struct AutoManager {
    rng: Mutex<RngState>,
}

impl AutoManager {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: Mutex::new(RngState::new(seed)),
        }
    }
}

#[async_trait]
impl ActionProvider for AutoManager {
    async fn provide_action(&self, state: &LeagueState) -> Result<Option<Action>> {
        let Some(at_bat) = state.current_at_bat().filter(|ab| !ab.is_resolved()) else {
            return Ok(None);
        };
        let profile = state
            .players
            .get(&at_bat.pitcher_id)
            .and_then(|pitcher| pitcher.pitching.clone())
            .unwrap_or_else(PitcherProfile::default);

        let mut rng = self.rng.lock().map_err(|_| RuntimeError::ProviderPoisoned)?;
        let call = auto_call(&profile, at_bat.count, &mut rng);
        Ok(Some(Action::call_pitch(call)))
    }
}

/// Hands out a fixed list of actions in order.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Action>>,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            script: Mutex::new(actions.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_action(&self, _state: &LeagueState) -> Result<Option<Action>> {
        let mut script = self
            .script
            .lock()
            .map_err(|_| RuntimeError::ProviderPoisoned)?;
        Ok(script.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use ballpark_content::demo_league;
    use ballpark_core::{ActionKind, SimConfig, TeamId, reducer};

    use super::*;

    #[tokio::test]
    async fn auto_manager_is_idle_without_a_game() {
        let manager = AutoManager::new(1);
        let state = reducer(&LeagueState::default(), &Action::new_league(demo_league(2, 4)));
        assert_eq!(manager.provide_action(&state).await.unwrap(), None);
    }

    #[tokio::test]
    async fn auto_manager_calls_pitches_in_a_live_at_bat() {
        let manager = AutoManager::new(1);
        let state = reducer(&LeagueState::default(), &Action::new_league(demo_league(2, 4)));
        let state = reducer(&state, &Action::exhibition(TeamId(1), TeamId(2)));
        let action = manager.provide_action(&state).await.unwrap().expect("pitch");
        assert_eq!(action.kind(), ActionKind::CallPitch);

        let step = ballpark_core::dispatch(&state, &action, &SimConfig::default());
        assert!(step.applied(), "{:?}", step.diagnostic);
    }

    #[tokio::test]
    async fn scripted_provider_runs_dry() {
        let provider = ScriptedProvider::new([Action::exhibition(TeamId(1), TeamId(2))]);
        let state = LeagueState::default();
        assert!(provider.provide_action(&state).await.unwrap().is_some());
        assert!(provider.provide_action(&state).await.unwrap().is_none());
    }
}
