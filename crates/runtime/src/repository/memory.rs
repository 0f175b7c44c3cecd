//! In-memory StateRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use ballpark_core::{LeagueState, Tick};

use super::{RepositoryError, Result, StateRepository};

/// In-memory implementation of StateRepository.
#[derive(Default)]
pub struct InMemoryStateRepo {
    states: RwLock<BTreeMap<Tick, LeagueState>>,
}

impl InMemoryStateRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an initial state at its own clock.
    pub fn with_initial_state(initial_state: LeagueState) -> Self {
        let mut states = BTreeMap::new();
        states.insert(initial_state.clock, initial_state);
        Self {
            states: RwLock::new(states),
        }
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, clock: Tick, state: &LeagueState) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.insert(clock, state.clone());
        Ok(())
    }

    fn load(&self, clock: Tick) -> Result<Option<LeagueState>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.get(&clock).cloned())
    }

    fn exists(&self, clock: Tick) -> bool {
        self.states
            .read()
            .map(|states| states.contains_key(&clock))
            .unwrap_or(false)
    }

    fn delete(&self, clock: Tick) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.remove(&clock);
        Ok(())
    }

    fn list_clocks(&self) -> Result<Vec<Tick>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.keys().copied().collect())
    }
}
