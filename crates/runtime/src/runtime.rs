//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive a league session.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use ballpark_core::{LeagueState, SimConfig};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, SessionEvent, Topic};
use crate::repository::{
    FileJournal, FileStateRepository, InMemoryJournal, JournalRepository, StateRepository,
};
use crate::session::{Session, StepReport};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub sim: SimConfig,
    /// Seed for the initial league stream and the automatic manager.
    pub seed: u32,
    /// Root directory for state snapshots and journals. `None` keeps the
    /// session in memory.
    pub save_dir: Option<PathBuf>,
    pub session_id: String,
    /// Save a snapshot after every submission that changed the state.
    pub autosave: bool,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            seed: 1,
            save_dir: None,
            session_id: default_session_id(),
            autosave: false,
            event_buffer_size: 256,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    pub const SEED_VAR: &'static str = "BALLPARK_SEED";
    pub const CHECK_INVARIANTS_VAR: &'static str = "BALLPARK_CHECK_INVARIANTS";
    pub const MAX_FOLLOW_UPS_VAR: &'static str = "BALLPARK_MAX_FOLLOW_UPS";
    pub const SAVE_DIR_VAR: &'static str = "BALLPARK_SAVE_DIR";
    pub const SESSION_ID_VAR: &'static str = "BALLPARK_SESSION_ID";

    /// Defaults overridden by `BALLPARK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(seed) = parse_var(&lookup, Self::SEED_VAR)? {
            config.seed = seed;
        }
        if let Some(raw) = lookup(Self::CHECK_INVARIANTS_VAR) {
            config.sim.check_invariants = parse_flag(&raw).ok_or_else(|| RuntimeError::InvalidEnv {
                var: Self::CHECK_INVARIANTS_VAR,
                value: raw.clone(),
                reason: "expected true/false or 1/0".into(),
            })?;
        }
        if let Some(limit) = parse_var(&lookup, Self::MAX_FOLLOW_UPS_VAR)? {
            config.sim.max_follow_ups = limit;
        }
        if let Some(dir) = lookup(Self::SAVE_DIR_VAR).filter(|dir| !dir.is_empty()) {
            config.save_dir = Some(PathBuf::from(dir));
        }
        if let Some(id) = lookup(Self::SESSION_ID_VAR).filter(|id| !id.is_empty()) {
            config.session_id = id;
        }
        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| RuntimeError::InvalidEnv {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn default_session_id() -> String {
    chrono::Utc::now().format("session-%Y%m%d-%H%M%S").to_string()
}

/// Platform data directory for saves, e.g. `~/.local/share/ballpark/saves`.
pub fn default_save_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "ballpark").map(|dirs| dirs.data_dir().join("saves"))
}

/// Main runtime that orchestrates a league session
///
/// Runtime owns the worker and the optional provider. [`RuntimeHandle`]
/// provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    provider: Option<Box<dyn ActionProvider>>,
    worker: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    pub fn set_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.provider = Some(Box::new(provider));
    }

    /// Asks the provider for one action and submits it.
    ///
    /// Returns `None` once the provider has nothing to do.
    pub async fn step(&mut self) -> Result<Option<StepReport>> {
        let provider = self.provider.as_ref().ok_or(RuntimeError::ProviderNotSet)?;
        let state = self.handle.query_state().await?;
        match provider.provide_action(&state).await? {
            Some(action) => Ok(Some(self.handle.submit(action).await?)),
            None => {
                self.handle
                    .event_bus()
                    .publish(Event::Session(SessionEvent::ProviderIdle));
                Ok(None)
            }
        }
    }

    /// Steps until the provider goes idle or `max_steps` submissions ran.
    ///
    /// Returns the number of submissions made.
    pub async fn run_until_idle(&mut self, max_steps: usize) -> Result<usize> {
        let mut steps = 0;
        while steps < max_steps {
            if self.step().await?.is_none() {
                break;
            }
            steps += 1;
        }
        Ok(steps)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to drain queued commands. Handles cloned out of
    /// this runtime keep the worker alive until they are dropped too.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<LeagueState>,
    provider: Option<Box<dyn ActionProvider>>,
    states: Option<Arc<dyn StateRepository>>,
    journal: Option<Box<dyn JournalRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            provider: None,
            states: None,
            journal: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Resume from an existing state instead of an empty league.
    pub fn initial_state(mut self, state: LeagueState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Overrides the snapshot store derived from `save_dir`.
    pub fn state_repository(mut self, states: Arc<dyn StateRepository>) -> Self {
        self.states = Some(states);
        self
    }

    /// Overrides the journal derived from `save_dir`.
    pub fn journal(mut self, journal: impl JournalRepository + 'static) -> Self {
        self.journal = Some(Box::new(journal));
        self
    }

    pub async fn build(self) -> Result<Runtime> {
        let config = self.config;
        let session_dir = config
            .save_dir
            .as_ref()
            .map(|dir| dir.join(&config.session_id));

        let states = match (self.states, &session_dir) {
            (Some(states), _) => Some(states),
            (None, Some(dir)) => {
                Some(Arc::new(FileStateRepository::new(dir)?) as Arc<dyn StateRepository>)
            }
            (None, None) => None,
        };
        let journal: Box<dyn JournalRepository> = match (self.journal, &session_dir) {
            (Some(journal), _) => journal,
            (None, Some(dir)) => Box::new(FileJournal::open(dir, config.session_id.clone())?),
            (None, None) => Box::new(InMemoryJournal::new(config.session_id.clone())),
        };

        let state = self
            .state
            .unwrap_or_else(|| LeagueState::with_seed(config.seed));
        let session = Session::new(state, config.sim.clone());

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size);
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = SimulationWorker::new(
            session,
            command_rx,
            event_bus,
            states,
            journal,
            config.autosave,
        );
        let worker = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            provider: self.provider,
            worker,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn env_overrides_defaults() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("BALLPARK_SEED", "12345"),
            ("BALLPARK_CHECK_INVARIANTS", "true"),
            ("BALLPARK_MAX_FOLLOW_UPS", "50"),
            ("BALLPARK_SAVE_DIR", "/tmp/ballpark"),
            ("BALLPARK_SESSION_ID", "opening-day"),
        ]))
        .unwrap();
        assert_eq!(config.seed, 12345);
        assert!(config.sim.check_invariants);
        assert_eq!(config.sim.max_follow_ups, 50);
        assert_eq!(config.save_dir, Some(PathBuf::from("/tmp/ballpark")));
        assert_eq!(config.session_id, "opening-day");
    }

    #[test]
    fn unset_env_keeps_defaults() {
        let config = RuntimeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.sim, SimConfig::default());
        assert_eq!(config.save_dir, None);
        assert!(config.session_id.starts_with("session-"));
    }

    #[test]
    fn malformed_seed_is_reported() {
        let err = RuntimeConfig::from_lookup(lookup(&[("BALLPARK_SEED", "lots")])).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::InvalidEnv {
                var: "BALLPARK_SEED",
                ..
            }
        ));
        let err = RuntimeConfig::from_lookup(lookup(&[("BALLPARK_CHECK_INVARIANTS", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("BALLPARK_CHECK_INVARIANTS"));
    }
}
