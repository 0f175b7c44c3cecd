//! Runtime orchestration for the deterministic league simulation.
//!
//! This crate wires a [`Session`] (the follow-up trampoline) to a background
//! worker, repositories and an event bus, and exposes a cloneable
//! [`RuntimeHandle`] for clients.
//!
//! Modules are organized by responsibility:
//! - [`session`] runs actions to quiescence and journals each step
//! - [`runtime`] hosts the orchestrator, builder and env-based config
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`repository`] stores state snapshots and journals
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{ActionProvider, AutoManager, Result, RuntimeError, RuntimeHandle, ScriptedProvider};
pub use events::{DiagnosticEvent, Event, EventBus, LeagueEvent, SessionEvent, Topic};
pub use repository::{
    FileJournal, FileStateRepository, InMemoryJournal, InMemoryStateRepo, JournalRepository,
    RepositoryError, StateRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, default_save_dir};
pub use session::{DiagnosticRecord, JournalEntry, ReplayMismatch, RootError, Session, StepReport};
