//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! submitting actions or streaming events from specific topics.

use ballpark_core::{Action, LeagueState, Tick};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::session::{JournalEntry, StepReport};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Submits an action and waits until it and its follow-ups settle.
    ///
    /// A rejected action is not an error here; it comes back as a diagnostic
    /// in the report.
    pub async fn submit(&self, action: Action) -> Result<StepReport> {
        self.request(|reply| Command::Submit { action, reply }).await?
    }

    /// Query the current league state (read-only snapshot)
    pub async fn query_state(&self) -> Result<LeagueState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Persists the current state and returns the clock it was stored under.
    pub async fn save(&self) -> Result<Tick> {
        self.request(|reply| Command::Save { reply }).await?
    }

    /// Journal entries recorded so far in this session.
    pub async fn journal(&self) -> Result<Vec<JournalEntry>> {
        self.request(|reply| Command::Journal { reply }).await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::League` - Applied actions with their deltas
    /// - `Topic::Diagnostics` - Rejected or truncated actions
    /// - `Topic::Session` - Saves and provider lifecycle
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
