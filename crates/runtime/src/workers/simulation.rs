//! Simulation worker that owns the authoritative league state.
//!
//! Receives commands from [`crate::RuntimeHandle`], runs them through the
//! [`Session`] trampoline, journals every step and publishes events.

use std::sync::Arc;

use ballpark_core::{Action, LeagueState, Tick};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::api::{Result, RuntimeError};
use crate::events::{DiagnosticEvent, Event, EventBus, LeagueEvent, SessionEvent};
use crate::repository::{JournalRepository, StateRepository};
use crate::session::{DiagnosticRecord, JournalEntry, Session, StepReport};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Submit an action and drain its follow-ups.
    Submit {
        action: Action,
        reply: oneshot::Sender<Result<StepReport>>,
    },
    /// Query the current league state (read-only).
    QueryState { reply: oneshot::Sender<LeagueState> },
    /// Persist the current state.
    Save { reply: oneshot::Sender<Result<Tick>> },
    /// Read back the session journal.
    Journal {
        reply: oneshot::Sender<Result<Vec<JournalEntry>>>,
    },
}

/// Background task that processes league commands one at a time.
pub struct SimulationWorker {
    session: Session,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    states: Option<Arc<dyn StateRepository>>,
    journal: Box<dyn JournalRepository>,
    autosave: bool,
}

impl SimulationWorker {
    pub fn new(
        session: Session,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        states: Option<Arc<dyn StateRepository>>,
        journal: Box<dyn JournalRepository>,
        autosave: bool,
    ) -> Self {
        info!(
            session = journal.session_id(),
            clock = %session.state().clock,
            persistent = states.is_some(),
            "simulation worker initialized"
        );
        Self {
            session,
            command_rx,
            event_bus,
            states,
            journal,
            autosave,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command);
        }
        if let Err(error) = self.journal.flush() {
            tracing::warn!(%error, "final journal flush failed");
        }
        debug!(steps = self.session.sequence(), "simulation worker stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Submit { action, reply } => {
                let result = self.handle_submit(action);
                if reply.send(result).is_err() {
                    debug!("Submit reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.session.state().clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::Save { reply } => {
                if reply.send(self.save()).is_err() {
                    debug!("Save reply channel closed (caller dropped)");
                }
            }
            Command::Journal { reply } => {
                let entries = self
                    .journal
                    .flush()
                    .and_then(|()| self.journal.entries())
                    .map_err(RuntimeError::from);
                if reply.send(entries).is_err() {
                    debug!("Journal reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_submit(&mut self, action: Action) -> Result<StepReport> {
        let report = self.session.submit(action)?;
        for entry in &report.entries {
            self.journal.append(entry)?;
        }
        self.journal.flush()?;
        self.publish(&report);

        if self.autosave && self.states.is_some() && report.deltas.iter().any(|d| !d.is_empty()) {
            self.save()?;
        }
        Ok(report)
    }

    fn publish(&self, report: &StepReport) {
        let mut applied = report.deltas.iter().zip(&report.results);
        for entry in &report.entries {
            let kind = entry.action.kind();
            if entry.applied
                && let Some((delta, result)) = applied.next()
            {
                self.event_bus.publish(Event::League(LeagueEvent::ActionApplied {
                    sequence: entry.sequence,
                    action: kind,
                    follow_up: entry.follow_up,
                    clock: entry.clock,
                    delta: Box::new(delta.clone()),
                    result: Box::new(result.clone()),
                }));
            }
            if let Some(diagnostic) = &entry.diagnostic {
                self.event_bus
                    .publish(Event::Diagnostic(DiagnosticEvent::Reported {
                        sequence: entry.sequence,
                        action: kind,
                        diagnostic: diagnostic.clone(),
                    }));
            }
        }

        // the follow-up cutoff is reported without a journal entry of its own
        let journaled = report
            .entries
            .iter()
            .filter(|entry| entry.diagnostic.is_some())
            .count();
        if let Some(last) = report.entries.last() {
            for diagnostic in report.diagnostics.iter().skip(journaled) {
                self.event_bus
                    .publish(Event::Diagnostic(DiagnosticEvent::Reported {
                        sequence: last.sequence,
                        action: last.action.kind(),
                        diagnostic: DiagnosticRecord::from(diagnostic),
                    }));
            }
        }
    }

    fn save(&self) -> Result<Tick> {
        let states = self.states.as_ref().ok_or(RuntimeError::PersistenceDisabled)?;
        let state = self.session.state();
        states.save(state.clock, state)?;
        self.event_bus
            .publish(Event::Session(SessionEvent::StateSaved { clock: state.clock }));
        Ok(state.clock)
    }
}
