//! Synchronous session: the follow-up trampoline and its journal.
//!
//! A [`Session`] owns one league state and feeds actions to the engine one at
//! a time. Follow-up actions returned by a dispatch are queued and drained
//! before [`Session::submit`] returns, and every dispatch, follow-ups
//! included, produces a [`JournalEntry`].

use ballpark_core::{
    Action, ActionResult, Diagnostic, DiagnosticKind, Dispatch, ErrorSeverity, FollowUpQueue,
    LeagueState, SimConfig, StateDelta, Tick, dispatch,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owned copy of a [`Diagnostic`] that can be read back from a journal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub kind: DiagnosticKind,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    pub clock: Tick,
}

impl From<&Diagnostic> for DiagnosticRecord {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            kind: diagnostic.kind,
            severity: diagnostic.severity,
            code: diagnostic.code.to_owned(),
            message: diagnostic.message.clone(),
            clock: diagnostic.clock,
        }
    }
}

/// One dispatch as recorded in the journal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub sequence: u64,
    /// Wall-clock time of the dispatch. Never fed back into the engine.
    pub recorded_at: DateTime<Utc>,
    pub action: Action,
    /// Queued by an earlier step rather than submitted by the caller.
    pub follow_up: bool,
    pub applied: bool,
    /// Logical clock after the step.
    pub clock: Tick,
    pub diagnostic: Option<DiagnosticRecord>,
    /// Hex SHA-256 state root after the step.
    pub state_root: String,
}

/// Everything one [`Session::submit`] call did.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    pub results: Vec<ActionResult>,
    pub deltas: Vec<StateDelta>,
    pub diagnostics: Vec<Diagnostic>,
    pub entries: Vec<JournalEntry>,
    /// Logical clock once the queue drained.
    pub clock: Tick,
}

impl StepReport {
    /// True when the submitted action itself applied.
    pub fn applied(&self) -> bool {
        self.entries.first().is_some_and(|entry| entry.applied)
    }

    pub fn state_root(&self) -> Option<&str> {
        self.entries.last().map(|entry| entry.state_root.as_str())
    }
}

/// The league state could not be encoded to compute its root.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("state root encoding failed: {0}")]
pub struct RootError(String);

impl From<bincode::Error> for RootError {
    fn from(error: bincode::Error) -> Self {
        Self(error.to_string())
    }
}

/// Journal replay diverged from the recorded run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplayMismatch {
    #[error("step {sequence}: recorded root {expected}, replayed {actual}")]
    Root {
        sequence: u64,
        expected: String,
        actual: String,
    },

    #[error("journal has {expected} steps, replay produced {actual}")]
    Length { expected: usize, actual: usize },

    #[error(transparent)]
    Encoding(#[from] RootError),
}

pub struct Session {
    state: LeagueState,
    config: SimConfig,
    sequence: u64,
}

impl Session {
    pub fn new(state: LeagueState, config: SimConfig) -> Self {
        Self {
            state,
            config,
            sequence: 0,
        }
    }

    pub fn state(&self) -> &LeagueState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn into_state(self) -> LeagueState {
        self.state
    }

    /// Number of dispatches journaled so far.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn state_root_hex(&self) -> Result<String, RootError> {
        Ok(hex::encode(self.state.state_root()?))
    }

    /// Dispatches `action` and drains its follow-ups.
    ///
    /// Stops after `max_follow_ups` follow-ups with a
    /// `ENGINE_FOLLOW_UP_LIMIT` diagnostic; the state stays at the last
    /// completed step. Fails only when a state root cannot be computed, in
    /// which case the steps before it are already applied.
    pub fn submit(&mut self, action: Action) -> Result<StepReport, RootError> {
        let mut report = StepReport {
            results: Vec::new(),
            deltas: Vec::new(),
            diagnostics: Vec::new(),
            entries: Vec::new(),
            clock: self.state.clock,
        };
        let mut queue = FollowUpQueue::new(action, self.config.max_follow_ups);

        while let Some((action, follow_up)) = queue.pop() {
            let step = dispatch(&self.state, &action, &self.config);
            let limited = queue.settle(&step).err();
            let Dispatch {
                state,
                outcome,
                diagnostic,
            } = step;
            self.state = state;
            self.sequence += 1;

            report.entries.push(JournalEntry {
                sequence: self.sequence,
                recorded_at: Utc::now(),
                action,
                follow_up,
                applied: outcome.is_some(),
                clock: self.state.clock,
                diagnostic: diagnostic.as_ref().map(DiagnosticRecord::from),
                state_root: self.state_root_hex()?,
            });
            if let Some(outcome) = outcome {
                report.deltas.push(outcome.delta);
                report.results.push(outcome.action_result);
            }
            report.diagnostics.extend(diagnostic);
            if let Some(error) = limited {
                report
                    .diagnostics
                    .push(Diagnostic::from_error(&error, self.state.clock));
            }
        }

        report.clock = self.state.clock;
        tracing::debug!(
            action = %queue.origin(),
            steps = report.entries.len(),
            clock = %report.clock,
            "submission settled"
        );
        Ok(report)
    }

    /// Re-submits every caller-submitted action in `entries`.
    ///
    /// Follow-ups are not read from the journal; the engine queues them again.
    pub fn replay(
        initial: LeagueState,
        config: SimConfig,
        entries: &[JournalEntry],
    ) -> Result<Self, RootError> {
        let mut session = Self::new(initial, config);
        for entry in entries.iter().filter(|entry| !entry.follow_up) {
            session.submit(entry.action.clone())?;
        }
        Ok(session)
    }

    /// Replays `entries` and checks every recorded state root.
    pub fn verify_replay(
        initial: LeagueState,
        config: SimConfig,
        entries: &[JournalEntry],
    ) -> Result<Self, ReplayMismatch> {
        let mut session = Self::new(initial, config);
        let mut replayed = Vec::with_capacity(entries.len());
        for entry in entries.iter().filter(|entry| !entry.follow_up) {
            replayed.extend(session.submit(entry.action.clone())?.entries);
        }

        if replayed.len() != entries.len() {
            return Err(ReplayMismatch::Length {
                expected: entries.len(),
                actual: replayed.len(),
            });
        }
        for (recorded, fresh) in entries.iter().zip(&replayed) {
            if recorded.state_root != fresh.state_root {
                return Err(ReplayMismatch::Root {
                    sequence: recorded.sequence,
                    expected: recorded.state_root.clone(),
                    actual: fresh.state_root.clone(),
                });
            }
        }
        Ok(session)
    }
}
