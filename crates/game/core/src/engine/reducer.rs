//! Pure dispatch surface and the follow-up trampoline.

use std::collections::VecDeque;

use crate::action::{Action, ActionKind, ActionResult};
use crate::config::SimConfig;
use crate::error::{Diagnostic, DiagnosticKind, GameError};
use crate::state::LeagueState;

use super::{ExecuteError, ExecutionOutcome, GameEngine};

/// Result of dispatching one action against a state snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch {
    /// The new state. Identical to the input when the action was rejected.
    pub state: LeagueState,
    /// Present when the action applied.
    pub outcome: Option<ExecutionOutcome>,
    /// Why the action did not apply, or did not fully apply.
    pub diagnostic: Option<Diagnostic>,
}

impl Dispatch {
    pub fn applied(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn result(&self) -> Option<&ActionResult> {
        self.outcome.as_ref().map(|outcome| &outcome.action_result)
    }

    /// Action the caller should queue next, if any.
    pub fn follow_up(&self) -> Option<Action> {
        self.result().and_then(ActionResult::follow_up)
    }
}

fn report<E: GameError + ?Sized>(
    error: &E,
    state: &LeagueState,
    action: &Action,
) -> Option<Diagnostic> {
    let diagnostic = Diagnostic::from_error(error, state.clock);
    if diagnostic.kind == DiagnosticKind::AlreadyResolved {
        tracing::debug!(action = %action.kind(), %diagnostic, "action ignored");
        return None;
    }
    tracing::warn!(
        action = %action.kind(),
        severity = diagnostic.severity.as_str(),
        %diagnostic,
        "action not applied"
    );
    Some(diagnostic)
}

/// Applies one action to a snapshot and returns the next snapshot.
///
/// The input is never modified. A rejected action yields an unchanged state
/// and a diagnostic; a pitch against an already resolved at-bat yields an
/// unchanged state and no diagnostic. A simulation loop that hit its safety
/// cap keeps its best-effort state and reports a runaway diagnostic.
pub fn dispatch(state: &LeagueState, action: &Action, config: &SimConfig) -> Dispatch {
    let mut next = state.clone();
    let executed = GameEngine::new(&mut next, config).execute(action);

    match executed {
        Ok(outcome) => {
            let diagnostic = outcome
                .action_result
                .runaway(config)
                .and_then(|error| report(&error, state, action));
            Dispatch {
                state: next,
                outcome: Some(outcome),
                diagnostic,
            }
        }
        Err(error) => Dispatch {
            diagnostic: report(&error, state, action),
            state: next,
            outcome: None,
        },
    }
}

/// State reached after an action and all of its follow-ups.
#[derive(Clone, Debug, PartialEq)]
pub struct Settled {
    pub state: LeagueState,
    /// Results of every applied action, in dispatch order.
    pub results: Vec<ActionResult>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Pending actions for one submission: the submitted action, then each
/// follow-up a dispatch hands back.
///
/// At most `limit` follow-ups are handed out. The one past the limit is
/// dropped and [`FollowUpQueue::settle`] returns
/// [`ExecuteError::FollowUpLimit`].
#[derive(Clone, Debug)]
pub struct FollowUpQueue {
    origin: ActionKind,
    pending: VecDeque<(Action, bool)>,
    limit: u32,
    follow_ups: u32,
}

impl FollowUpQueue {
    pub fn new(action: Action, limit: u32) -> Self {
        Self {
            origin: action.kind(),
            pending: VecDeque::from([(action, false)]),
            limit,
            follow_ups: 0,
        }
    }

    /// Kind of the action that opened the queue.
    pub fn origin(&self) -> ActionKind {
        self.origin
    }

    /// Next action to dispatch, flagged `true` when it is a follow-up.
    pub fn pop(&mut self) -> Option<(Action, bool)> {
        self.pending.pop_front()
    }

    /// Queues the follow-up of a finished step.
    pub fn settle(&mut self, step: &Dispatch) -> Result<(), ExecuteError> {
        let Some(next) = step.follow_up() else {
            return Ok(());
        };
        if self.follow_ups >= self.limit {
            self.pending.clear();
            tracing::warn!(action = %self.origin, limit = self.limit, "follow-up queue cut off");
            return Err(ExecuteError::FollowUpLimit {
                origin: self.origin,
                limit: self.limit,
            });
        }
        self.follow_ups += 1;
        self.pending.push_back((next, true));
        Ok(())
    }
}

/// Dispatches `action`, then drains the follow-up queue it produces.
///
/// At most `config.max_follow_ups` follow-ups run; exceeding that records a
/// diagnostic and stops with the last valid state.
pub fn run_to_quiescence(state: &LeagueState, action: Action, config: &SimConfig) -> Settled {
    let mut settled = Settled {
        state: state.clone(),
        results: Vec::new(),
        diagnostics: Vec::new(),
    };
    let mut queue = FollowUpQueue::new(action, config.max_follow_ups);

    while let Some((next, _)) = queue.pop() {
        let step = dispatch(&settled.state, &next, config);
        let limited = queue.settle(&step).err();
        settled.diagnostics.extend(step.diagnostic);
        if let Some(outcome) = step.outcome {
            settled.results.push(outcome.action_result);
        }
        settled.state = step.state;
        if let Some(error) = limited {
            settled
                .diagnostics
                .push(Diagnostic::from_error(&error, settled.state.clock));
        }
    }
    settled
}

/// The single entry point: `reducer(state, action) -> state'`.
///
/// Runs with the default [`SimConfig`] and drains follow-ups, so a pitch that
/// ends an at-bat also brings up the next batter.
pub fn reducer(state: &LeagueState, action: &Action) -> LeagueState {
    run_to_quiescence(state, action.clone(), &SimConfig::default()).state
}
