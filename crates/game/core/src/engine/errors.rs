//! Error types for the action execution pipeline.

use crate::action::{
    AcceptTradeAction, ActionKind, ActionTransition, AdvanceAtBatAction, AdvanceHalfInningAction,
    AdvancePhaseAction, CallPitchAction, NewLeagueAction, ProposeTradeAction, RejectTradeAction,
    SelectUserTeamAction, SimDayAction, SimGameAction, SimHalfInningAction, SimSeasonAction,
    StartGameAction,
};
use crate::error::{DiagnosticKind, ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

type PhaseError<T> = TransitionPhaseError<<T as ActionTransition>::Error>;

/// Errors surfaced while executing an action through the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("new league failed: {0}")]
    NewLeague(PhaseError<NewLeagueAction>),

    #[error("start game failed: {0}")]
    StartGame(PhaseError<StartGameAction>),

    #[error("select user team failed: {0}")]
    SelectUserTeam(PhaseError<SelectUserTeamAction>),

    #[error("call pitch failed: {0}")]
    CallPitch(PhaseError<CallPitchAction>),

    #[error("advance at-bat failed: {0}")]
    AdvanceAtBat(PhaseError<AdvanceAtBatAction>),

    #[error("advance half-inning failed: {0}")]
    AdvanceHalfInning(PhaseError<AdvanceHalfInningAction>),

    #[error("sim half-inning failed: {0}")]
    SimHalfInning(PhaseError<SimHalfInningAction>),

    #[error("sim game failed: {0}")]
    SimGame(PhaseError<SimGameAction>),

    #[error("sim day failed: {0}")]
    SimDay(PhaseError<SimDayAction>),

    #[error("sim season failed: {0}")]
    SimSeason(PhaseError<SimSeasonAction>),

    #[error("advance phase failed: {0}")]
    AdvancePhase(PhaseError<AdvancePhaseAction>),

    #[error("propose trade failed: {0}")]
    ProposeTrade(PhaseError<ProposeTradeAction>),

    #[error("accept trade failed: {0}")]
    AcceptTrade(PhaseError<AcceptTradeAction>),

    #[error("reject trade failed: {0}")]
    RejectTrade(PhaseError<RejectTradeAction>),

    #[error("follow-up queue exceeded {limit} actions after {origin}")]
    FollowUpLimit { origin: ActionKind, limit: u32 },
}

impl ExecuteError {
    /// The pipeline stage that failed, if the error came from a transition.
    pub fn phase(&self) -> Option<TransitionPhase> {
        self.inner().map(|(phase, _)| phase)
    }

    fn inner(&self) -> Option<(TransitionPhase, &dyn GameError)> {
        fn split<E: GameError>(err: &TransitionPhaseError<E>) -> (TransitionPhase, &dyn GameError) {
            (err.phase, &err.error)
        }

        Some(match self {
            Self::NewLeague(e) => split(e),
            Self::StartGame(e) => split(e),
            Self::SelectUserTeam(e) => split(e),
            Self::CallPitch(e) => split(e),
            Self::AdvanceAtBat(e) => split(e),
            Self::AdvanceHalfInning(e) => split(e),
            Self::SimHalfInning(e) => split(e),
            Self::SimGame(e) => split(e),
            Self::SimDay(e) => split(e),
            Self::SimSeason(e) => split(e),
            Self::AdvancePhase(e) => split(e),
            Self::ProposeTrade(e) => split(e),
            Self::AcceptTrade(e) => split(e),
            Self::RejectTrade(e) => split(e),
            Self::FollowUpLimit { .. } => return None,
        })
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self.inner() {
            // a post-condition failure means apply produced a bad state
            Some((TransitionPhase::PostValidate, _)) => ErrorSeverity::Internal,
            Some((_, error)) => error.severity(),
            None => ErrorSeverity::Internal,
        }
    }

    fn kind(&self) -> DiagnosticKind {
        match self.inner() {
            Some((_, error)) => error.kind(),
            None => DiagnosticKind::RunawayLoop,
        }
    }

    fn error_code(&self) -> &'static str {
        match self.inner() {
            Some((_, error)) => error.error_code(),
            None => "ENGINE_FOLLOW_UP_LIMIT",
        }
    }
}
