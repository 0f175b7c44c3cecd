//! Deterministic baseball simulation rules and data types.
//!
//! `ballpark-core` resolves play pitch by pitch from a seeded random stream
//! and advances at-bats, half-innings, games and seasons. It performs no I/O
//! and reads no clocks, so the same seed and the same action sequence always
//! produce the same league state. All state mutation flows through
//! [`engine::GameEngine`]; [`reducer`] is the pure entry point built on it.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod invariants;
pub mod play;
pub mod progression;
pub mod state;

pub use action::{
    Action, ActionKind, ActionResult, ActionTransition, GameStart, LeagueError, LeagueSeed,
    PhaseChange, TradeDecision, TradeError,
};
pub use config::SimConfig;
pub use engine::{
    Dispatch, ExecuteError, ExecutionOutcome, FollowUpQueue, GameEngine, Settled, TransitionPhase,
    TransitionPhaseError, dispatch, reducer, run_to_quiescence,
};
pub use env::{ProbTable, RngState, next_random, weighted_roll};
pub use error::{Diagnostic, DiagnosticKind, ErrorSeverity, GameError};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use play::{PitchOutcome, PlayError};
pub use progression::{AtBatAdvance, DayReport, GameRun, HalfInningAdvance, SeasonReport};
pub use state::{
    AtBat, AtBatId, AtBatPlay, AtBatResult, BatterArchetype, BatterProfile, BatterRatings,
    BattingLine, BoxScore, Count, EventKind, Game, GameId, HalfInning, HalfInningId, Intent,
    LeagueFields, LeaguePhase, LeagueState, Location, LogEvent, Pitch, PitchCall, PitchResult,
    PitchType, PitcherArchetype, PitcherProfile, PitcherRatings, Player, PlayerId, ProposalId,
    RunnerState, Season, SeasonId, Side, Standing, StateDelta, Team, TeamId, Tick,
};
