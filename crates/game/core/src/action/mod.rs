//! Action domain.
//!
//! [`Action`] is the closed set of inputs the engine accepts. Each variant
//! wraps a transition type implementing [`ActionTransition`], so dispatch is
//! a total match and adding an action is checked at compile time.
//!
//! # Module Structure
//!
//! - `league`: NewLeague, SelectUserTeam, AdvancePhase
//! - `play`: StartGame, CallPitch, AdvanceAtBat, AdvanceHalfInning
//! - `sim`: SimHalfInning, SimGame, SimDay, SimSeason
//! - `trade`: ProposeTrade, AcceptTradeProposal, RejectTradeProposal

pub mod league;
pub mod play;
pub mod sim;
pub mod trade;
mod transition;

pub use league::{
    AdvancePhaseAction, LeagueError, LeagueSeed, NewLeagueAction, PhaseChange,
    SelectUserTeamAction,
};
pub use play::{
    AdvanceAtBatAction, AdvanceHalfInningAction, CallPitchAction, GameStart, StartGameAction,
};
pub use sim::{SimDayAction, SimGameAction, SimHalfInningAction, SimSeasonAction};
pub use trade::{
    AcceptTradeAction, ProposeTradeAction, RejectTradeAction, TradeDecision, TradeError,
};
pub use transition::ActionTransition;

use crate::config::SimConfig;
use crate::play::{PitchOutcome, PlayError};
use crate::progression::{AtBatAdvance, DayReport, GameRun, HalfInningAdvance, SeasonReport};
use crate::state::{GameId, PitchCall, PlayerId, ProposalId, SeasonId, TeamId};

/// Discriminant of [`Action`], used for logging and journals.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ActionKind {
    NewLeague,
    StartGame,
    SelectUserTeam,
    CallPitch,
    AdvanceAtBat,
    AdvanceHalfInning,
    SimHalfInning,
    SimGame,
    SimDay,
    SimSeason,
    AdvancePhase,
    ProposeTrade,
    AcceptTradeProposal,
    RejectTradeProposal,
}

/// Every input the engine accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    NewLeague(NewLeagueAction),
    StartGame(StartGameAction),
    SelectUserTeam(SelectUserTeamAction),
    CallPitch(CallPitchAction),
    AdvanceAtBat(AdvanceAtBatAction),
    AdvanceHalfInning(AdvanceHalfInningAction),
    SimHalfInning(SimHalfInningAction),
    SimGame(SimGameAction),
    SimDay(SimDayAction),
    SimSeason(SimSeasonAction),
    AdvancePhase(AdvancePhaseAction),
    ProposeTrade(ProposeTradeAction),
    AcceptTradeProposal(AcceptTradeAction),
    RejectTradeProposal(RejectTradeAction),
}

impl Action {
    pub fn new_league(league: LeagueSeed) -> Self {
        Self::NewLeague(NewLeagueAction::new(league))
    }

    pub fn exhibition(home: TeamId, away: TeamId) -> Self {
        Self::StartGame(StartGameAction::exhibition(home, away))
    }

    pub fn next_scheduled_game() -> Self {
        Self::StartGame(StartGameAction::next_scheduled())
    }

    pub fn select_user_team(team_id: TeamId) -> Self {
        Self::SelectUserTeam(SelectUserTeamAction::new(team_id))
    }

    pub fn call_pitch(call: PitchCall) -> Self {
        Self::CallPitch(CallPitchAction::new(call))
    }

    pub fn propose_trade(
        from_team: TeamId,
        to_team: TeamId,
        offered: PlayerId,
        requested: PlayerId,
    ) -> Self {
        Self::ProposeTrade(ProposeTradeAction {
            from_team,
            to_team,
            offered,
            requested,
        })
    }

    pub fn accept_trade(proposal: ProposalId) -> Self {
        Self::AcceptTradeProposal(AcceptTradeAction { proposal })
    }

    pub fn reject_trade(proposal: ProposalId) -> Self {
        Self::RejectTradeProposal(RejectTradeAction { proposal })
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::NewLeague(_) => ActionKind::NewLeague,
            Action::StartGame(_) => ActionKind::StartGame,
            Action::SelectUserTeam(_) => ActionKind::SelectUserTeam,
            Action::CallPitch(_) => ActionKind::CallPitch,
            Action::AdvanceAtBat(_) => ActionKind::AdvanceAtBat,
            Action::AdvanceHalfInning(_) => ActionKind::AdvanceHalfInning,
            Action::SimHalfInning(_) => ActionKind::SimHalfInning,
            Action::SimGame(_) => ActionKind::SimGame,
            Action::SimDay(_) => ActionKind::SimDay,
            Action::SimSeason(_) => ActionKind::SimSeason,
            Action::AdvancePhase(_) => ActionKind::AdvancePhase,
            Action::ProposeTrade(_) => ActionKind::ProposeTrade,
            Action::AcceptTradeProposal(_) => ActionKind::AcceptTradeProposal,
            Action::RejectTradeProposal(_) => ActionKind::RejectTradeProposal,
        }
    }
}

impl ActionKind {
    /// The action for a payload-free kind; kinds that need a payload map to
    /// `None`. `StartGame` defaults to the next scheduled game.
    pub fn bare_action(self) -> Option<Action> {
        match self {
            ActionKind::AdvanceAtBat => Some(Action::AdvanceAtBat(AdvanceAtBatAction)),
            ActionKind::AdvanceHalfInning => {
                Some(Action::AdvanceHalfInning(AdvanceHalfInningAction))
            }
            ActionKind::SimHalfInning => Some(Action::SimHalfInning(SimHalfInningAction)),
            ActionKind::SimGame => Some(Action::SimGame(SimGameAction)),
            ActionKind::SimDay => Some(Action::SimDay(SimDayAction)),
            ActionKind::SimSeason => Some(Action::SimSeason(SimSeasonAction)),
            ActionKind::AdvancePhase => Some(Action::AdvancePhase(AdvancePhaseAction)),
            ActionKind::StartGame => Some(Action::next_scheduled_game()),
            ActionKind::NewLeague
            | ActionKind::SelectUserTeam
            | ActionKind::CallPitch
            | ActionKind::ProposeTrade
            | ActionKind::AcceptTradeProposal
            | ActionKind::RejectTradeProposal => None,
        }
    }
}

/// Action-specific result of a successful dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    LeagueCreated(SeasonId),
    GameStarted(GameId),
    UserTeamSelected(TeamId),
    Pitch(PitchOutcome),
    AtBat(AtBatAdvance),
    HalfInning(HalfInningAdvance),
    Game(GameRun),
    Day(DayReport),
    Season(SeasonReport),
    PhaseChanged(PhaseChange),
    TradeProposed(ProposalId),
    TradeDecided(TradeDecision),
}

impl ActionResult {
    /// Action the caller should dispatch next to keep the game moving.
    ///
    /// A pitch that ends the at-bat queues the at-bat advance; a third out
    /// queues the half-inning advance. Everything else settles on its own.
    pub fn follow_up(&self) -> Option<Action> {
        match self {
            ActionResult::Pitch(outcome) if outcome.ended_at_bat() => {
                Some(Action::AdvanceAtBat(AdvanceAtBatAction))
            }
            ActionResult::AtBat(AtBatAdvance::HalfInningOver(_)) => {
                Some(Action::AdvanceHalfInning(AdvanceHalfInningAction))
            }
            _ => None,
        }
    }

    /// The safety-cap error, when a simulation loop stopped short.
    pub fn runaway(&self, config: &SimConfig) -> Option<PlayError> {
        let run = match self {
            ActionResult::Game(run) => Some(run),
            ActionResult::Day(day) => day.runaway.as_ref(),
            ActionResult::Season(season) => season.runaway.as_ref(),
            _ => None,
        };
        run.and_then(|run| run.runaway(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AtBatId, Count, HalfInningId, PitchId, PitchResult};
    use strum::IntoEnumIterator;

    #[test]
    fn kinds_round_trip_through_names() {
        for kind in ActionKind::iter() {
            let name = kind.to_string();
            assert_eq!(name.parse::<ActionKind>().ok(), Some(kind));
        }
        assert_eq!(ActionKind::CallPitch.as_ref(), "CALL_PITCH");
    }

    #[test]
    fn payload_free_kinds_build_matching_actions() {
        for kind in ActionKind::iter() {
            if let Some(action) = kind.bare_action() {
                assert_eq!(action.kind(), kind);
            }
        }
    }

    #[test]
    fn ending_pitch_queues_at_bat_advance() {
        let mut outcome = PitchOutcome {
            pitch_id: PitchId(1),
            at_bat_id: AtBatId(1),
            result: PitchResult::Ball,
            swung: false,
            count: Count::new(1, 0),
            at_bat_result: None,
        };
        assert_eq!(ActionResult::Pitch(outcome.clone()).follow_up(), None);

        outcome.at_bat_result = Some(crate::state::AtBatResult::Walk);
        assert_eq!(
            ActionResult::Pitch(outcome).follow_up().map(|a| a.kind()),
            Some(ActionKind::AdvanceAtBat)
        );
        assert_eq!(
            ActionResult::AtBat(AtBatAdvance::HalfInningOver(HalfInningId(1)))
                .follow_up()
                .map(|a| a.kind()),
            Some(ActionKind::AdvanceHalfInning)
        );
    }
}
