//! Trade proposals.
//!
//! Whether a trade is any good is decided outside the engine. These actions
//! only record proposals and, on acceptance, move the two players between
//! rosters.

use crate::config::SimConfig;
use crate::error::{DiagnosticKind, ErrorSeverity, GameError};
use crate::state::{
    EventKind, EventRefs, GameId, LeaguePhase, LeagueState, PlayerId, ProposalId, TeamId,
    TradeProposal, TradeStatus,
};

use super::ActionTransition;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TradeError {
    #[error("no league is loaded")]
    NotInitialized,

    #[error("team {0} does not exist")]
    UnknownTeam(TeamId),

    #[error("player {0} does not exist")]
    UnknownPlayer(PlayerId),

    #[error("trade proposal {0} does not exist")]
    UnknownProposal(ProposalId),

    #[error("team {0} cannot trade with itself")]
    SameTeam(TeamId),

    #[error("player {player} is not on team {team}")]
    NotOnRoster { player: PlayerId, team: TeamId },

    #[error("trade proposal {id} is already {status}")]
    AlreadyResolved { id: ProposalId, status: TradeStatus },

    #[error("rosters are frozen while game {0} is in progress")]
    GameInProgress(GameId),
}

impl GameError for TradeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotInitialized | Self::GameInProgress(_) => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn kind(&self) -> DiagnosticKind {
        match self {
            Self::NotInitialized => DiagnosticKind::InvalidPhase,
            Self::UnknownTeam(_) | Self::UnknownPlayer(_) | Self::UnknownProposal(_) => {
                DiagnosticKind::MissingReference
            }
            Self::AlreadyResolved { .. } => DiagnosticKind::AlreadyResolved,
            Self::GameInProgress(_) => DiagnosticKind::InvalidState,
            Self::SameTeam(_) | Self::NotOnRoster { .. } => DiagnosticKind::InvalidInput,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotInitialized => "TRADE_NOT_INITIALIZED",
            Self::UnknownTeam(_) => "TRADE_UNKNOWN_TEAM",
            Self::UnknownPlayer(_) => "TRADE_UNKNOWN_PLAYER",
            Self::UnknownProposal(_) => "TRADE_UNKNOWN_PROPOSAL",
            Self::SameTeam(_) => "TRADE_SAME_TEAM",
            Self::NotOnRoster { .. } => "TRADE_NOT_ON_ROSTER",
            Self::AlreadyResolved { .. } => "TRADE_ALREADY_RESOLVED",
            Self::GameInProgress(_) => "TRADE_GAME_IN_PROGRESS",
        }
    }
}

fn check_on_roster(state: &LeagueState, player: PlayerId, team: TeamId) -> Result<(), TradeError> {
    let roster = &state
        .teams
        .get(&team)
        .ok_or(TradeError::UnknownTeam(team))?
        .roster;
    if !state.players.contains_key(&player) {
        return Err(TradeError::UnknownPlayer(player));
    }
    if !roster.contains(&player) {
        return Err(TradeError::NotOnRoster { player, team });
    }
    Ok(())
}

fn pending_proposal(state: &LeagueState, id: ProposalId) -> Result<&TradeProposal, TradeError> {
    let proposal = state
        .trades
        .get(&id)
        .ok_or(TradeError::UnknownProposal(id))?;
    if !proposal.is_pending() {
        return Err(TradeError::AlreadyResolved {
            id,
            status: proposal.status,
        });
    }
    Ok(proposal)
}

/// Registers a one-for-one offer from `from_team` to `to_team`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProposeTradeAction {
    pub from_team: TeamId,
    pub to_team: TeamId,
    pub offered: PlayerId,
    pub requested: PlayerId,
}

impl ActionTransition for ProposeTradeAction {
    type Error = TradeError;
    type Result = ProposalId;

    fn pre_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        if state.phase == LeaguePhase::Uninitialized {
            return Err(TradeError::NotInitialized);
        }
        if self.from_team == self.to_team {
            return Err(TradeError::SameTeam(self.from_team));
        }
        check_on_roster(state, self.offered, self.from_team)?;
        check_on_roster(state, self.requested, self.to_team)
    }

    fn apply(
        &self,
        state: &mut LeagueState,
        _config: &SimConfig,
    ) -> Result<ProposalId, Self::Error> {
        let id = state.ids().next_proposal();
        state.trades.insert(
            id,
            TradeProposal {
                id,
                from_team: self.from_team,
                to_team: self.to_team,
                offered: self.offered,
                requested: self.requested,
                status: TradeStatus::Pending,
            },
        );
        let description = format!(
            "{} offers {} to {} for {}",
            state.team_abbreviation(self.from_team),
            state.player_name(self.offered),
            state.team_abbreviation(self.to_team),
            state.player_name(self.requested),
        );
        state.record(
            EventKind::TradeProposed,
            EventRefs {
                team: Some(self.from_team),
                player: Some(self.offered),
                ..EventRefs::default()
            },
            description,
        );
        Ok(id)
    }
}

/// Decision recorded on a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeDecision {
    pub proposal: ProposalId,
    pub status: TradeStatus,
}

/// Accepts a pending proposal and swaps the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcceptTradeAction {
    pub proposal: ProposalId,
}

impl ActionTransition for AcceptTradeAction {
    type Error = TradeError;
    type Result = TradeDecision;

    fn pre_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        if let Some(game) = state.pointers.game_id {
            return Err(TradeError::GameInProgress(game));
        }
        let proposal = pending_proposal(state, self.proposal)?;
        // rosters may have changed since the offer was made
        check_on_roster(state, proposal.offered, proposal.from_team)?;
        check_on_roster(state, proposal.requested, proposal.to_team)
    }

    fn apply(
        &self,
        state: &mut LeagueState,
        _config: &SimConfig,
    ) -> Result<TradeDecision, Self::Error> {
        let proposal = pending_proposal(state, self.proposal)?.clone();
        let TradeProposal {
            from_team,
            to_team,
            offered,
            requested,
            ..
        } = proposal;

        let from = state
            .teams
            .get_mut(&from_team)
            .ok_or(TradeError::UnknownTeam(from_team))?;
        if !from.swap_player(offered, requested) {
            return Err(TradeError::NotOnRoster {
                player: offered,
                team: from_team,
            });
        }
        let to = state
            .teams
            .get_mut(&to_team)
            .ok_or(TradeError::UnknownTeam(to_team))?;
        if !to.swap_player(requested, offered) {
            return Err(TradeError::NotOnRoster {
                player: requested,
                team: to_team,
            });
        }
        for (player, team) in [(offered, to_team), (requested, from_team)] {
            if let Some(player) = state.players.get_mut(&player) {
                player.team_id = Some(team);
            }
        }
        if let Some(proposal) = state.trades.get_mut(&self.proposal) {
            proposal.status = TradeStatus::Accepted;
        }

        let description = format!(
            "{} acquires {} from {} for {}",
            state.team_abbreviation(from_team),
            state.player_name(requested),
            state.team_abbreviation(to_team),
            state.player_name(offered),
        );
        state.record(
            EventKind::TradeAccepted,
            EventRefs {
                team: Some(from_team),
                player: Some(requested),
                ..EventRefs::default()
            },
            description,
        );
        tracing::info!(proposal = %self.proposal, "trade accepted");
        Ok(TradeDecision {
            proposal: self.proposal,
            status: TradeStatus::Accepted,
        })
    }

    fn post_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        let Some(proposal) = state.trades.get(&self.proposal) else {
            return Err(TradeError::UnknownProposal(self.proposal));
        };
        check_on_roster(state, proposal.offered, proposal.to_team)?;
        check_on_roster(state, proposal.requested, proposal.from_team)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RejectTradeAction {
    pub proposal: ProposalId,
}

impl ActionTransition for RejectTradeAction {
    type Error = TradeError;
    type Result = TradeDecision;

    fn pre_validate(&self, state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        pending_proposal(state, self.proposal).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut LeagueState,
        _config: &SimConfig,
    ) -> Result<TradeDecision, Self::Error> {
        let proposal = state
            .trades
            .get_mut(&self.proposal)
            .ok_or(TradeError::UnknownProposal(self.proposal))?;
        proposal.status = TradeStatus::Rejected;
        let (from_team, to_team) = (proposal.from_team, proposal.to_team);

        let description = format!(
            "{} turns down the offer from {}",
            state.team_abbreviation(to_team),
            state.team_abbreviation(from_team),
        );
        state.record(
            EventKind::TradeRejected,
            EventRefs {
                team: Some(to_team),
                ..EventRefs::default()
            },
            description,
        );
        Ok(TradeDecision {
            proposal: self.proposal,
            status: TradeStatus::Rejected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BatterRatings, Player, Team};

    fn league() -> LeagueState {
        let mut state = LeagueState::with_seed(3);
        state.phase = LeaguePhase::RegularSeason;
        for (team_id, player_id) in [(1, 10), (2, 20)] {
            let mut team =
                Team::new(TeamId(team_id), format!("Team {team_id}"), format!("T{team_id}"));
            team.roster.push(PlayerId(player_id));
            team.lineup.push(PlayerId(player_id));
            state.teams.insert(team.id, team);
            state.players.insert(
                PlayerId(player_id),
                Player::batter(
                    PlayerId(player_id),
                    format!("Player {player_id}"),
                    BatterRatings::default(),
                )
                .on_team(TeamId(team_id)),
            );
        }
        state
    }

    fn propose(state: &mut LeagueState) -> ProposalId {
        let config = SimConfig::default();
        let action = ProposeTradeAction {
            from_team: TeamId(1),
            to_team: TeamId(2),
            offered: PlayerId(10),
            requested: PlayerId(20),
        };
        action.pre_validate(state, &config).expect("valid offer");
        action.apply(state, &config).expect("proposal")
    }

    #[test]
    fn accepted_trade_swaps_players() {
        let config = SimConfig::default();
        let mut state = league();
        let id = propose(&mut state);
        let accept = AcceptTradeAction { proposal: id };
        accept.pre_validate(&state, &config).expect("pending");
        accept.apply(&mut state, &config).expect("accept");
        accept.post_validate(&state, &config).expect("swapped");

        let home = state.teams.get(&TeamId(1)).expect("team");
        assert_eq!(home.lineup.as_slice(), &[PlayerId(20)]);
        assert_eq!(
            state.players.get(&PlayerId(10)).and_then(|p| p.team_id),
            Some(TeamId(2))
        );
        assert_eq!(
            state.trades.get(&id).map(|t| t.status),
            Some(TradeStatus::Accepted)
        );
    }

    #[test]
    fn resolved_proposal_cannot_be_decided_again() {
        let config = SimConfig::default();
        let mut state = league();
        let id = propose(&mut state);
        RejectTradeAction { proposal: id }
            .apply(&mut state, &config)
            .expect("reject");

        let err = AcceptTradeAction { proposal: id }
            .pre_validate(&state, &config)
            .expect_err("already rejected");
        assert_eq!(err.kind(), DiagnosticKind::AlreadyResolved);
    }

    #[test]
    fn offer_must_come_from_the_roster() {
        let state = league();
        let err = ProposeTradeAction {
            from_team: TeamId(1),
            to_team: TeamId(2),
            offered: PlayerId(20),
            requested: PlayerId(10),
        }
        .pre_validate(&state, &SimConfig::default())
        .expect_err("wrong roster");
        assert_eq!(
            err,
            TradeError::NotOnRoster {
                player: PlayerId(20),
                team: TeamId(1)
            }
        );
    }
}
