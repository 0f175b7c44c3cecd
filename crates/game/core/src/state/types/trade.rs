use super::{PlayerId, ProposalId, TeamId};

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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TradeStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A player-for-player offer between two clubs.
///
/// Evaluation happens outside the engine; the engine only records the
/// decision and, on acceptance, swaps roster membership one-for-one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeProposal {
    pub id: ProposalId,
    pub from_team: TeamId,
    pub to_team: TeamId,
    /// Leaves `from_team`.
    pub offered: PlayerId,
    /// Leaves `to_team`.
    pub requested: PlayerId,
    pub status: TradeStatus,
}

impl TradeProposal {
    pub fn is_pending(&self) -> bool {
        self.status == TradeStatus::Pending
    }
}
