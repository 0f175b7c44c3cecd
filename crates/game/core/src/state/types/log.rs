use super::{AtBatId, EventId, GameId, HalfInningId, PitchId, PlayerId, SeasonId, TeamId, Tick};

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
pub enum EventKind {
    LeagueCreated,
    UserTeamSelected,
    PhaseChanged,
    SeasonScheduled,
    SeasonDay,
    SeasonComplete,
    GameStarted,
    HalfInningStarted,
    Pitch,
    AtBatResolved,
    HalfInningEnded,
    GameFinal,
    TradeProposed,
    TradeAccepted,
    TradeRejected,
}

/// Entities an event is about. Unused slots stay `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRefs {
    pub season: Option<SeasonId>,
    pub game: Option<GameId>,
    pub half_inning: Option<HalfInningId>,
    pub at_bat: Option<AtBatId>,
    pub pitch: Option<PitchId>,
    pub player: Option<PlayerId>,
    pub team: Option<TeamId>,
}

/// Append-only narrative entry for presentation layers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEvent {
    pub id: EventId,
    /// Logical dispatch clock, not wall time.
    pub timestamp: Tick,
    pub kind: EventKind,
    pub refs: EventRefs,
    pub description: String,
}
