use crate::error::{DiagnosticKind, ErrorSeverity, GameError};
use crate::state::{AtBatId, GameId, HalfInningId, LeaguePhase, SeasonId, TeamId};

/// Errors raised while resolving pitches and progressing games and seasons.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayError {
    #[error("{entity} {id} does not exist")]
    MissingReference { entity: String, id: String },

    #[error("no at-bat is open")]
    NoActiveAtBat,

    #[error("no game is in progress")]
    NoActiveGame,

    #[error("at-bat {0} already has a result")]
    AlreadyResolved(AtBatId),

    #[error("at-bat {0} has no result yet")]
    AtBatOpen(AtBatId),

    #[error("half-inning {0} is still in progress")]
    HalfInningInProgress(HalfInningId),

    #[error("game {0} is already in progress")]
    GameAlreadyActive(GameId),

    #[error("game {0} is already final")]
    GameFinal(GameId),

    #[error("simulation is not allowed during {0}")]
    InvalidPhase(LeaguePhase),

    #[error("no season is active")]
    NoSeason,

    #[error("season {0} is complete")]
    SeasonComplete(SeasonId),

    #[error("team {0} cannot play itself")]
    SameTeam(TeamId),

    #[error("team {0} has no starting pitcher")]
    NoStartingPitcher(TeamId),

    #[error("team {0} has an empty lineup")]
    EmptyLineup(TeamId),

    #[error("game {game_id} stopped after the {cap} half-inning safety cap")]
    RunawayLoop { game_id: GameId, cap: u32 },
}

impl PlayError {
    pub fn missing(entity: &str, id: impl core::fmt::Display) -> Self {
        Self::MissingReference {
            entity: entity.to_owned(),
            id: id.to_string(),
        }
    }
}

impl GameError for PlayError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoActiveAtBat
            | Self::NoActiveGame
            | Self::AtBatOpen(_)
            | Self::HalfInningInProgress(_)
            | Self::GameAlreadyActive(_) => ErrorSeverity::Recoverable,
            Self::AlreadyResolved(_)
            | Self::GameFinal(_)
            | Self::InvalidPhase(_)
            | Self::NoSeason
            | Self::SeasonComplete(_)
            | Self::SameTeam(_)
            | Self::MissingReference { .. } => ErrorSeverity::Validation,
            Self::NoStartingPitcher(_) | Self::EmptyLineup(_) | Self::RunawayLoop { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn kind(&self) -> DiagnosticKind {
        match self {
            Self::MissingReference { .. } => DiagnosticKind::MissingReference,
            Self::InvalidPhase(_) => DiagnosticKind::InvalidPhase,
            Self::AlreadyResolved(_) => DiagnosticKind::AlreadyResolved,
            Self::RunawayLoop { .. } => DiagnosticKind::RunawayLoop,
            Self::SameTeam(_) => DiagnosticKind::InvalidInput,
            Self::NoActiveAtBat
            | Self::NoActiveGame
            | Self::AtBatOpen(_)
            | Self::HalfInningInProgress(_)
            | Self::GameAlreadyActive(_)
            | Self::GameFinal(_)
            | Self::NoSeason
            | Self::SeasonComplete(_)
            | Self::NoStartingPitcher(_)
            | Self::EmptyLineup(_) => DiagnosticKind::InvalidState,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingReference { .. } => "PLAY_MISSING_REFERENCE",
            Self::NoActiveAtBat => "PLAY_NO_ACTIVE_AT_BAT",
            Self::NoActiveGame => "PLAY_NO_ACTIVE_GAME",
            Self::AlreadyResolved(_) => "PLAY_ALREADY_RESOLVED",
            Self::AtBatOpen(_) => "PLAY_AT_BAT_OPEN",
            Self::HalfInningInProgress(_) => "PLAY_HALF_INNING_IN_PROGRESS",
            Self::GameAlreadyActive(_) => "PLAY_GAME_ALREADY_ACTIVE",
            Self::GameFinal(_) => "PLAY_GAME_FINAL",
            Self::InvalidPhase(_) => "PLAY_INVALID_PHASE",
            Self::NoSeason => "PLAY_NO_SEASON",
            Self::SeasonComplete(_) => "PLAY_SEASON_COMPLETE",
            Self::SameTeam(_) => "PLAY_SAME_TEAM",
            Self::NoStartingPitcher(_) => "PLAY_NO_STARTING_PITCHER",
            Self::EmptyLineup(_) => "PLAY_EMPTY_LINEUP",
            Self::RunawayLoop { .. } => "PLAY_RUNAWAY_LOOP",
        }
    }
}
