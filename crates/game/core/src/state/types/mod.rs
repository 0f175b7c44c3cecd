pub mod at_bat;
pub mod box_score;
pub mod common;
pub mod game;
pub mod half_inning;
pub mod log;
pub mod pitch;
pub mod player;
pub mod runners;
pub mod season;
pub mod stats;
pub mod team;
pub mod trade;

pub use at_bat::{AtBat, AtBatPlay, AtBatResult, BattedBallType, ContactQuality, PlayKind};
pub use box_score::{BatterBox, BoxScore, InningLine, TeamBox};
pub use common::{
    AtBatId, EventId, GameId, HalfInningId, IdCounters, PitchId, PlayerId, ProposalId, SeasonId,
    TeamId, Tick,
};
pub use game::{Game, GameSide, GameStatus, Score};
pub use half_inning::{HalfInning, Side};
pub use log::{EventKind, EventRefs, LogEvent};
pub use pitch::{
    Count, Intent, Location, Pitch, PitchCall, PitchFamily, PitchResult, PitchType,
};
pub use player::{
    BatterArchetype, BatterProfile, BatterRatings, MAX_REPERTOIRE, PitcherArchetype,
    PitcherProfile, PitcherRatings, Player, RATING_MAX, Repertoire,
};
pub use runners::{Bases, RunnerState};
pub use season::{LeaguePhase, ScheduledGame, Season, SeasonStatus, Standing};
pub use stats::{BattingLine, TeamTotals};
pub use team::{LINEUP_SIZE, Lineup, Team};
pub use trade::{TradeProposal, TradeStatus};
